//! Location Service Library
//!
//! CRUD over geocoded location records. This module exposes the
//! components for use in integration tests and as a library.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::{LocationError, LocationService};
pub use config::{load_config, Config, StoreBackend};
pub use domain::entities::{Coordinate, Location, LocationPatch, NewLocation};
pub use domain::ports::{AddressResolver, LocationRepository, ResolveError, StoreError};
pub use domain::value_objects::LocationId;
