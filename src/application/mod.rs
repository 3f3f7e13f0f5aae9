//! Application Layer
//!
//! Use cases orchestrating the domain ports.

mod location_service;

pub use location_service::{LocationError, LocationService};
