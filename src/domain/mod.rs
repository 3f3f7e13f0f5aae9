//! Domain Layer
//!
//! Entities, value objects and the outbound ports the application
//! layer talks to. Nothing here knows about HTTP or databases.

pub mod entities;
pub mod ports;
pub mod value_objects;

pub use entities::{Coordinate, Location, LocationPatch, NewLocation};
pub use value_objects::LocationId;
