//! Adapters
//!
//! Inbound adapters drive the application (HTTP); outbound adapters
//! implement the domain ports (geocoding, storage).

pub mod inbound;
pub mod outbound;
