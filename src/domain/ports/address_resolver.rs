//! Address Resolver Port
//!
//! Defines the interface for turning a free-text postal address into
//! geographic coordinates.

use crate::domain::entities::Coordinate;
use async_trait::async_trait;

/// Errors returned by an address resolver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// The provider answered but did not report success (carries its status)
    #[error("address could not be geocoded: {0}")]
    InvalidAddress(String),
    /// The provider could not be reached or answered with an HTTP error
    #[error("geocoder transport error: {0}")]
    Transport(String),
    /// The provider answered with a body that could not be understood
    #[error("malformed geocoder response: {0}")]
    MalformedResponse(String),
}

/// Resolver for postal address to coordinates.
///
/// This is an outbound port that abstracts the geocoding provider.
/// Implementations issue exactly one lookup per call; nothing is cached.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolve an address line to the coordinate of the provider's first match.
    async fn resolve(&self, address: &str) -> Result<Coordinate, ResolveError>;
}
