//! Location Service - Main application use case
//!
//! Orchestrates the CRUD use cases: parsing ids, resolving addresses
//! and delegating persistence. This is the primary interface for the
//! inbound adapter.

use crate::domain::entities::{Location, LocationPatch, NewLocation};
use crate::domain::ports::{AddressResolver, LocationRepository, ResolveError, StoreError};
use crate::domain::value_objects::LocationId;
use std::sync::Arc;

/// Errors produced by the location use cases.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    /// The resolver rejected the address (carries the provider status)
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// Unknown or malformed id
    #[error("location not found")]
    NotFound,
    /// The update body could not be decoded
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The geocoding provider could not be used
    #[error(transparent)]
    Geocoder(ResolveError),
    /// The store failed for a reason other than a missing record
    #[error(transparent)]
    Store(StoreError),
}

impl From<ResolveError> for LocationError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidAddress(status) => Self::InvalidAddress(status),
            other => Self::Geocoder(other),
        }
    }
}

impl From<StoreError> for LocationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

/// Location service - main application use case.
///
/// Holds no per-request state. The resolver and repository are built
/// once at startup and shared by every request.
pub struct LocationService {
    resolver: Arc<dyn AddressResolver>,
    repository: Arc<dyn LocationRepository>,
}

impl LocationService {
    /// Create a new location service.
    pub fn new(resolver: Arc<dyn AddressResolver>, repository: Arc<dyn LocationRepository>) -> Self {
        Self {
            resolver,
            repository,
        }
    }

    /// Geocode and store a new location.
    ///
    /// Nothing is stored when the address cannot be resolved.
    pub async fn create(&self, new: NewLocation) -> Result<Location, LocationError> {
        let coordinate = self.resolver.resolve(&new.address_line()).await?;
        let location = new.into_location(LocationId::generate(), coordinate);
        self.repository.insert(&location).await?;
        tracing::info!("created location {}", location.id);
        Ok(location)
    }

    /// Fetch a location by its textual id.
    pub async fn get(&self, id: &str) -> Result<Location, LocationError> {
        let id = parse_id(id)?;
        Ok(self.repository.find_by_id(&id).await?)
    }

    /// Merge a partial update into a stored location and re-resolve its coordinate.
    ///
    /// The stored record is left untouched when the merged address cannot
    /// be resolved.
    pub async fn update(&self, id: &str, patch: LocationPatch) -> Result<Location, LocationError> {
        self.update_with(id, || Ok(patch)).await
    }

    /// Like `update`, but the patch is decoded only once the record exists.
    ///
    /// A missing record answers NotFound whatever the body holds.
    pub async fn update_with<F>(&self, id: &str, decode: F) -> Result<Location, LocationError>
    where
        F: FnOnce() -> Result<LocationPatch, LocationError> + Send,
    {
        let id = parse_id(id)?;
        let mut location = self.repository.find_by_id(&id).await?;

        location.apply(decode()?);
        location.coordinate = self.resolver.resolve(&location.address_line()).await?;

        self.repository.replace(&location).await?;
        tracing::info!("updated location {}", location.id);
        Ok(location)
    }

    /// Remove a location by its textual id.
    pub async fn delete(&self, id: &str) -> Result<(), LocationError> {
        let id = parse_id(id)?;
        self.repository.delete_by_id(&id).await?;
        tracing::info!("deleted location {}", id);
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<LocationId, LocationError> {
    LocationId::parse(id).ok_or_else(|| {
        tracing::debug!("rejecting malformed location id {:?}", id);
        LocationError::NotFound
    })
}
