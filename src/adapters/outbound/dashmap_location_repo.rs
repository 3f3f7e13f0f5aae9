//! DashMap Location Repository
//!
//! Implements LocationRepository using DashMap for lock-free concurrent access.
//! Data lives only as long as the process; useful for development and tests.

use crate::domain::entities::Location;
use crate::domain::ports::{LocationRepository, StoreError};
use crate::domain::value_objects::LocationId;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory location repository.
pub struct DashMapLocationRepository {
    locations: Arc<DashMap<LocationId, Location>>,
}

impl DashMapLocationRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            locations: Arc::new(DashMap::new()),
        }
    }

    /// Number of stored locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for DashMapLocationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocationRepository for DashMapLocationRepository {
    async fn insert(&self, location: &Location) -> Result<(), StoreError> {
        match self.locations.entry(location.id) {
            Entry::Occupied(_) => Err(StoreError::Backend(format!(
                "duplicate location id {}",
                location.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(location.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: &LocationId) -> Result<Location, StoreError> {
        self.locations
            .get(id)
            .map(|e| e.value().clone())
            .ok_or(StoreError::NotFound)
    }

    async fn replace(&self, location: &Location) -> Result<(), StoreError> {
        match self.locations.get_mut(&location.id) {
            Some(mut entry) => {
                *entry = location.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete_by_id(&self, id: &LocationId) -> Result<(), StoreError> {
        self.locations
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
