//! Location Repository Port
//!
//! Defines the interface for persisting location records.
//! Implementations may use MongoDB, SQLite, or in-memory storage.

use crate::domain::entities::Location;
use crate::domain::value_objects::LocationId;
use async_trait::async_trait;

/// Errors returned by a location repository.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("location not found")]
    NotFound,
    #[error("store error: {0}")]
    Backend(String),
}

/// Repository for location records, keyed by id.
///
/// There are no transactions and no concurrency control: two replaces
/// of the same id race and the last write wins.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Store a new record. The id and coordinate are already set.
    async fn insert(&self, location: &Location) -> Result<(), StoreError>;

    /// Fetch a record by id.
    async fn find_by_id(&self, id: &LocationId) -> Result<Location, StoreError>;

    /// Replace the record with the same id.
    async fn replace(&self, location: &Location) -> Result<(), StoreError>;

    /// Remove a record by id.
    async fn delete_by_id(&self, id: &LocationId) -> Result<(), StoreError>;
}
