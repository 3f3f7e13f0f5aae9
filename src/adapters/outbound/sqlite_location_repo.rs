//! SQLite Location Repository
//!
//! Implements LocationRepository on a single SQLite table holding each
//! record as a JSON document keyed by its id.

use crate::domain::entities::Location;
use crate::domain::ports::{LocationRepository, StoreError};
use crate::domain::value_objects::LocationId;
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;

/// SQL schema for the locations table.
pub const LOCATIONS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS locations (
    id TEXT PRIMARY KEY,
    document TEXT NOT NULL
);
"#;

/// SQLite-backed location repository.
///
/// One connection is opened at startup and shared by every request.
/// Blocking calls run on the blocking thread pool.
pub struct SqliteLocationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLocationRepository {
    /// Open (or create) a database file.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(backend)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(backend)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(LOCATIONS_SCHEMA).map_err(backend)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock();
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Backend(format!("spawn_blocking error: {}", e)))?
    }
}

fn backend(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn encode(location: &Location) -> Result<String, StoreError> {
    serde_json::to_string(location).map_err(backend)
}

#[async_trait]
impl LocationRepository for SqliteLocationRepository {
    async fn insert(&self, location: &Location) -> Result<(), StoreError> {
        let id = location.id.to_hex();
        let document = encode(location)?;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO locations (id, document) VALUES (?1, ?2)",
                params![id, document],
            )
            .map_err(backend)?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: &LocationId) -> Result<Location, StoreError> {
        let id = id.to_hex();
        self.with_conn(move |conn| {
            let document: Option<String> = conn
                .query_row(
                    "SELECT document FROM locations WHERE id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(backend)?;

            match document {
                Some(doc) => serde_json::from_str(&doc).map_err(backend),
                None => Err(StoreError::NotFound),
            }
        })
        .await
    }

    async fn replace(&self, location: &Location) -> Result<(), StoreError> {
        let id = location.id.to_hex();
        let document = encode(location)?;
        self.with_conn(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE locations SET document = ?2 WHERE id = ?1",
                    params![id, document],
                )
                .map_err(backend)?;
            if changed == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
        .await
    }

    async fn delete_by_id(&self, id: &LocationId) -> Result<(), StoreError> {
        let id = id.to_hex();
        self.with_conn(move |conn| {
            let changed = conn
                .execute("DELETE FROM locations WHERE id = ?1", params![id])
                .map_err(backend)?;
            if changed == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
        .await
    }
}
