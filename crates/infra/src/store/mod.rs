//! Relational record store: the append-only `inputs` table and the
//! `processed_jobs` audit table.

mod in_memory;
mod postgres;

pub use in_memory::InMemoryRecordStore;
pub use postgres::PostgresRecordStore;

use relay_core::{InputRecord, ListLimit};
use thiserror::Error;

/// Record store operation error.
///
/// Infrastructure errors only (connectivity, query execution); the domain
/// layer has no failure modes of its own here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}

/// Append-only store for input records and the processed-jobs audit trail.
///
/// Both tables are created idempotently by `ensure_schema`, which is safe to
/// run on every startup and again on every write path. Records are never
/// mutated or deleted by this system.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Idempotent schema bootstrap: create-if-absent tables, add-if-absent
    /// columns.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Append a new input record; the store assigns the identifier.
    async fn insert_input(&self, value: &str) -> Result<i64, StoreError>;

    /// The most recent input records, newest first (identifier descending).
    async fn recent_inputs(&self, limit: ListLimit) -> Result<Vec<InputRecord>, StoreError>;

    /// Append a processed-job audit record for a consumed payload.
    async fn insert_processed(&self, payload: &str) -> Result<i64, StoreError>;

    /// No-op round trip used by the health surface. Single attempt, no
    /// retries.
    async fn probe(&self) -> Result<(), StoreError>;
}
