//! Record shapes persisted by the backing stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A submitted input as stored in the relational `inputs` table.
///
/// Append-only: created by the submission path, never mutated or deleted.
/// The identifier is assigned by the store at insertion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub id: i64,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

/// A consumed queue entry as stored in the relational `processed_jobs` table.
///
/// Created exactly once per successfully consumed job; append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    pub id: i64,
    pub payload: String,
    pub processed_at: DateTime<Utc>,
}

/// Best-effort snapshot of the key-value submission telemetry.
///
/// `input_count` is monotonic as long as nothing external resets the key; it
/// is telemetry, not an authoritative count of input records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub last_input: Option<String>,
    pub input_count: u64,
}
