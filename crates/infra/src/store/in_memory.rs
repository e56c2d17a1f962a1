//! In-memory record store (tests and local wiring without a database).

use std::sync::Mutex;

use chrono::Utc;

use relay_core::{InputRecord, ListLimit, ProcessedRecord};

use super::{RecordStore, StoreError};

/// In-memory implementation of [`RecordStore`].
///
/// Mirrors the relational semantics: sequential identifiers, append-only,
/// newest-first listing. Inherent accessors expose the state so tests can
/// assert on it directly.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    schema_ready: bool,
    inputs: Vec<InputRecord>,
    processed: Vec<ProcessedRecord>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All input records in insertion order.
    pub fn inputs(&self) -> Vec<InputRecord> {
        self.lock().inputs.clone()
    }

    /// All processed records in insertion order.
    pub fn processed(&self) -> Vec<ProcessedRecord> {
        self.lock().processed.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("record store state lock poisoned")
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.lock().schema_ready = true;
        Ok(())
    }

    async fn insert_input(&self, value: &str) -> Result<i64, StoreError> {
        let mut state = self.lock();
        let id = state.inputs.len() as i64 + 1;
        state.inputs.push(InputRecord {
            id,
            value: value.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn recent_inputs(&self, limit: ListLimit) -> Result<Vec<InputRecord>, StoreError> {
        let state = self.lock();
        Ok(state
            .inputs
            .iter()
            .rev()
            .take(limit.as_i64() as usize)
            .cloned()
            .collect())
    }

    async fn insert_processed(&self, payload: &str) -> Result<i64, StoreError> {
        let mut state = self.lock();
        let id = state.processed.len() as i64 + 1;
        state.processed.push(ProcessedRecord {
            id,
            payload: payload.to_string(),
            processed_at: Utc::now(),
        });
        Ok(id)
    }

    async fn probe(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
