//! Queue worker: drain the job queue and durably record each processed job.
//!
//! The loop is the process's entire lifetime. A blocking pop suspends it
//! until an entry exists; any processing error is logged and followed by a
//! fixed backoff pause, never an exit. Restart-on-crash supervision belongs
//! to the container runtime, not this loop.
//!
//! Delivery is at-most-once: a popped entry is gone from the queue, so a
//! failure (or crash) between the pop and the audit insert loses that
//! payload. The loss is logged and accepted, not compensated.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use relay_infra::{JobQueue, QueueError, RecordStore, StoreError};

/// Worker iteration error.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Consume one queue entry and record it as processed.
///
/// Pops the oldest entry (suspending until one exists), ensures the audit
/// table, and appends a processed record. An error after the pop returns
/// with the popped entry already discarded.
pub async fn process_next(
    store: &dyn RecordStore,
    queue: &dyn JobQueue,
) -> Result<String, WorkerError> {
    let payload = queue.pop_blocking().await?;
    info!(payload = %payload, "received job");

    store.ensure_schema().await?;
    let id = store.insert_processed(&payload).await?;
    info!(id, payload = %payload, "stored processed job");

    Ok(payload)
}

/// Run the worker loop forever.
///
/// Successful iterations continue immediately; failed ones are logged and
/// followed by the backoff pause. There is no terminal state.
pub async fn run(store: Arc<dyn RecordStore>, queue: Arc<dyn JobQueue>, backoff: Duration) {
    info!("worker started, waiting for jobs");

    loop {
        if let Err(err) = process_next(store.as_ref(), queue.as_ref()).await {
            error!(error = %err, "worker loop error");
            tokio::time::sleep(backoff).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use relay_core::ListLimit;
    use relay_infra::{InMemoryJobQueue, InMemoryRecordStore};

    use super::*;

    const TICK: Duration = Duration::from_millis(10);

    /// Poll until `check` passes; the worker runs concurrently and drains
    /// eventually.
    async fn eventually(mut check: impl FnMut() -> bool, what: &str) {
        for _ in 0..200 {
            if check() {
                return;
            }
            tokio::time::sleep(TICK).await;
        }
        panic!("timed out waiting for {what}");
    }

    #[tokio::test]
    async fn drains_queue_to_empty_without_loss_or_duplication() {
        let store = Arc::new(InMemoryRecordStore::new());
        let queue = Arc::new(InMemoryJobQueue::new());

        let payloads: Vec<String> = (0..5).map(|i| format!("job-{i}")).collect();
        for payload in &payloads {
            queue.record_submission(payload).await.unwrap();
        }

        let worker = tokio::spawn(run(
            store.clone() as Arc<dyn RecordStore>,
            queue.clone() as Arc<dyn JobQueue>,
            TICK,
        ));

        eventually(|| store.processed().len() == payloads.len(), "queue drain").await;

        assert!(queue.is_empty().await);
        let processed: Vec<_> = store.processed().into_iter().map(|r| r.payload).collect();
        assert_eq!(processed, payloads);

        worker.abort();
    }

    #[tokio::test]
    async fn processes_jobs_submitted_while_running() {
        let store = Arc::new(InMemoryRecordStore::new());
        let queue = Arc::new(InMemoryJobQueue::new());

        let worker = tokio::spawn(run(
            store.clone() as Arc<dyn RecordStore>,
            queue.clone() as Arc<dyn JobQueue>,
            TICK,
        ));

        queue.record_submission("late arrival").await.unwrap();

        eventually(|| store.processed().len() == 1, "late job").await;
        assert_eq!(store.processed()[0].payload, "late arrival");

        worker.abort();
    }

    /// Store whose first audit insert fails; everything else delegates.
    struct FlakyStore {
        inner: InMemoryRecordStore,
        fail_next_insert: AtomicBool,
    }

    #[async_trait::async_trait]
    impl RecordStore for FlakyStore {
        async fn ensure_schema(&self) -> Result<(), StoreError> {
            self.inner.ensure_schema().await
        }

        async fn insert_input(&self, value: &str) -> Result<i64, StoreError> {
            self.inner.insert_input(value).await
        }

        async fn recent_inputs(
            &self,
            limit: ListLimit,
        ) -> Result<Vec<relay_core::InputRecord>, StoreError> {
            self.inner.recent_inputs(limit).await
        }

        async fn insert_processed(&self, payload: &str) -> Result<i64, StoreError> {
            if self.fail_next_insert.swap(false, Ordering::SeqCst) {
                return Err(StoreError::Connection("connection refused".to_string()));
            }
            self.inner.insert_processed(payload).await
        }

        async fn probe(&self) -> Result<(), StoreError> {
            self.inner.probe().await
        }
    }

    #[tokio::test]
    async fn insert_failure_discards_the_popped_job_and_keeps_running() {
        let store = Arc::new(FlakyStore {
            inner: InMemoryRecordStore::new(),
            fail_next_insert: AtomicBool::new(true),
        });
        let queue = Arc::new(InMemoryJobQueue::new());

        queue.record_submission("lost").await.unwrap();
        queue.record_submission("kept").await.unwrap();

        let worker = tokio::spawn(run(
            store.clone() as Arc<dyn RecordStore>,
            queue.clone() as Arc<dyn JobQueue>,
            TICK,
        ));

        eventually(|| store.inner.processed().len() == 1, "surviving job").await;

        // "lost" was popped before the failing insert: at-most-once means it
        // is gone, not re-queued.
        assert_eq!(store.inner.processed()[0].payload, "kept");
        assert!(queue.is_empty().await);

        worker.abort();
    }
}
