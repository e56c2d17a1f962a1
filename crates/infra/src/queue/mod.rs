//! Durable FIFO job queue plus the submission telemetry keys that travel
//! with it (`last_input`, `input_count`).

mod in_memory;
mod redis_list;

pub use in_memory::InMemoryJobQueue;
pub use redis_list::RedisJobQueue;

use relay_core::QueueSnapshot;
use thiserror::Error;

/// Queue operation error.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("command error: {0}")]
    Command(String),
}

/// FIFO job queue: submissions push onto the head, the worker pops from the
/// tail.
///
/// A pop is destructive: the entry is removed atomically and delivered to
/// exactly one popper, and it is never re-queued afterwards. Ordering across
/// multiple concurrent poppers is not guaranteed.
#[async_trait::async_trait]
pub trait JobQueue: Send + Sync {
    /// Record one submission as a single key-value step: remember it as the
    /// last input, bump the submission counter, and push the payload onto
    /// the head of the queue.
    async fn record_submission(&self, payload: &str) -> Result<(), QueueError>;

    /// Pop the oldest entry (queue tail), suspending until one exists. No
    /// timeout.
    async fn pop_blocking(&self) -> Result<String, QueueError>;

    /// Best-effort telemetry snapshot. A missing or unparsable counter reads
    /// as zero.
    async fn snapshot(&self) -> Result<QueueSnapshot, QueueError>;

    /// Liveness round trip used by the health surface.
    async fn ping(&self) -> Result<(), QueueError>;
}
