//! Infrastructure layer: Postgres record store, Redis job queue, config.

pub mod config;
pub mod queue;
pub mod store;

pub use config::AppConfig;
pub use queue::{InMemoryJobQueue, JobQueue, QueueError, RedisJobQueue};
pub use store::{InMemoryRecordStore, PostgresRecordStore, RecordStore, StoreError};
