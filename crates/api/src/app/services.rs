//! Service wiring: backing stores and the dual-write submission path.

use std::sync::Arc;

use tracing::{info, warn};

use relay_core::{InputRecord, ListLimit, QueueSnapshot};
use relay_infra::{
    AppConfig, JobQueue, PostgresRecordStore, QueueError, RecordStore, RedisJobQueue, StoreError,
};

/// Per-store outcome of one submission.
///
/// The relational insert and the key-value writes are independent steps in a
/// fixed order; one failing neither rolls back nor aborts the other, and the
/// caller sees both outcomes instead of an overall failure.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub text: String,
    pub postgres: String,
    pub redis: String,
}

/// Shared application services handed to every handler.
pub struct AppServices {
    store: Arc<dyn RecordStore>,
    queue: Arc<dyn JobQueue>,
    default_text: String,
}

impl AppServices {
    pub fn new(
        store: Arc<dyn RecordStore>,
        queue: Arc<dyn JobQueue>,
        default_text: impl Into<String>,
    ) -> Self {
        Self {
            store,
            queue,
            default_text: default_text.into(),
        }
    }

    /// Text substituted for absent or empty submissions.
    pub fn default_text(&self) -> &str {
        &self.default_text
    }

    /// Submit a payload: schema ensure + relational insert first, then the
    /// key-value writes and queue push. Best-effort dual write; each step's
    /// failure is caught independently and reported as a status string.
    pub async fn submit(&self, text: String) -> SubmissionReceipt {
        let postgres = match self.write_record(&text).await {
            Ok(id) => {
                info!(id, value = %text, "inserted input record");
                "Input written to Postgres".to_string()
            }
            Err(err) => {
                warn!(error = %err, "postgres write failed");
                format!("error: {err}")
            }
        };

        let redis = match self.queue.record_submission(&text).await {
            Ok(()) => {
                info!(value = %text, "pushed job onto queue");
                "Input written to Redis".to_string()
            }
            Err(err) => {
                warn!(error = %err, "redis write failed");
                format!("error: {err}")
            }
        };

        SubmissionReceipt {
            text,
            postgres,
            redis,
        }
    }

    async fn write_record(&self, text: &str) -> Result<i64, StoreError> {
        self.store.ensure_schema().await?;
        self.store.insert_input(text).await
    }

    pub async fn recent_messages(&self, limit: ListLimit) -> Result<Vec<InputRecord>, StoreError> {
        self.store.recent_inputs(limit).await
    }

    pub async fn queue_snapshot(&self) -> Result<QueueSnapshot, QueueError> {
        self.queue.snapshot().await
    }

    /// Aggregate health: a no-op query against the relational store, then a
    /// liveness ping against the key-value store. Single attempt each; retry
    /// policy belongs to whatever schedules the health checks.
    pub async fn health(&self) -> String {
        if let Err(err) = self.store.probe().await {
            return format!("error: {err}");
        }
        if let Err(err) = self.queue.ping().await {
            return format!("error: {err}");
        }
        "ok".to_string()
    }
}

/// Wire the production services from configuration.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let store = PostgresRecordStore::connect_with_retry(
        &config.database_url,
        config.connect_attempts,
        config.connect_retry_delay,
    )
    .await?;
    let queue = RedisJobQueue::new(&config.redis_url)?;

    Ok(AppServices::new(
        Arc::new(store),
        Arc::new(queue),
        config.default_text.clone(),
    ))
}

/// One-shot schema bootstrap (the `migrate` process mode).
pub async fn run_migrations(config: &AppConfig) -> anyhow::Result<()> {
    let store = PostgresRecordStore::connect_with_retry(
        &config.database_url,
        config.connect_attempts,
        config.connect_retry_delay,
    )
    .await?;
    store.ensure_schema().await?;
    info!("migrations applied");
    Ok(())
}
