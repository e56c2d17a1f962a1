use std::sync::Arc;

use relay_infra::{AppConfig, JobQueue, PostgresRecordStore, RecordStore, RedisJobQueue};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    relay_observability::init();

    let config = AppConfig::from_env();

    let store = PostgresRecordStore::connect_with_retry(
        &config.database_url,
        config.connect_attempts,
        config.connect_retry_delay,
    )
    .await?;
    let queue = RedisJobQueue::new(&config.redis_url)?;

    relay_worker::run(
        Arc::new(store) as Arc<dyn RecordStore>,
        Arc::new(queue) as Arc<dyn JobQueue>,
        config.worker_backoff,
    )
    .await;

    Ok(())
}
