//! Redis-backed job queue: a list pushed at the head (`LPUSH`) and popped
//! from the tail (`BRPOP`), plus the string keys for submission telemetry.
//!
//! The synchronous client is used throughout; every call runs on the
//! blocking pool so the async runtime is never parked on a Redis socket.
//! Connections are opened per call and dropped afterwards, which keeps the
//! health ping a genuine round trip.

use redis::Commands;

use relay_core::QueueSnapshot;

use super::{JobQueue, QueueError};

/// Key holding the most recently submitted payload.
const LAST_INPUT_KEY: &str = "last_input";

/// Key holding the monotonically increasing submission counter.
const INPUT_COUNT_KEY: &str = "input_count";

/// List key used as the FIFO job queue.
const JOBS_KEY: &str = "jobs";

/// Redis list-backed implementation of [`JobQueue`].
#[derive(Debug, Clone)]
pub struct RedisJobQueue {
    client: redis::Client,
}

impl RedisJobQueue {
    /// Create a queue over the given Redis URL (e.g. `redis://redis:6379/0`).
    ///
    /// Opening the client does not connect; connectivity problems surface on
    /// first use.
    pub fn new(redis_url: impl AsRef<str>) -> Result<Self, QueueError> {
        let client = redis::Client::open(redis_url.as_ref())
            .map_err(|e| QueueError::Connection(e.to_string()))?;
        Ok(Self { client })
    }

    fn connection(&self) -> Result<redis::Connection, QueueError> {
        self.client
            .get_connection()
            .map_err(|e| QueueError::Connection(e.to_string()))
    }
}

#[async_trait::async_trait]
impl JobQueue for RedisJobQueue {
    async fn record_submission(&self, payload: &str) -> Result<(), QueueError> {
        let queue = self.clone();
        let payload = payload.to_string();

        tokio::task::spawn_blocking(move || {
            let mut conn = queue.connection()?;
            conn.set::<_, _, ()>(LAST_INPUT_KEY, &payload)
                .map_err(|e| QueueError::Command(format!("SET {LAST_INPUT_KEY}: {e}")))?;
            conn.incr::<_, _, i64>(INPUT_COUNT_KEY, 1)
                .map_err(|e| QueueError::Command(format!("INCR {INPUT_COUNT_KEY}: {e}")))?;
            conn.lpush::<_, _, i64>(JOBS_KEY, &payload)
                .map_err(|e| QueueError::Command(format!("LPUSH {JOBS_KEY}: {e}")))?;
            Ok(())
        })
        .await
        .map_err(|e| QueueError::Command(format!("redis task failed: {e}")))?
    }

    async fn pop_blocking(&self) -> Result<String, QueueError> {
        let queue = self.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = queue.connection()?;
            // Zero timeout: BRPOP parks this connection until an entry
            // exists.
            let entry: Option<(String, String)> = redis::cmd("BRPOP")
                .arg(JOBS_KEY)
                .arg(0)
                .query(&mut conn)
                .map_err(|e| QueueError::Command(format!("BRPOP {JOBS_KEY}: {e}")))?;
            entry
                .map(|(_, payload)| payload)
                .ok_or_else(|| QueueError::Command(format!("BRPOP {JOBS_KEY}: no entry")))
        })
        .await
        .map_err(|e| QueueError::Command(format!("redis task failed: {e}")))?
    }

    async fn snapshot(&self) -> Result<QueueSnapshot, QueueError> {
        let queue = self.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = queue.connection()?;
            let last_input: Option<String> = conn
                .get(LAST_INPUT_KEY)
                .map_err(|e| QueueError::Command(format!("GET {LAST_INPUT_KEY}: {e}")))?;
            let count: Option<String> = conn
                .get(INPUT_COUNT_KEY)
                .map_err(|e| QueueError::Command(format!("GET {INPUT_COUNT_KEY}: {e}")))?;

            Ok(QueueSnapshot {
                last_input,
                input_count: count.and_then(|c| c.parse().ok()).unwrap_or(0),
            })
        })
        .await
        .map_err(|e| QueueError::Command(format!("redis task failed: {e}")))?
    }

    async fn ping(&self) -> Result<(), QueueError> {
        let queue = self.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = queue.connection()?;
            redis::cmd("PING")
                .query::<String>(&mut conn)
                .map_err(|e| QueueError::Command(format!("PING: {e}")))?;
            Ok(())
        })
        .await
        .map_err(|e| QueueError::Command(format!("redis task failed: {e}")))?
    }
}
