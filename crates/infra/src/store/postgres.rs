//! Postgres-backed record store.
//!
//! Schema (ensured idempotently, never migrated destructively):
//!
//! | Table | Columns |
//! |-------|---------|
//! | `inputs` | `id SERIAL PRIMARY KEY`, `value TEXT NOT NULL`, `created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()` |
//! | `processed_jobs` | `id SERIAL PRIMARY KEY`, `payload TEXT NOT NULL`, `processed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()` |
//!
//! The `created_at` column is added with `ADD COLUMN IF NOT EXISTS` so that
//! databases bootstrapped by an older revision pick it up on the next run.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::{info, warn};

use relay_core::{InputRecord, ListLimit};

use super::{RecordStore, StoreError};

const MAX_CONNECTIONS: u32 = 5;

/// Postgres-backed append-only record store.
///
/// Uses the SQLx connection pool, which is thread-safe and shared across
/// handlers; the store itself is cheap to clone.
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: Arc<PgPool>,
}

impl PostgresRecordStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect eagerly, retrying while the database comes up.
    ///
    /// After the final failed attempt the store falls back to a lazy pool and
    /// the process still starts: store calls then surface connection errors
    /// per request instead of failing the boot.
    pub async fn connect_with_retry(
        url: &str,
        attempts: u32,
        delay: Duration,
    ) -> Result<Self, StoreError> {
        for attempt in 1..=attempts {
            match PgPoolOptions::new()
                .max_connections(MAX_CONNECTIONS)
                .connect(url)
                .await
            {
                Ok(pool) => {
                    info!(attempt, "connected to postgres");
                    return Ok(Self::new(pool));
                }
                Err(err) => {
                    warn!(attempt, attempts, error = %err, "postgres not ready");
                    tokio::time::sleep(delay).await;
                }
            }
        }

        warn!("starting with a lazy postgres pool; connections retry on use");
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_lazy(url)
            .map_err(|e| StoreError::Connection(format!("invalid database url: {e}")))?;
        Ok(Self::new(pool))
    }
}

#[async_trait::async_trait]
impl RecordStore for PostgresRecordStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS inputs (
                id SERIAL PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create inputs", e))?;

        sqlx::query(
            r#"
            ALTER TABLE inputs
            ADD COLUMN IF NOT EXISTS created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("add created_at", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS processed_jobs (
                id SERIAL PRIMARY KEY,
                payload TEXT NOT NULL,
                processed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create processed_jobs", e))?;

        Ok(())
    }

    async fn insert_input(&self, value: &str) -> Result<i64, StoreError> {
        let row = sqlx::query("INSERT INTO inputs (value) VALUES ($1) RETURNING id")
            .bind(value)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert input", e))?;

        let id: i32 = row
            .try_get("id")
            .map_err(|e| StoreError::Query(format!("insert input: {e}")))?;
        Ok(i64::from(id))
    }

    async fn recent_inputs(&self, limit: ListLimit) -> Result<Vec<InputRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, value, created_at
            FROM inputs
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit.as_i64())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list inputs", e))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(InputRecord {
                id: row
                    .try_get::<i32, _>("id")
                    .map(i64::from)
                    .map_err(|e| StoreError::Query(format!("list inputs: {e}")))?,
                value: row
                    .try_get("value")
                    .map_err(|e| StoreError::Query(format!("list inputs: {e}")))?,
                created_at: row
                    .try_get("created_at")
                    .map_err(|e| StoreError::Query(format!("list inputs: {e}")))?,
            });
        }
        Ok(records)
    }

    async fn insert_processed(&self, payload: &str) -> Result<i64, StoreError> {
        let row = sqlx::query("INSERT INTO processed_jobs (payload) VALUES ($1) RETURNING id")
            .bind(payload)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert processed", e))?;

        let id: i32 = row
            .try_get("id")
            .map_err(|e| StoreError::Query(format!("insert processed: {e}")))?;
        Ok(i64::from(id))
    }

    async fn probe(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("probe", e))?;
        Ok(())
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Connection(format!("{operation}: {err}"))
        }
        other => StoreError::Query(format!("{operation}: {other}")),
    }
}
