//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by table.

mod readings;
mod users;

use std::future::Future;
use std::time::Duration;

use freshboard_core::constants::{
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::StorageError;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgStorage {
    pub async fn new(database_url: &str, query_timeout: Duration) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        tracing::info!(timeout = ?query_timeout, "PgStorage initialized");
        Ok(Self { pool, query_timeout })
    }

    #[must_use]
    pub const fn from_pool(pool: PgPool, query_timeout: Duration) -> Self {
        Self { pool, query_timeout }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run `query` under the configured timeout.
    async fn timed<T, F>(&self, query: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        tokio::time::timeout(self.query_timeout, query)
            .await
            .map_err(|_| StorageError::Timeout(self.query_timeout))?
    }
}
