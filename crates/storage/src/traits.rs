//! Storage traits
//!
//! The service layer depends on these rather than on `PgStorage`, so tests
//! can swap in in-memory stores.

use async_trait::async_trait;
use freshboard_core::{ReadingTable, TableName, User};

use crate::error::StorageError;

/// Read access to the `users` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up at most one user by exact username.
    async fn find_user(&self, username: &str) -> Result<Option<User>, StorageError>;
}

/// Read access to per-company readings tables.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Load every row of `table`.
    ///
    /// Returns [`StorageError::TableMissing`] when the table does not exist.
    async fn load_readings(&self, table: &TableName) -> Result<ReadingTable, StorageError>;
}
