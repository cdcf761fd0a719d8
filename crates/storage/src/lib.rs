//! Storage layer for freshboard
//!
//! Read-only PostgreSQL access: the `users` table and one readings table
//! per company.

mod error;
mod pg_storage;
pub mod traits;

pub use error::{is_undefined_table, StorageError};
pub use pg_storage::PgStorage;
pub use traits::{ReadingStore, UserStore};
