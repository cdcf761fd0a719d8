//! Typed error enum for the storage layer.
//!
//! Lets callers tell a missing company table apart from every other
//! database failure without string-matching at the call site.

use std::time::Duration;

use thiserror::Error;

/// SQLSTATE for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Debug, Error)]
pub enum StorageError {
    /// The company table named in the session does not exist.
    #[error("table '{0}' does not exist in the database")]
    TableMissing(String),

    /// SQL / connection / pool failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// The query did not finish within the configured timeout.
    #[error("database query timed out after {0:?}")]
    Timeout(Duration),

    /// A column held a type the reading decoder cannot interpret.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StorageError {
    /// Reclassify an error raised while reading `table`.
    pub(crate) fn for_table(err: sqlx::Error, table: &str) -> Self {
        if is_undefined_table(&err) { Self::TableMissing(table.to_owned()) } else { err.into() }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

/// Whether `err` reports a relation that does not exist.
///
/// Prefers the SQLSTATE; falls back to the server message for drivers or
/// proxies that drop the code.
pub fn is_undefined_table(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => code == UNDEFINED_TABLE,
            None => message_reports_missing_table(db_err.message()),
        },
        _ => false,
    }
}

pub(crate) fn message_reports_missing_table(message: &str) -> bool {
    message.contains("does not exist") || message.contains("doesn't exist")
}
