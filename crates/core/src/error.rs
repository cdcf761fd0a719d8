use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by the pure domain transforms in freshboard.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("malformed position '{raw}': {reason}")]
    MalformedPosition { raw: String, reason: String },

    #[error("table has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("invalid table name '{0}'")]
    InvalidTableName(String),

    #[error("company '{0}' has no table in the allow-list")]
    CompanyNotAllowed(String),

    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, CoreError>;
