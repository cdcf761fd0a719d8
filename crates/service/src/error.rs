//! Typed error enum for the service layer.
//!
//! Unifies storage, LLM, and domain failures into a single error type so the
//! HTTP layer can map each failure mode to a status code.

use freshboard_core::CoreError;
use freshboard_llm::LlmError;
use freshboard_storage::StorageError;
use thiserror::Error;

/// Why a login attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("user not found")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    /// The stored credential is not a bcrypt hash. Never compared in plaintext.
    #[error("stored credential is not a valid password hash")]
    UnusableCredential,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("authentication failed: {0}")]
    Auth(AuthFailure),

    /// Storage operation failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Completion API call failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Domain rule rejected the data or request (missing column, bad range).
    #[error("{0}")]
    Domain(#[from] CoreError),

    /// Caller provided invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Required backend (completion API) is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Session token unknown or already logged out.
    #[error("session not found")]
    SessionNotFound,

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<AuthFailure> for ServiceError {
    fn from(err: AuthFailure) -> Self {
        Self::Auth(err)
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}
