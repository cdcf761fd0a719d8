//! Typed API error for HTTP handlers.
//!
//! Converts service errors into HTTP responses with a JSON body and status code.
//! Handlers return `Result<Json<T>, ApiError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use freshboard_core::CoreError;
use freshboard_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input from caller.
    BadRequest(String),
    /// 401 Unauthorized: failed login, or missing/unknown session token.
    Unauthorized(String),
    /// 422 Unprocessable Entity: the company table cannot be rendered.
    UnprocessableEntity(String),
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
    /// 502 Bad Gateway: the completion API failed.
    BadGateway(String),
    /// 503 Service Unavailable: required backend not configured.
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingColumn(_) => Self::UnprocessableEntity(err.to_string()),
            _ => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Auth(_) | ServiceError::SessionNotFound => {
                Self::Unauthorized(err.to_string())
            },
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::Domain(e) => e.into(),
            ServiceError::NotConfigured(msg) => Self::ServiceUnavailable(msg),
            ServiceError::Llm(e) => {
                tracing::warn!(error = %e, "completion API call failed");
                Self::BadGateway("chat assistant is unavailable".to_owned())
            },
            ServiceError::Storage(_) | ServiceError::Task(_) => Self::Internal(err.into()),
        }
    }
}
