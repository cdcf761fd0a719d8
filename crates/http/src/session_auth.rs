//! Bearer-token session extractor.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use freshboard_service::SharedSession;
use uuid::Uuid;

use crate::api_error::ApiError;
use crate::AppState;

/// The caller's dashboard session, looked up from `Authorization: Bearer <token>`.
pub struct CurrentSession {
    pub token: Uuid,
    pub session: SharedSession,
}

impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let session = state.sessions.get(&token).await?;
        Ok(Self { token, session })
    }
}

fn bearer_token(parts: &Parts) -> Result<Uuid, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_owned()))?;
    let raw = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_owned()))?;
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::Unauthorized("malformed session token".to_owned()))
}
