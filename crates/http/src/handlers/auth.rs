use axum::{extract::State, Json};
use std::sync::Arc;

use freshboard_service::SessionInfo;

use crate::api_error::ApiError;
use crate::query_types::LoginRequest;
use crate::response_types::{LoginResponse, LogoutResponse};
use crate::session_auth::CurrentSession;
use crate::AppState;

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session = state.auth.login(&req.username, &req.password).await?;
    let resp = LoginResponse {
        token: session.token,
        username: session.username.clone(),
        company: session.company.clone(),
        table: session.table.as_ref().map(|t| t.as_str().to_owned()),
    };
    state.sessions.insert(session).await;
    Ok(Json(resp))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
) -> Json<LogoutResponse> {
    let logged_out = state.sessions.remove(&current.token).await;
    tracing::info!(token = %current.token, "session closed");
    Json(LogoutResponse { logged_out })
}

pub async fn session_info(current: CurrentSession) -> Json<SessionInfo> {
    let session = current.session.lock().await;
    Json(SessionInfo::from(&*session))
}
