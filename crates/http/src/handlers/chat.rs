use axum::{extract::State, Json};
use std::sync::Arc;

use freshboard_service::{ChatReply, ChatService};

use crate::api_error::ApiError;
use crate::query_types::ChatRequest;
use crate::response_types::TranscriptResponse;
use crate::session_auth::CurrentSession;
use crate::AppState;

pub async fn transcript(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
) -> Json<TranscriptResponse> {
    let session = current.session.lock().await;
    Json(TranscriptResponse {
        configured: state.chat.is_configured(),
        messages: ChatService::transcript(&session).to_vec(),
    })
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    Ok(Json(state.chat.ask(&current.session, &req.message).await?))
}
