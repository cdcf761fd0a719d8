//! Response types (Serialize)

use freshboard_core::ChatMessage;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub username: String,
    pub company: String,
    /// `None` when the company has no usable readings table.
    pub table: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    /// Whether a completion API key is configured.
    pub configured: bool,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
