//! HTTP API server for freshboard.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;
mod session_auth;
mod viewer;

use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use freshboard_service::{AuthService, ChatService, DashboardService, SessionRegistry};

pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub dashboard: Arc<DashboardService>,
    pub chat: Arc<ChatService>,
    /// Live dashboard sessions, keyed by bearer token.
    pub sessions: SessionRegistry,
}

impl AppState {
    #[must_use]
    pub fn new(auth: AuthService, dashboard: Arc<DashboardService>, chat: ChatService) -> Self {
        Self {
            auth: Arc::new(auth),
            dashboard,
            chat: Arc::new(chat),
            sessions: SessionRegistry::new(),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(viewer::serve_viewer))
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/logout", post(handlers::auth::logout))
        .route("/api/session", get(handlers::auth::session_info))
        .route("/api/dashboard", get(handlers::dashboard::overview))
        .route("/api/scans", get(handlers::dashboard::scans))
        .route(
            "/api/selection",
            post(handlers::dashboard::select_qr).delete(handlers::dashboard::reset_selection),
        )
        .route("/api/history", get(handlers::dashboard::history))
        .route("/api/map", get(handlers::dashboard::map))
        .route("/api/trends", get(handlers::dashboard::trends))
        .route("/api/chat", get(handlers::chat::transcript).post(handlers::chat::ask))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
