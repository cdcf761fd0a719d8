//! Embedded single-page dashboard viewer served at `/`.
//!
//! Login form, KPI tiles, the scan grid with QR selection, and the chat box,
//! all driven by the JSON API.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

pub const VIEWER_HTML: &str = include_str!("viewer.html");

pub async fn serve_viewer() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/html; charset=utf-8")], Html(VIEWER_HTML))
        .into_response()
}
