//! Service layer for freshboard
//!
//! Centralizes business logic between the HTTP handlers and storage/llm.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod auth_service;
mod chat_service;
mod dashboard_service;
mod error;
mod session_registry;
mod views;

#[cfg(test)]
mod fakes;

pub use auth_service::{hash_password, AuthService};
pub use chat_service::ChatService;
pub use dashboard_service::{DashboardService, DateFilter};
pub use error::{AuthFailure, ServiceError};
pub use session_registry::{SessionRegistry, SharedSession};
pub use views::{
    ChatReply, DashboardOverview, HistoryView, ScansView, SelectionView, SessionInfo, TrendsView,
};
