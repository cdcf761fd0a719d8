use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::DateRange;
use crate::user::TableName;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// Interactive state of one logged-in user.
///
/// Created at login and dropped at logout. Every dashboard request reads and
/// updates exactly one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSession {
    pub token: Uuid,
    pub username: String,
    pub company: String,
    /// `None` when the company name could not be mapped to a readings table.
    pub table: Option<TableName>,
    /// Why `table` is missing, shown on every data view.
    pub table_error: Option<String>,
    pub date_range: Option<DateRange>,
    pub selected_qr: Option<String>,
    /// Bumped on every selection reset so the client re-keys its grid.
    pub grid_seed: u64,
    pub chat: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl DashboardSession {
    #[must_use]
    pub fn new(username: String, company: String, table: TableName) -> Self {
        Self::blank(username, company, Some(table), None)
    }

    /// A session for an authenticated user whose company has no usable table.
    #[must_use]
    pub fn without_table(username: String, company: String, reason: String) -> Self {
        Self::blank(username, company, None, Some(reason))
    }

    fn blank(
        username: String,
        company: String,
        table: Option<TableName>,
        table_error: Option<String>,
    ) -> Self {
        Self {
            token: Uuid::new_v4(),
            username,
            company,
            table,
            table_error,
            date_range: None,
            selected_qr: None,
            grid_seed: 0,
            chat: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Select a QR code. Returns `false` when it was already selected.
    pub fn select_qr(&mut self, qr_code: &str) -> bool {
        if self.selected_qr.as_deref() == Some(qr_code) {
            return false;
        }
        self.selected_qr = Some(qr_code.to_owned());
        true
    }

    pub fn reset_selection(&mut self) {
        self.selected_qr = None;
        self.grid_seed = self.grid_seed.wrapping_add(1);
    }
}
