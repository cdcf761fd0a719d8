//! Response shapes produced by the services and serialized by the HTTP layer.

use freshboard_core::analytics::{
    DailyTrend, DateRange, GridPage, Kpis, QrFreshness, TemperaturePoint,
};
use freshboard_core::{ChatMessage, DashboardSession, DerivedReading, QuarantinedRow};
use serde::Serialize;

/// Public part of a session, as shown after login.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub username: String,
    pub company: String,
    pub table: Option<String>,
    pub table_error: Option<String>,
    pub date_range: Option<DateRange>,
    pub selected_qr: Option<String>,
    pub grid_seed: u64,
    pub chat_messages: usize,
}

impl From<&DashboardSession> for SessionInfo {
    fn from(session: &DashboardSession) -> Self {
        Self {
            username: session.username.clone(),
            company: session.company.clone(),
            table: session.table.as_ref().map(|t| t.as_str().to_owned()),
            table_error: session.table_error.clone(),
            date_range: session.date_range,
            selected_qr: session.selected_qr.clone(),
            grid_seed: session.grid_seed,
            chat_messages: session.chat.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub company: String,
    pub table: Option<String>,
    /// Earliest and latest scan dates in the whole table.
    pub bounds: Option<DateRange>,
    /// Range actually applied to the rows below.
    pub date_range: Option<DateRange>,
    pub kpis: Kpis,
    pub freshness_by_qr: Vec<QrFreshness>,
    pub quarantined: Vec<QuarantinedRow>,
    pub selected_qr: Option<String>,
    pub grid_seed: u64,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScansView {
    #[serde(flatten)]
    pub grid: GridPage,
    pub selected_qr: Option<String>,
    pub grid_seed: u64,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub qr_code: Option<String>,
    pub rows: Vec<DerivedReading>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendsView {
    pub daily: Vec<DailyTrend>,
    pub selected_qr: Option<String>,
    /// Measured vs ideal temperature of the selected QR code.
    pub temperature: Vec<TemperaturePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionView {
    pub selected_qr: Option<String>,
    pub grid_seed: u64,
    /// `false` when the request left the selection as it was.
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub answer: String,
    pub transcript: Vec<ChatMessage>,
}
