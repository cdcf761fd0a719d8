use std::sync::Arc;

use chrono::NaiveDate;
use freshboard_core::analytics::{
    compute_kpis, daily_trends, date_bounds, filter_by_date, freshness_by_qr, grid_page, map_view,
    qr_history, temperature_series, DateRange, GridQuery, MapView,
};
use freshboard_core::{
    normalize_table, DashboardSession, DerivedReading, NormalizedTable, QuarantinedRow,
};
use freshboard_storage::{ReadingStore, StorageError};

use crate::error::ServiceError;
use crate::views::{DashboardOverview, HistoryView, ScansView, SelectionView, TrendsView};

const NO_DATA_WARNING: &str = "no data available";

/// Date bounds supplied with a request. Open bounds fall back to the
/// session's range, then to the table's own bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateFilter {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// The company table after normalisation and date filtering, for one request.
#[derive(Debug, Default)]
pub(crate) struct TableView {
    pub all: Vec<DerivedReading>,
    pub filtered: Vec<DerivedReading>,
    pub quarantined: Vec<QuarantinedRow>,
    pub bounds: Option<DateRange>,
    pub range: Option<DateRange>,
    pub warnings: Vec<String>,
}

/// Builds every dashboard view from the session's company table.
pub struct DashboardService {
    readings: Arc<dyn ReadingStore>,
}

impl DashboardService {
    #[must_use]
    pub fn new(readings: Arc<dyn ReadingStore>) -> Self {
        Self { readings }
    }

    /// Load, normalise and filter the session's table.
    ///
    /// A missing or unresolvable table gives an empty view with a warning; any
    /// other storage failure and a table without a timestamp column are errors.
    pub(crate) async fn load_view(
        &self,
        session: &mut DashboardSession,
        filter: DateFilter,
    ) -> Result<TableView, ServiceError> {
        let Some(table_name) = session.table.clone() else {
            let reason = session
                .table_error
                .clone()
                .unwrap_or_else(|| format!("no readings table for company '{}'", session.company));
            return Ok(TableView { warnings: vec![reason], ..TableView::default() });
        };
        let table = match self.readings.load_readings(&table_name).await {
            Ok(table) => table,
            Err(e @ StorageError::TableMissing(_)) => {
                tracing::warn!(table = %table_name, "company table does not exist");
                return Ok(TableView { warnings: vec![e.to_string()], ..TableView::default() });
            },
            Err(e) => return Err(e.into()),
        };
        if table.is_empty() {
            return Ok(TableView {
                warnings: vec![NO_DATA_WARNING.to_owned()],
                ..TableView::default()
            });
        }

        let NormalizedTable { rows, quarantined, .. } = normalize_table(table)?;
        let bounds = date_bounds(&rows);
        let fallback = session.date_range.or(bounds);
        let range = DateRange::with_defaults(filter.start, filter.end, fallback)?;
        if !filter.is_empty() {
            session.date_range = range;
        }

        let filtered = range.map_or_else(Vec::new, |r| filter_by_date(&rows, r));
        tracing::debug!(
            table = %table_name,
            rows = rows.len(),
            filtered = filtered.len(),
            quarantined = quarantined.len(),
            "loaded company table"
        );

        let mut warnings = Vec::new();
        if !quarantined.is_empty() {
            warnings.push(format!(
                "{} rows were skipped because of malformed fields",
                quarantined.len()
            ));
        }
        Ok(TableView { all: rows, filtered, quarantined, bounds, range, warnings })
    }

    pub async fn overview(
        &self,
        session: &mut DashboardSession,
        filter: DateFilter,
    ) -> Result<DashboardOverview, ServiceError> {
        let view = self.load_view(session, filter).await?;
        Ok(DashboardOverview {
            company: session.company.clone(),
            table: session.table.as_ref().map(|t| t.as_str().to_owned()),
            bounds: view.bounds,
            date_range: view.range,
            kpis: compute_kpis(&view.filtered, view.quarantined.len()),
            freshness_by_qr: freshness_by_qr(&view.filtered),
            quarantined: view.quarantined,
            selected_qr: session.selected_qr.clone(),
            grid_seed: session.grid_seed,
            warnings: view.warnings,
        })
    }

    pub async fn scans(
        &self,
        session: &mut DashboardSession,
        filter: DateFilter,
        query: GridQuery,
    ) -> Result<ScansView, ServiceError> {
        query.validate()?;
        let view = self.load_view(session, filter).await?;
        Ok(ScansView {
            grid: grid_page(&view.filtered, query)?,
            selected_qr: session.selected_qr.clone(),
            grid_seed: session.grid_seed,
            warnings: view.warnings,
        })
    }

    /// Full history of the selected QR code over the unfiltered table.
    pub async fn history(
        &self,
        session: &mut DashboardSession,
    ) -> Result<HistoryView, ServiceError> {
        let Some(qr) = session.selected_qr.clone() else {
            return Ok(HistoryView { qr_code: None, rows: Vec::new() });
        };
        let view = self.load_view(session, DateFilter::default()).await?;
        Ok(HistoryView { rows: qr_history(&view.all, &qr), qr_code: Some(qr) })
    }

    pub async fn map(
        &self,
        session: &mut DashboardSession,
        filter: DateFilter,
    ) -> Result<MapView, ServiceError> {
        let view = self.load_view(session, filter).await?;
        Ok(map_view(&view.all, &view.filtered, session.selected_qr.as_deref()))
    }

    pub async fn trends(
        &self,
        session: &mut DashboardSession,
        filter: DateFilter,
    ) -> Result<TrendsView, ServiceError> {
        let view = self.load_view(session, filter).await?;
        let temperature = session
            .selected_qr
            .as_deref()
            .map(|qr| temperature_series(&qr_history(&view.all, qr)))
            .unwrap_or_default();
        Ok(TrendsView {
            daily: daily_trends(&view.filtered),
            selected_qr: session.selected_qr.clone(),
            temperature,
        })
    }

    pub fn select_qr(
        &self,
        session: &mut DashboardSession,
        qr_code: &str,
    ) -> Result<SelectionView, ServiceError> {
        let qr_code = qr_code.trim();
        if qr_code.is_empty() {
            return Err(ServiceError::InvalidInput("qr_code must not be empty".to_owned()));
        }
        let changed = session.select_qr(qr_code);
        if changed {
            tracing::debug!(username = %session.username, qr_code, "selected QR code");
        }
        Ok(selection(session, changed))
    }

    pub fn reset_selection(&self, session: &mut DashboardSession) -> SelectionView {
        session.reset_selection();
        selection(session, true)
    }
}

fn selection(session: &DashboardSession, changed: bool) -> SelectionView {
    SelectionView {
        selected_qr: session.selected_qr.clone(),
        grid_seed: session.grid_seed,
        changed,
    }
}
