//! Request/query types (Deserialize)

use chrono::NaiveDate;
use freshboard_core::analytics::{GridQuery, SortKey, SortOrder};
use freshboard_core::constants::DEFAULT_GRID_PAGE_SIZE;
use freshboard_core::CoreError;
use freshboard_service::DateFilter;
use serde::Deserialize;

const fn default_page() -> usize {
    1
}

const fn default_page_size() -> usize {
    DEFAULT_GRID_PAGE_SIZE
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `?start=YYYY-MM-DD&end=YYYY-MM-DD`, both optional.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl From<DateQuery> for DateFilter {
    fn from(query: DateQuery) -> Self {
        Self { start: query.start, end: query.end }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScansQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ScansQuery {
    pub fn date_filter(&self) -> DateFilter {
        DateFilter { start: self.start, end: self.end }
    }

    pub fn grid_query(&self) -> Result<GridQuery, CoreError> {
        let sort = self.sort.as_deref().map(str::parse::<SortKey>).transpose()?.unwrap_or_default();
        let order =
            self.order.as_deref().map(str::parse::<SortOrder>).transpose()?.unwrap_or_default();
        let query = GridQuery { sort, order, page: self.page, page_size: self.page_size };
        query.validate()?;
        Ok(query)
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub qr_code: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}
