use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GRID_PAGE_SIZE, GRID_PAGE_SIZES};
use crate::error::{CoreError, Result};
use crate::reading::DerivedReading;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Timestamp,
    Id,
    QrCode,
    Freshness,
    MeasuredTemp,
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "timestamp" => Ok(Self::Timestamp),
            "id" => Ok(Self::Id),
            "qr_code" => Ok(Self::QrCode),
            "freshness" => Ok(Self::Freshness),
            "measured_temp" => Ok(Self::MeasuredTemp),
            other => Err(CoreError::InvalidInput(format!("unknown sort column '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(CoreError::InvalidInput(format!("unknown sort order '{other}'"))),
        }
    }
}

/// Sort and page selection for the scan grid. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridQuery {
    pub sort: SortKey,
    pub order: SortOrder,
    pub page: usize,
    pub page_size: usize,
}

impl Default for GridQuery {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_GRID_PAGE_SIZE,
        }
    }
}

impl GridQuery {
    pub fn validate(&self) -> Result<()> {
        if !GRID_PAGE_SIZES.contains(&self.page_size) {
            return Err(CoreError::InvalidInput(format!(
                "page_size must be one of {GRID_PAGE_SIZES:?}"
            )));
        }
        if self.page == 0 {
            return Err(CoreError::InvalidInput("page starts at 1".to_owned()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPage {
    pub rows: Vec<DerivedReading>,
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

/// Sort `rows` and cut out the requested page.
///
/// Missing values sort last regardless of direction.
pub fn grid_page(rows: &[DerivedReading], query: GridQuery) -> Result<GridPage> {
    query.validate()?;
    let mut sorted: Vec<&DerivedReading> = rows.iter().collect();
    sorted.sort_by(|a, b| compare(a, b, query.sort, query.order));

    let total_rows = sorted.len();
    let total_pages = total_rows.div_ceil(query.page_size);
    let rows = sorted
        .into_iter()
        .skip((query.page - 1).saturating_mul(query.page_size))
        .take(query.page_size)
        .cloned()
        .collect();
    Ok(GridPage { rows, page: query.page, page_size: query.page_size, total_rows, total_pages })
}

fn compare(a: &DerivedReading, b: &DerivedReading, key: SortKey, order: SortOrder) -> Ordering {
    match key {
        SortKey::Timestamp => nulls_last(a.timestamp.as_ref(), b.timestamp.as_ref(), order),
        SortKey::Id => nulls_last(a.reading.id.as_ref(), b.reading.id.as_ref(), order),
        SortKey::QrCode => nulls_last(a.qr_code(), b.qr_code(), order),
        SortKey::Freshness => directed(a.freshness.cmp(&b.freshness), order),
        SortKey::MeasuredTemp => {
            match (a.reading.measured_temp, b.reading.measured_temp) {
                (Some(x), Some(y)) => directed(x.total_cmp(&y), order),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        },
    }
}

fn nulls_last<T: Ord + ?Sized>(a: Option<&T>, b: Option<&T>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => directed(x.cmp(y), order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

const fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}
