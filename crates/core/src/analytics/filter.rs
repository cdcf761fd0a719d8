use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::reading::DerivedReading;

/// Inclusive calendar-date range, timezone-naive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(CoreError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Fill in whichever bound the caller left open from `fallback`.
    pub fn with_defaults(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        fallback: Option<Self>,
    ) -> Result<Option<Self>> {
        match (start.or(fallback.map(|r| r.start)), end.or(fallback.map(|r| r.end))) {
            (Some(start), Some(end)) => Self::new(start, end).map(Some),
            _ => Ok(None),
        }
    }
}

/// Earliest and latest scan dates, or `None` when no row has a timestamp.
#[must_use]
pub fn date_bounds(rows: &[DerivedReading]) -> Option<DateRange> {
    let mut dates = rows.iter().filter_map(|r| r.timestamp).map(|ts| ts.date());
    let first = dates.next()?;
    let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(DateRange { start, end })
}

/// Rows whose timestamp falls within `range`; rows without one are dropped.
#[must_use]
pub fn filter_by_date(rows: &[DerivedReading], range: DateRange) -> Vec<DerivedReading> {
    rows.iter()
        .filter(|r| r.timestamp.is_some_and(|ts| range.contains(ts.date())))
        .cloned()
        .collect()
}

/// All rows for one QR code, oldest first.
#[must_use]
pub fn qr_history(rows: &[DerivedReading], qr_code: &str) -> Vec<DerivedReading> {
    let mut history: Vec<DerivedReading> =
        rows.iter().filter(|r| r.qr_code() == Some(qr_code)).cloned().collect();
    history.sort_by_key(|r| (r.timestamp.is_none(), r.timestamp));
    history
}
