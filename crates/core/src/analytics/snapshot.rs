use serde::{Deserialize, Serialize};

use super::aggregate::{mean, percentage, round1};
use crate::reading::DerivedReading;

const PERIOD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Small statistics object describing a filtered table.
///
/// This is what the chat assistant sees instead of the full table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub total_records: usize,
    pub mean_freshness: f64,
    pub in_range_pct: f64,
    pub out_of_range_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl ContextSnapshot {
    /// `None` for an empty table.
    #[must_use]
    pub fn from_rows(rows: &[DerivedReading]) -> Option<Self> {
        let total = rows.len();
        let in_range = rows.iter().filter(|r| r.in_range).count();
        let mean_freshness = mean(rows.iter().map(|r| f64::from(r.freshness)))?;

        let mut stamps = rows.iter().filter_map(|r| r.timestamp);
        let period = stamps.next().map(|first| {
            let (min, max) = stamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));
            format!("{} → {}", min.format(PERIOD_FORMAT), max.format(PERIOD_FORMAT))
        });

        Some(Self {
            total_records: total,
            mean_freshness: round1(mean_freshness),
            in_range_pct: round1(percentage(in_range, total).unwrap_or(0.0)),
            out_of_range_pct: round1(percentage(total - in_range, total).unwrap_or(0.0)),
            period,
        })
    }

    /// JSON form used in prompts; an empty table becomes `{}`.
    #[must_use]
    pub fn to_json(snapshot: Option<&Self>) -> serde_json::Value {
        snapshot
            .and_then(|s| serde_json::to_value(s).ok())
            .unwrap_or_else(|| serde_json::json!({}))
    }
}
