//! Freshness scoring and temperature range checks.

use serde::{Deserialize, Serialize};

use crate::constants::IN_RANGE_MAX_DELTA;

/// Discrete freshness score from the gap between measured and ideal temperature.
///
/// A missing (or NaN) temperature scores 0. Otherwise the score steps down
/// with the absolute delta: ≤1 → 100, ≤3 → 80, ≤5 → 50, else 20.
#[must_use]
pub fn freshness_score(measured: Option<f64>, ideal: Option<f64>) -> u8 {
    let (Some(measured), Some(ideal)) = (measured, ideal) else {
        return 0;
    };
    let delta = (measured - ideal).abs();
    if delta.is_nan() {
        0
    } else if delta <= 1.0 {
        100
    } else if delta <= 3.0 {
        80
    } else if delta <= 5.0 {
        50
    } else {
        20
    }
}

/// Whether a reading sits within [`IN_RANGE_MAX_DELTA`] of its ideal temperature.
///
/// A missing value never compares as in range.
#[must_use]
pub fn is_in_range(measured: Option<f64>, ideal: Option<f64>) -> bool {
    match (measured, ideal) {
        (Some(measured), Some(ideal)) => (measured - ideal).abs() <= IN_RANGE_MAX_DELTA,
        _ => false,
    }
}

/// Colour band for a (mean) freshness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessBand {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl FreshnessBand {
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 70.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Fair
        } else if score >= 30.0 {
            Self::Poor
        } else {
            Self::Critical
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#2E7D32",
            Self::Good => "#7CB342",
            Self::Fair => "#F9A825",
            Self::Poor => "#EF6C00",
            Self::Critical => "#C62828",
        }
    }
}
