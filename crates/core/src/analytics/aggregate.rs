use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::freshness::FreshnessBand;
use crate::reading::DerivedReading;

/// Headline numbers for the filtered table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_scans: usize,
    pub mean_freshness: Option<f64>,
    pub in_range_pct: Option<f64>,
    pub out_of_range_pct: Option<f64>,
    pub quarantined: usize,
}

#[must_use]
pub fn compute_kpis(rows: &[DerivedReading], quarantined: usize) -> Kpis {
    let total = rows.len();
    let in_range = rows.iter().filter(|r| r.in_range).count();
    Kpis {
        total_scans: total,
        mean_freshness: mean(rows.iter().map(|r| f64::from(r.freshness))),
        in_range_pct: percentage(in_range, total),
        out_of_range_pct: percentage(total - in_range, total),
        quarantined,
    }
}

/// Mean freshness of one QR code, with its colour band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QrFreshness {
    pub qr_code: String,
    pub mean_freshness: f64,
    pub scans: usize,
    pub band: FreshnessBand,
    pub color: &'static str,
}

/// Mean freshness per QR code, ordered by QR code. Rows without one are skipped.
#[must_use]
pub fn freshness_by_qr(rows: &[DerivedReading]) -> Vec<QrFreshness> {
    let mut groups: BTreeMap<&str, (u64, usize)> = BTreeMap::new();
    for row in rows {
        if let Some(qr) = row.qr_code() {
            let entry = groups.entry(qr).or_default();
            entry.0 += u64::from(row.freshness);
            entry.1 += 1;
        }
    }
    groups
        .into_iter()
        .map(|(qr, (sum, count))| {
            let mean_freshness = sum as f64 / count as f64;
            let band = FreshnessBand::for_score(mean_freshness);
            QrFreshness {
                qr_code: qr.to_owned(),
                mean_freshness,
                scans: count,
                band,
                color: band.color(),
            }
        })
        .collect()
}

/// One day of the trend charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub scans: usize,
    pub mean_freshness: f64,
    pub mean_measured_temp: Option<f64>,
}

#[must_use]
pub fn daily_trends(rows: &[DerivedReading]) -> Vec<DailyTrend> {
    let mut days: BTreeMap<NaiveDate, Vec<&DerivedReading>> = BTreeMap::new();
    for row in rows {
        if let Some(ts) = row.timestamp {
            days.entry(ts.date()).or_default().push(row);
        }
    }
    days.into_iter()
        .map(|(date, day)| DailyTrend {
            date,
            scans: day.len(),
            mean_freshness: mean(day.iter().map(|r| f64::from(r.freshness))).unwrap_or(0.0),
            mean_measured_temp: mean(day.iter().filter_map(|r| r.reading.measured_temp)),
        })
        .collect()
}

/// Measured vs ideal temperature of one scan, for the selected-QR chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePoint {
    pub timestamp: NaiveDateTime,
    pub measured_temp: Option<f64>,
    pub ideal_temp: Option<f64>,
}

/// Temperature series of a QR history; rows without a timestamp are skipped.
#[must_use]
pub fn temperature_series(history: &[DerivedReading]) -> Vec<TemperaturePoint> {
    history
        .iter()
        .filter_map(|r| {
            r.timestamp.map(|timestamp| TemperaturePoint {
                timestamp,
                measured_temp: r.reading.measured_temp,
                ideal_temp: r.reading.ideal_temp,
            })
        })
        .collect()
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

pub(crate) fn percentage(part: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| part as f64 * 100.0 / total as f64)
}

/// Round to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
