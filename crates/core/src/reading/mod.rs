//! Scan readings as loaded from a company table, and their derived form.

mod normalize;
mod position;
mod timestamp;

pub use normalize::*;
pub use position::*;
pub use timestamp::*;

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One raw row of a company readings table.
///
/// Every field is optional: a column may be NULL or missing from the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: Option<i64>,
    pub qr_code: Option<String>,
    pub barcode: Option<String>,
    pub province: Option<String>,
    pub ideal_temp: Option<f64>,
    pub measured_temp: Option<f64>,
    /// Combined `"lat,lon"` position string.
    pub position: Option<String>,
    /// Scan time as stored, usually a day-first locale string.
    pub scanned_at: Option<String>,
}

/// Names of the columns a loaded table actually has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSet(BTreeSet<String>);

impl ColumnSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Rows of a company table together with the columns it exposes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingTable {
    pub columns: ColumnSet,
    pub rows: Vec<Reading>,
}

impl ReadingTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A reading plus everything computed from it at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedReading {
    #[serde(flatten)]
    pub reading: Reading,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub timestamp: Option<NaiveDateTime>,
    pub in_range: bool,
    pub out_of_range: bool,
    pub freshness: u8,
}

impl DerivedReading {
    #[must_use]
    pub fn qr_code(&self) -> Option<&str> {
        self.reading.qr_code.as_deref()
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

/// A row excluded from the derived table because a field could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarantinedRow {
    pub id: Option<i64>,
    pub reason: String,
}
