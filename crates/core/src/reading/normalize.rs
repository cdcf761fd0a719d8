use serde::{Deserialize, Serialize};

use super::{ColumnSet, DerivedReading, QuarantinedRow, Reading, ReadingTable};
use super::{parse_position, parse_timestamp};
use crate::constants::{COL_IDEAL_TEMP, COL_MEASURED_TEMP, COL_POSITION, COL_SCANNED_AT};
use crate::error::{CoreError, Result};
use crate::freshness::{freshness_score, is_in_range};

/// Output of [`normalize_table`]: derived rows plus the rows set aside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub columns: ColumnSet,
    pub rows: Vec<DerivedReading>,
    pub quarantined: Vec<QuarantinedRow>,
}

impl NormalizedTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Derive coordinates, timestamps, range flags, and freshness for every row.
///
/// Fails only when the table has no timestamp column. A row with a malformed
/// position is quarantined instead of failing the batch.
pub fn normalize_table(table: ReadingTable) -> Result<NormalizedTable> {
    let ReadingTable { columns, rows } = table;
    if !columns.has(COL_SCANNED_AT) {
        return Err(CoreError::MissingColumn(COL_SCANNED_AT));
    }
    let has_position = columns.has(COL_POSITION);
    let has_temperatures = columns.has(COL_IDEAL_TEMP) && columns.has(COL_MEASURED_TEMP);

    let mut derived = Vec::with_capacity(rows.len());
    let mut quarantined = Vec::new();
    for reading in rows {
        match derive_reading(reading, has_position, has_temperatures) {
            Ok(row) => derived.push(row),
            Err(row) => quarantined.push(row),
        }
    }

    if !quarantined.is_empty() {
        tracing::warn!(
            quarantined = quarantined.len(),
            kept = derived.len(),
            "quarantined readings with malformed fields"
        );
    }
    Ok(NormalizedTable { columns, rows: derived, quarantined })
}

fn derive_reading(
    reading: Reading,
    has_position: bool,
    has_temperatures: bool,
) -> std::result::Result<DerivedReading, QuarantinedRow> {
    let (lat, lon) = match reading.position.as_deref().map(str::trim) {
        Some(raw) if has_position && !raw.is_empty() => match parse_position(raw) {
            Ok((lat, lon)) => (Some(lat), Some(lon)),
            Err(e) => return Err(QuarantinedRow { id: reading.id, reason: e.to_string() }),
        },
        _ => (None, None),
    };

    let timestamp = reading.scanned_at.as_deref().and_then(parse_timestamp);
    let in_range = if has_temperatures {
        is_in_range(reading.measured_temp, reading.ideal_temp)
    } else {
        true
    };
    let freshness = freshness_score(reading.measured_temp, reading.ideal_temp);

    Ok(DerivedReading {
        reading,
        lat,
        lon,
        timestamp,
        in_range,
        out_of_range: !in_range,
        freshness,
    })
}
