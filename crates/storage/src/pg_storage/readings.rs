//! ReadingStore implementation for PgStorage.
//!
//! Company tables are provisioned by an external ingestion process, so
//! column types vary between companies. Each field is decoded by trying the
//! types seen in practice, in order.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use freshboard_core::constants::{
    COL_BARCODE, COL_ID, COL_IDEAL_TEMP, COL_MEASURED_TEMP, COL_POSITION, COL_PROVINCE,
    COL_QR_CODE, COL_SCANNED_AT,
};
use freshboard_core::{ColumnSet, Reading, ReadingTable, TableName};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::postgres::PgRow;
use sqlx::{Column, Row};

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::ReadingStore;

const TIMESTAMP_TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[async_trait]
impl ReadingStore for PgStorage {
    async fn load_readings(&self, table: &TableName) -> Result<ReadingTable, StorageError> {
        // `table` is a validated identifier, so quoting it is sufficient.
        let sql = format!("SELECT * FROM {}", table.quoted());
        let rows = self
            .timed(async {
                sqlx::query(&sql)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| StorageError::for_table(e, table.as_str()))
            })
            .await?;

        let columns = rows
            .first()
            .map(|r| ColumnSet::new(r.columns().iter().map(|c| c.name().to_owned())))
            .unwrap_or_default();
        let readings =
            rows.iter().map(|r| row_to_reading(r, &columns)).collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(table = %table, rows = readings.len(), "loaded readings");
        Ok(ReadingTable { columns, rows: readings })
    }
}

pub(crate) fn row_to_reading(row: &PgRow, columns: &ColumnSet) -> Result<Reading, StorageError> {
    let text = |col: &str| if columns.has(col) { decode_text(row, col) } else { Ok(None) };
    let number = |col: &str| if columns.has(col) { decode_f64(row, col) } else { Ok(None) };

    Ok(Reading {
        id: if columns.has(COL_ID) { decode_i64(row, COL_ID)? } else { None },
        qr_code: text(COL_QR_CODE)?,
        barcode: text(COL_BARCODE)?,
        province: text(COL_PROVINCE)?,
        ideal_temp: number(COL_IDEAL_TEMP)?,
        measured_temp: number(COL_MEASURED_TEMP)?,
        position: text(COL_POSITION)?,
        scanned_at: if columns.has(COL_SCANNED_AT) {
            decode_timestamp_text(row, COL_SCANNED_AT)?
        } else {
            None
        },
    })
}

fn decode_text(row: &PgRow, col: &str) -> Result<Option<String>, StorageError> {
    if let Ok(v) = row.try_get::<Option<String>, _>(col) {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(col) {
        return Ok(v.map(|n| n.to_string()));
    }
    row.try_get::<Option<i32>, _>(col)
        .map(|v| v.map(|n| n.to_string()))
        .map_err(|e| corrupt(col, "text", e))
}

fn decode_i64(row: &PgRow, col: &str) -> Result<Option<i64>, StorageError> {
    if let Ok(v) = row.try_get::<Option<i64>, _>(col) {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<Option<i32>, _>(col) {
        return Ok(v.map(i64::from));
    }
    if let Ok(v) = row.try_get::<Option<i16>, _>(col) {
        return Ok(v.map(i64::from));
    }
    if let Ok(v) = row.try_get::<Option<Decimal>, _>(col) {
        return Ok(v.and_then(|d| d.trunc().to_i64()));
    }
    row.try_get::<Option<String>, _>(col)
        .map(|v| v.and_then(|s| s.trim().parse().ok()))
        .map_err(|e| corrupt(col, "integer", e))
}

fn decode_f64(row: &PgRow, col: &str) -> Result<Option<f64>, StorageError> {
    if let Ok(v) = row.try_get::<Option<f64>, _>(col) {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<Option<f32>, _>(col) {
        return Ok(v.map(f64::from));
    }
    // NUMERIC columns
    if let Ok(v) = row.try_get::<Option<Decimal>, _>(col) {
        return Ok(v.and_then(|d| d.to_f64()));
    }
    if let Ok(v) = row.try_get::<Option<i32>, _>(col) {
        return Ok(v.map(f64::from));
    }
    if let Ok(v) = row.try_get::<Option<i16>, _>(col) {
        return Ok(v.map(f64::from));
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(col) {
        return Ok(v.map(|n| n as f64));
    }
    row.try_get::<Option<String>, _>(col)
        .map(|v| v.as_deref().and_then(parse_decimal))
        .map_err(|e| corrupt(col, "numeric", e))
}

fn decode_timestamp_text(row: &PgRow, col: &str) -> Result<Option<String>, StorageError> {
    if let Ok(v) = row.try_get::<Option<String>, _>(col) {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<Option<NaiveDateTime>, _>(col) {
        return Ok(v.map(|ts| ts.format(TIMESTAMP_TEXT_FORMAT).to_string()));
    }
    if let Ok(v) = row.try_get::<Option<DateTime<Utc>>, _>(col) {
        return Ok(v.map(|ts| ts.naive_utc().format(TIMESTAMP_TEXT_FORMAT).to_string()));
    }
    row.try_get::<Option<NaiveDate>, _>(col)
        .map(|v| v.map(|d| d.to_string()))
        .map_err(|e| corrupt(col, "timestamp", e))
}

/// Parse a decimal stored as text, accepting a comma as decimal separator.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    raw.parse().ok().or_else(|| raw.replacen(',', ".", 1).parse().ok())
}

fn corrupt(col: &str, expected: &str, source: sqlx::Error) -> StorageError {
    StorageError::DataCorruption {
        context: format!("column '{col}' is not {expected}"),
        source: Box::new(source),
    }
}
