use serde::Serialize;

use super::filter::qr_history;
use crate::constants::{MAP_ZOOM_OVERVIEW, MAP_ZOOM_SELECTED};
use crate::freshness::FreshnessBand;
use crate::reading::DerivedReading;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub id: Option<i64>,
    pub lat: f64,
    pub lon: f64,
    pub qr_code: Option<String>,
    pub barcode: Option<String>,
    pub province: Option<String>,
    pub ideal_temp: Option<f64>,
    pub measured_temp: Option<f64>,
    pub freshness: u8,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub zoom: u8,
    pub selected_qr: Option<String>,
    pub points: Vec<MapPoint>,
}

/// Scan positions to plot.
///
/// With a selected QR code the whole history of that code is shown, ignoring
/// the date filter; otherwise the filtered rows. Rows without coordinates
/// are left out.
#[must_use]
pub fn map_view(
    all_rows: &[DerivedReading],
    filtered: &[DerivedReading],
    selected_qr: Option<&str>,
) -> MapView {
    let (source, zoom) = match selected_qr {
        Some(qr) => (qr_history(all_rows, qr), MAP_ZOOM_SELECTED),
        None => (filtered.to_vec(), MAP_ZOOM_OVERVIEW),
    };
    let points = source.iter().filter_map(to_point).collect();
    MapView { zoom, selected_qr: selected_qr.map(str::to_owned), points }
}

fn to_point(row: &DerivedReading) -> Option<MapPoint> {
    let (lat, lon) = row.coordinates()?;
    Some(MapPoint {
        id: row.reading.id,
        lat,
        lon,
        qr_code: row.reading.qr_code.clone(),
        barcode: row.reading.barcode.clone(),
        province: row.reading.province.clone(),
        ideal_temp: row.reading.ideal_temp,
        measured_temp: row.reading.measured_temp,
        freshness: row.freshness,
        color: FreshnessBand::for_score(f64::from(row.freshness)).color(),
    })
}
