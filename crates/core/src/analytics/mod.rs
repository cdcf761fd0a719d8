//! Filtering, aggregation, and view shaping over derived readings.

mod aggregate;
mod filter;
mod grid;
mod map;
mod snapshot;

pub use aggregate::{
    compute_kpis, daily_trends, freshness_by_qr, round1, temperature_series, DailyTrend, Kpis,
    QrFreshness, TemperaturePoint,
};
pub use filter::*;
pub use grid::*;
pub use map::*;
pub use snapshot::*;
