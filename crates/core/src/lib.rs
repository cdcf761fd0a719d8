//! Core types and transforms for freshboard
//!
//! Domain types shared across all other crates, plus the pure reading
//! pipeline: normalisation, freshness scoring, filtering, and aggregation.

pub mod analytics;
pub mod constants;
mod env_config;
mod error;
mod freshness;
pub mod reading;
mod session;
mod user;

pub use env_config::*;
pub use error::*;
pub use freshness::*;
pub use reading::{
    normalize_table, parse_position, parse_timestamp, ColumnSet, DerivedReading,
    NormalizedTable, QuarantinedRow, Reading, ReadingTable,
};
pub use session::*;
pub use user::*;
