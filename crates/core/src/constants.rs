//! Shared constants for freshboard.
//!
//! Thresholds and limits used by more than one crate live here.

/// Maximum |measured - ideal| for a reading to count as in range.
pub const IN_RANGE_MAX_DELTA: f64 = 1.0;

/// Physical column names of a company readings table.
pub const COL_ID: &str = "id";
pub const COL_QR_CODE: &str = "qr_code";
pub const COL_BARCODE: &str = "barcode";
pub const COL_PROVINCE: &str = "province";
pub const COL_IDEAL_TEMP: &str = "ideal_temp";
pub const COL_MEASURED_TEMP: &str = "measured_temp";
pub const COL_POSITION: &str = "pos";
pub const COL_SCANNED_AT: &str = "scanned_at";

/// PostgreSQL identifiers are truncated past this many bytes.
pub const MAX_TABLE_NAME_LEN: usize = 63;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default per-query timeout in seconds.
pub const DEFAULT_DB_TIMEOUT_SECS: u64 = 15;

/// Page sizes offered by the scan grid.
pub const GRID_PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// Default scan grid page size.
pub const DEFAULT_GRID_PAGE_SIZE: usize = 20;

/// Map zoom when showing the filtered table.
pub const MAP_ZOOM_OVERVIEW: u8 = 4;

/// Map zoom when showing a single selected QR code.
pub const MAP_ZOOM_SELECTED: u8 = 6;

/// Number of filtered rows sampled into the chat prompt.
pub const CHAT_SAMPLE_ROWS: usize = 10;

/// Character budget for the serialized sample rows in the chat prompt.
pub const CHAT_SAMPLE_MAX_CHARS: usize = 2000;
