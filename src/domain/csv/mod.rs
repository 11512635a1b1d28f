// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types and value objects for CSV responses
// No I/O, no HTTP framework types

mod csv_row;
mod dataset;
mod format_options;
mod header_set;

pub use csv_row::{Cell, CsvSerialize, Record, Row};
pub use dataset::{Dataset, IsEmpty};
pub use format_options::{
    Delimiter, FormatOptions, FormatOverrides, DEFAULT_DELIMITER, DEFAULT_ENCODING,
};
pub use header_set::HeaderSet;
