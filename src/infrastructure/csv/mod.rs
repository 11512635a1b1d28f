// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV rendering and character encoding conversion

mod csv_formatter;
mod encoder;

pub use csv_formatter::{CsvFormatter, CsvPayload};
pub use encoder::CsvEncoder;
