// ============================================================
// CSV FORMATTER
// ============================================================
// Render rows into delimited, quoted and encoded CSV text

use std::borrow::Cow;

use encoding_rs::Encoding;
use tracing::debug;

use super::CsvEncoder;
use crate::domain::csv::{Dataset, FormatOptions, Record, Row};
use crate::domain::error::Result;

const LINE_SEPARATOR: &str = "\r\n";
const QUOTE: char = '"';

/// Encoded CSV body
#[derive(Debug, Clone)]
pub struct CsvPayload {
    bytes: Vec<u8>,
    encoding: &'static Encoding,
}

impl CsvPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

/// Stateless CSV formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Format a dataset and encode it into `options.encoding`
    pub fn format(&self, data: &Dataset, options: &FormatOptions) -> Result<CsvPayload> {
        let encoder = CsvEncoder::for_label(&options.encoding)?;

        let text = match data {
            Dataset::Raw(raw) => {
                debug!("Passing raw CSV payload through ({} bytes)", raw.len());
                Cow::Borrowed(raw.as_str())
            }
            Dataset::Rows(rows) => Cow::Owned(self.render_rows(rows, options)?),
        };

        let bytes = encoder.encode(&text)?;

        Ok(CsvPayload {
            bytes,
            encoding: encoder.encoding(),
        })
    }

    /// Join the header line (if any) and every row with CRLF
    pub fn render_rows(&self, rows: &[Row], options: &FormatOptions) -> Result<String> {
        // One bad row fails the whole payload
        let records = rows
            .iter()
            .map(Row::row_data)
            .collect::<Result<Vec<Cow<'_, Record>>>>()?;

        let mut lines = Vec::with_capacity(records.len() + 1);

        if options.include_header {
            match records.first().and_then(|first| first.keys()) {
                Some(keys) => {
                    debug!("Writing CSV header with {} columns", keys.len());
                    lines.push(self.render_row(keys, options));
                }
                None => debug!("First row is indexed, skipping CSV header"),
            }
        }

        for record in &records {
            lines.push(self.render_row(record.values(), options));
        }

        debug!(
            "Rendered {} CSV rows (delimiter={:?} quoted={})",
            records.len(),
            options.delimiter.as_char(),
            options.quoted
        );

        Ok(lines.join(LINE_SEPARATOR))
    }

    /// Render one row's cells as a single line without separator. Quoting
    /// wraps every cell and doubles inner quotes; unquoted cells are written
    /// verbatim.
    pub fn render_row<I, T>(&self, cells: I, options: &FormatOptions) -> String
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut line = String::new();
        for (idx, cell) in cells.into_iter().enumerate() {
            if idx > 0 {
                line.push(options.delimiter.as_char());
            }
            if options.quoted {
                push_quoted(&mut line, cell.as_ref());
            } else {
                line.push_str(cell.as_ref());
            }
        }
        line
    }
}

fn push_quoted(line: &mut String, cell: &str) {
    line.push(QUOTE);
    for c in cell.chars() {
        if c == QUOTE {
            line.push(QUOTE);
        }
        line.push(c);
    }
    line.push(QUOTE);
}
