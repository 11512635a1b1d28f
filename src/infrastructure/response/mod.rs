use crate::domain::csv::{FormatOptions, HeaderSet};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_ENCODING: &str = "Content-Encoding";
pub const CONTENT_TRANSFER_ENCODING: &str = "Content-Transfer-Encoding";
pub const CONTENT_DESCRIPTION: &str = "Content-Description";

/// Builds the HTTP headers for a CSV body; custom headers win on collision
pub fn build_csv_headers(custom_headers: &HeaderSet, options: &FormatOptions) -> HeaderSet {
    let mut headers = HeaderSet::new()
        .with(CONTENT_TYPE, format!("text/csv; charset={}", options.encoding))
        .with(CONTENT_ENCODING, options.encoding.clone())
        .with(CONTENT_TRANSFER_ENCODING, "binary")
        .with(CONTENT_DESCRIPTION, "File Transfer");

    headers.overlay(custom_headers);
    headers
}
