// ============================================================
// CSV RESPONSE USE CASE
// ============================================================
// Turn a dataset into a CSV HTTP response through the host framework

use tracing::{debug, info};

use crate::domain::csv::{Dataset, FormatOptions, FormatOverrides, HeaderSet, IsEmpty};
use crate::domain::error::Result;
use crate::infrastructure::csv::CsvFormatter;
use crate::infrastructure::response::build_csv_headers;

pub const NO_CONTENT_BODY: &str = "No Content";
pub const NO_CONTENT_STATUS: u16 = 204;
pub const DEFAULT_STATUS: u16 = 200;

/// Host capability: build an HTTP response from a body, status and headers
pub trait ResponseFactory: Send + Sync {
    type Response;

    fn make(&self, body: Vec<u8>, status: u16, headers: HeaderSet) -> Result<Self::Response>;
}

pub struct CsvResponseUseCase<F: ResponseFactory> {
    factory: F,
    formatter: CsvFormatter,
    site_overrides: FormatOverrides,
}

impl<F: ResponseFactory> CsvResponseUseCase<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            formatter: CsvFormatter::new(),
            site_overrides: FormatOverrides::default(),
        }
    }

    /// Overrides applied before each call's own overrides
    pub fn with_site_overrides(mut self, overrides: FormatOverrides) -> Self {
        self.site_overrides = overrides;
        self
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Merge site and call overrides onto the defaults
    pub fn resolve_options(&self, overrides: &FormatOverrides) -> FormatOptions {
        FormatOptions::resolve(&self.site_overrides.merge(overrides))
    }

    pub fn execute(
        &self,
        data: &Dataset,
        status: u16,
        custom_headers: &HeaderSet,
        overrides: &FormatOverrides,
    ) -> Result<F::Response> {
        if IsEmpty::is_empty(data) {
            info!("CSV dataset is empty, responding with {}", NO_CONTENT_STATUS);
            return self.factory.make(
                NO_CONTENT_BODY.as_bytes().to_vec(),
                NO_CONTENT_STATUS,
                HeaderSet::new(),
            );
        }

        let options = self.resolve_options(overrides);
        debug!("Formatting CSV response with {:?}", options);

        let payload = self.formatter.format(data, &options)?;
        let headers = build_csv_headers(custom_headers, &options);

        self.factory.make(payload.into_bytes(), status, headers)
    }

    /// Status 200, no custom headers, no call overrides
    pub fn execute_default(&self, data: &Dataset) -> Result<F::Response> {
        self.execute(
            data,
            DEFAULT_STATUS,
            &HeaderSet::new(),
            &FormatOverrides::default(),
        )
    }
}
