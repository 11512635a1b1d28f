mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use app::init_logging;
pub use application::{CsvResponseUseCase, ResponseFactory};
pub use domain::csv::{
    Cell, CsvSerialize, Dataset, Delimiter, FormatOptions, FormatOverrides, HeaderSet, IsEmpty,
    Record, Row,
};
pub use domain::error::{AppError, Result};
pub use infrastructure::config::ConfigService;
pub use infrastructure::csv::{CsvEncoder, CsvFormatter, CsvPayload};
pub use infrastructure::response::build_csv_headers;
pub use interfaces::http::{csv_http_response, ActixResponseFactory};
