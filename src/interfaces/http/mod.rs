use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::application::{CsvResponseUseCase, ResponseFactory};
use crate::domain::csv::{Dataset, FormatOverrides, HeaderSet};
use crate::domain::error::{AppError, Result};

/// Builds actix-web responses for the CSV use case
#[derive(Debug, Clone, Copy, Default)]
pub struct ActixResponseFactory;

impl ResponseFactory for ActixResponseFactory {
    type Response = HttpResponse;

    fn make(&self, body: Vec<u8>, status: u16, headers: HeaderSet) -> Result<HttpResponse> {
        let status = StatusCode::from_u16(status).map_err(|e| {
            AppError::ValidationError(format!("Invalid HTTP status {}: {}", status, e))
        })?;

        let mut response = HttpResponse::build(status);
        for (name, value) in headers {
            let header_name = HeaderName::try_from(name.as_str()).map_err(|e| {
                AppError::ValidationError(format!("Invalid header name {:?}: {}", name, e))
            })?;
            let header_value = HeaderValue::try_from(value.as_str()).map_err(|e| {
                AppError::ValidationError(format!("Invalid value for header {}: {}", name, e))
            })?;
            response.insert_header((header_name, header_value));
        }

        Ok(response.body(body))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        error!("CSV response failed: {}", self);
        HttpResponse::InternalServerError().body(self.to_string())
    }
}

/// Build a CSV `HttpResponse` in one call
pub fn csv_http_response(
    data: &Dataset,
    status: u16,
    custom_headers: &HeaderSet,
    overrides: &FormatOverrides,
) -> Result<HttpResponse> {
    CsvResponseUseCase::new(ActixResponseFactory).execute(data, status, custom_headers, overrides)
}
