use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::screening::criteria::CriteriaExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every response carries a `{"detail": <message>}` body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    DocumentParse(String),

    #[error("Error processing criteria: {0}")]
    CriteriaExtraction(#[from] CriteriaExtractionError),

    #[error("Failed to build spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFileType(filename) => AppError::UnsupportedFileType(filename),
            other @ ExtractionError::DocumentParse { .. } => AppError::DocumentParse(other.to_string()),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFileType(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!("Request failed: {detail}");
        } else {
            tracing::warn!("Request rejected: {detail}");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
