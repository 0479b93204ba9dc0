//! Error types for the ClauseLens server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use clauselens_core::AnalyzeError;

/// Server error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Processing(#[from] AnalyzeError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ApiError::Processing(AnalyzeError::UnsupportedFormat(mime)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported document format: {}", mime),
            ),
            ApiError::Processing(AnalyzeError::DocumentParse(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DOCUMENT_PARSE_ERROR",
                format!("Failed to parse document: {}", msg),
            ),
            ApiError::Processing(err) => {
                // Classification and I/O failures are server-side;
                // log the detail, return a generic message
                tracing::error!(error = %err, "request processing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal error while processing the document".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
