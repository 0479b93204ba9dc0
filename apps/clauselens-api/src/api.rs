//! API handlers for the ClauseLens server
//!
//! Provides REST endpoints for:
//! - Welcome / service info
//! - Contract annotation (PDF and DOCX uploads)
//! - Clause report download as CSV

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use clauselens_core::{analyze_docx, annotate_pdf, ClauseRecord, DocumentFormat};

use crate::error::ApiError;
use crate::AppState;

/// Welcome response
#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /
pub async fn handle_welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Upload a contract to /annotate to classify its clauses",
        service: "clauselens-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: POST /annotate
///
/// PDF uploads come back as a highlighted PDF; DOCX uploads have no
/// page geometry, so they come back as the clause records directly.
pub async fn handle_annotate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_file_part(multipart).await?;
    let format = DocumentFormat::from_mime(&upload.content_type)?;

    match format {
        DocumentFormat::Pdf => {
            let annotated = annotate_pdf(&upload.bytes, state.classifier.as_ref())?;
            info!(clauses = annotated.report.len(), "annotated PDF upload");
            Ok((
                [
                    (header::CONTENT_TYPE, "application/pdf"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"annotated.pdf\"",
                    ),
                ],
                annotated.pdf_bytes,
            )
                .into_response())
        }
        DocumentFormat::Docx => {
            let report = analyze_docx(&upload.bytes, state.classifier.as_ref())?;
            info!(clauses = report.len(), "analyzed DOCX upload");
            let records: Vec<ClauseRecord> = report.records().to_vec();
            Ok(Json(records).into_response())
        }
    }
}

/// Handler: POST /report
///
/// Runs the same pipeline but returns only the clause report, as CSV.
pub async fn handle_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_file_part(multipart).await?;
    let format = DocumentFormat::from_mime(&upload.content_type)?;

    let report = match format {
        DocumentFormat::Pdf => annotate_pdf(&upload.bytes, state.classifier.as_ref())?.report,
        DocumentFormat::Docx => analyze_docx(&upload.bytes, state.classifier.as_ref())?,
    };
    let csv = report.to_csv()?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"clause_report.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// An uploaded document with its declared content type.
struct Upload {
    content_type: String,
    bytes: Vec<u8>,
}

/// Pull the `file` part out of a multipart upload.
async fn read_file_part(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                ApiError::InvalidRequest("file part must declare a content type".to_string())
            })?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?
            .to_vec();
        return Ok(Upload {
            content_type,
            bytes,
        });
    }
    Err(ApiError::InvalidRequest(
        "multipart upload is missing a 'file' part".to_string(),
    ))
}
