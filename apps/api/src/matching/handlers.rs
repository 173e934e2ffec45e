//! Axum route handlers for the recommendation API.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collaborators::preview;
use crate::errors::AppError;
use crate::matching::pipeline::{recommend, AnalysisBundle, DataSources, Recommendation};
use crate::matching::trade_type::Category;
use crate::models::provider::ServiceProvider;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

pub const UPLOAD_FIELD: &str = "jobsheet";

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub job_description: String,
    pub trade_type: Category,
    pub location: String,
    pub analysis: AnalysisBundle,
    pub sources: DataSources,
    pub recommendations: Vec<ServiceProvider>,
}

impl RecommendationResponse {
    fn new(file: Option<String>, job_description: String, result: Recommendation) -> Self {
        Self {
            success: true,
            file,
            job_description,
            trade_type: result.trade_type,
            location: result.location,
            analysis: result.analysis,
            sources: result.sources,
            recommendations: result.recommendations,
        }
    }
}

/// An uploaded job sheet after multipart parsing.
struct JobSheet {
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

impl JobSheet {
    /// Plain text is read as-is; other formats get a filename placeholder.
    fn job_description(&self) -> String {
        if self.content_type == "text/plain" {
            String::from_utf8_lossy(&self.data).into_owned()
        } else {
            format!("Job description from {}", self.file_name)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/upload
///
/// Accepts multipart/form-data with a `jobsheet` file (PDF, DOC, DOCX or TXT).
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let sheet = read_job_sheet(multipart?, state.config.max_upload_bytes).await?;
    let job_description = sheet.job_description();

    debug!(
        "Received job sheet {} ({}, {} bytes)",
        sheet.file_name,
        sheet.content_type,
        sheet.data.len()
    );

    let result = recommend(&state, &job_description).await?;

    Ok(Json(RecommendationResponse::new(
        Some(sheet.file_name),
        job_description,
        result,
    )))
}

/// POST /api/analyze
///
/// Accepts `{"jobDescription": "..."}` and returns ranked recommendations.
pub async fn handle_analyze(
    State(state): State<AppState>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Json(request) = request?;

    let job_description = request
        .job_description
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::Validation("Job description is required".to_string()))?;

    debug!("Analyzing job description: {}", preview(&job_description));

    let result = recommend(&state, &job_description).await?;

    Ok(Json(RecommendationResponse::new(None, job_description, result)))
}

/// Maps a multipart read failure to a 400, naming the size limit when the
/// body was cut off by it.
fn multipart_error(e: MultipartError, what: &str, max_bytes: usize) -> AppError {
    debug!("Failed to read multipart {what}: {}", e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Validation(format!("File too large. Maximum upload size is {max_bytes} bytes."))
    } else {
        AppError::Validation(format!("Failed to read multipart {what}: {}", e.body_text()))
    }
}

async fn read_job_sheet(mut multipart: Multipart, max_bytes: usize) -> Result<JobSheet, AppError> {
    let mut sheet: Option<JobSheet> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "data", max_bytes))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!("Ignoring unknown field: {:?}", field.name());
            continue;
        }

        let content_type = field
            .content_type()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_lowercase())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        if !ALLOWED_MIME_TYPES.contains(&content_type.as_str()) {
            return Err(AppError::Validation(
                "Invalid file type. Only PDF, DOC, DOCX, and TXT files are allowed.".to_string(),
            ));
        }

        let file_name = field.file_name().unwrap_or("jobsheet").to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "file data", max_bytes))?;

        sheet = Some(JobSheet {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    sheet.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))
}
