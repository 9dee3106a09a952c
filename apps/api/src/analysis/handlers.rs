//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::analysis::pipeline::AnalysisResult;
use crate::errors::AppError;
use crate::extraction::extract_resume_text;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart form with a `resume` PDF file and a `job_description` text field.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut resume: Option<Bytes> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("resume") => {
                resume = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("could not read resume upload: {e}"))
                })?);
            }
            Some("job_description") => {
                job_description = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("could not read job_description: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let resume = resume.ok_or_else(|| AppError::Validation("resume file is required".into()))?;
    let job_description = job_description
        .ok_or_else(|| AppError::Validation("job_description is required".into()))?;
    require_non_empty("job_description", &job_description)?;

    let resume_text = extract_resume_text(resume).await?;

    let result = state.pipeline.analyze(&resume_text, &job_description).await?;
    Ok(Json(result))
}

/// POST /api/v1/analyze/text
///
/// Same analysis for callers that already hold the resume as text.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    require_non_empty("resume_text", &request.resume_text)?;
    require_non_empty("job_description", &request.job_description)?;

    let result = state
        .pipeline
        .analyze(&request.resume_text, &request.job_description)
        .await?;
    Ok(Json(result))
}

fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
