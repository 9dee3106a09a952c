use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::pipeline::AnalysisError;
use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Upstream failures are logged in full and reported to clients generically.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNREADABLE_RESUME",
                    "The resume could not be read as text".to_string(),
                )
            }
            AppError::Analysis(AnalysisError::Embedding(e)) => {
                tracing::error!("Embedding error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EMBEDDING_SERVICE_ERROR",
                    "Resume analysis failed. Please try again later.".to_string(),
                )
            }
            AppError::Analysis(AnalysisError::Similarity(e)) => {
                tracing::error!("Similarity error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EMBEDDING_SERVICE_ERROR",
                    "Resume analysis failed. Please try again later.".to_string(),
                )
            }
            AppError::Analysis(AnalysisError::Feedback(e)) => {
                tracing::error!("Feedback error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "FEEDBACK_SERVICE_ERROR",
                    "Resume analysis failed. Please try again later.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
