//! Resume text extraction from uploaded PDF bytes.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read PDF: {0}")]
    Unreadable(String),

    #[error("PDF contains no extractable text")]
    Empty,
}

/// Extracts plain text from a PDF. Parsing runs on the blocking pool because
/// `pdf-extract` is CPU-bound and may panic on malformed documents.
pub async fn extract_resume_text(pdf: Bytes) -> Result<String, ExtractionError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| ExtractionError::Unreadable(format!("extractor aborted: {e}")))?
        .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }

    debug!(chars = text.len(), "resume text extracted");
    Ok(text)
}
