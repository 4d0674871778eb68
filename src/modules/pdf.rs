//! PDF text extraction
//!
//! Thin wrapper over the `pdf-extract` crate. Extraction is CPU bound and
//! runs on the blocking pool.

use tracing::debug;

use crate::core::error::AppError;

/// Extracts the text of every page of an in-memory PDF, concatenated
pub async fn extract_text(bytes: Vec<u8>) -> Result<String, AppError> {
    let size = bytes.len();

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        // pdf-extract panics on some malformed documents
        .map_err(|e| AppError::PdfExtraction(format!("extractor aborted: {}", e)))?
        .map_err(|e| AppError::PdfExtraction(e.to_string()))?;

    debug!("Extracted {} characters from {} byte PDF", text.len(), size);
    Ok(text)
}

/// True if the content type or the leading bytes identify a PDF
pub fn is_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    ct.contains("application/pdf") || head.starts_with(b"%PDF-")
}
