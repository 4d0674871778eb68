use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::core::extractor::ValidatedQuery;
use crate::features::summarizer::dtos::SummaryResponseDto;
use crate::features::summarizer::services::SummarizerService;
use crate::shared::types::FileNameQuery;

/// Summarize a stored PDF
///
/// Extracts the text of the PDF named by `fileName` and returns its
/// extractive summary. If the analytics service fails, `Summary` holds
/// `Azure API error: {code}` or `Error summarizing text.` instead, unless
/// strict error handling is enabled.
#[utoipa::path(
    method(get, post),
    path = "/api/Summarizer",
    tag = "summarizer",
    params(FileNameQuery),
    responses(
        (status = 200, description = "Summary of the document", body = SummaryResponseDto),
        (status = 400, description = "Missing fileName or no extractable text"),
        (status = 404, description = "Blob not found"),
        (status = 500, description = "Storage or PDF extraction failure"),
        (status = 502, description = "Summarization failed (strict mode only)")
    )
)]
pub async fn summarize_file(
    State(service): State<Arc<SummarizerService>>,
    ValidatedQuery(query): ValidatedQuery<FileNameQuery>,
) -> Result<Json<SummaryResponseDto>, AppError> {
    let summary = service.summarize_file(&query.file_name).await?;
    Ok(Json(summary))
}
