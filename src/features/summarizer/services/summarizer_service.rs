use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::summarizer::dtos::SummaryResponseDto;
use crate::modules::pdf;
use crate::modules::storage::BlobStore;
use crate::modules::text_analytics::{Summarize, SummarizeError};

/// Summary returned when summarization fails without a service error code
pub const GENERIC_FAILURE_SUMMARY: &str = "Error summarizing text.";

/// Service turning stored PDFs into extractive summaries
pub struct SummarizerService {
    store: Arc<dyn BlobStore>,
    summarizer: Arc<dyn Summarize>,
    strict_errors: bool,
}

impl SummarizerService {
    pub fn new(
        store: Arc<dyn BlobStore>,
        summarizer: Arc<dyn Summarize>,
        strict_errors: bool,
    ) -> Self {
        Self {
            store,
            summarizer,
            strict_errors,
        }
    }

    /// Summarize the PDF stored under `file_name`
    ///
    /// # Errors
    /// * `NotFound` when the blob does not exist
    /// * `BadRequest` when the PDF yields no text
    /// * `PdfExtraction` when the PDF cannot be parsed
    /// * `ExternalServiceError` when summarization fails in strict mode
    pub async fn summarize_file(&self, file_name: &str) -> Result<SummaryResponseDto> {
        let blob = self.store.download_existing(file_name).await?;

        if !pdf::is_pdf(blob.content_type.as_deref(), &blob.content) {
            warn!(
                "Blob {} does not look like a PDF (content type {:?})",
                file_name, blob.content_type
            );
        }

        let text = pdf::extract_text(blob.content).await?;
        if text.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Failed to extract text from the PDF.".to_string(),
            ));
        }

        let summary = self.summarize_text(&text).await?;
        info!("Summarized {} ({} characters of text)", file_name, text.len());

        Ok(SummaryResponseDto {
            file_name: file_name.to_string(),
            summary,
        })
    }

    async fn summarize_text(&self, text: &str) -> Result<String> {
        match self.summarizer.summarize(text).await {
            Ok(sentences) => Ok(sentences
                .iter()
                .map(|sentence| format!("{}\n", sentence))
                .collect()),
            Err(e) if self.strict_errors => Err(AppError::ExternalServiceError(e.to_string())),
            Err(e) => {
                error!("Error during text summarization: {}", e);
                Ok(degraded_summary(&e))
            }
        }
    }
}

/// Inline message standing in for a summary after a failed call
fn degraded_summary(error: &SummarizeError) -> String {
    match error.service_code() {
        Some(code) => format!("Azure API error: {}", code),
        None => GENERIC_FAILURE_SUMMARY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{build_pdf, InMemoryBlobStore, StubOutcome, StubSummarizer};

    fn service(
        store: InMemoryBlobStore,
        summarizer: Arc<StubSummarizer>,
        strict_errors: bool,
    ) -> SummarizerService {
        SummarizerService::new(Arc::new(store), summarizer, strict_errors)
    }

    fn store_with_report() -> InMemoryBlobStore {
        InMemoryBlobStore::new().with_blob(
            "report.pdf",
            build_pdf(&["Revenue grew in every region."]),
            "application/pdf",
        )
    }

    #[test]
    fn test_degraded_summary() {
        let failed = SummarizeError::RequestFailed {
            status: 401,
            code: "401".to_string(),
            message: "Access denied".to_string(),
        };
        assert_eq!(degraded_summary(&failed), "Azure API error: 401");

        for error in [
            SummarizeError::Transport("timeout".to_string()),
            SummarizeError::InvalidResponse("no tasks".to_string()),
            SummarizeError::Cancelled,
            SummarizeError::Document {
                id: "1".to_string(),
                code: "InvalidDocument".to_string(),
                message: "Document text is empty.".to_string(),
            },
        ] {
            assert_eq!(degraded_summary(&error), GENERIC_FAILURE_SUMMARY);
        }
    }

    #[tokio::test]
    async fn test_summary_sentences_end_with_newline() {
        let stub = Arc::new(StubSummarizer::new(StubOutcome::Sentences(vec![
            "Revenue grew.",
            "Costs fell.",
        ])));
        let service = service(store_with_report(), stub.clone(), false);

        let dto = service.summarize_file("report.pdf").await.unwrap();

        assert_eq!(dto.file_name, "report.pdf");
        assert_eq!(dto.summary, "Revenue grew.\nCosts fell.\n");
        assert!(stub
            .last_text()
            .unwrap()
            .contains("Revenue grew in every region."));
    }

    #[tokio::test]
    async fn test_no_sentences_gives_empty_summary() {
        let stub = Arc::new(StubSummarizer::new(StubOutcome::Sentences(vec![])));
        let service = service(store_with_report(), stub, false);

        let dto = service.summarize_file("report.pdf").await.unwrap();

        assert_eq!(dto.summary, "");
    }

    #[tokio::test]
    async fn test_strict_mode_surfaces_failures() {
        let stub = Arc::new(StubSummarizer::new(StubOutcome::ServiceError("429")));
        let service = service(store_with_report(), stub, true);

        let err = service.summarize_file("report.pdf").await.unwrap_err();

        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_extraction_error() {
        let stub = Arc::new(StubSummarizer::new(StubOutcome::Sentences(vec!["x"])));
        let store = InMemoryBlobStore::new().with_blob(
            "broken.pdf",
            b"not a pdf at all".to_vec(),
            "application/pdf",
        );
        let service = service(store, stub.clone(), false);

        let err = service.summarize_file("broken.pdf").await.unwrap_err();

        assert!(matches!(err, AppError::PdfExtraction(_)));
        assert_eq!(stub.calls(), 0);
    }
}
