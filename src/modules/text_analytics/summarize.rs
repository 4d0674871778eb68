use async_trait::async_trait;
use thiserror::Error;

/// Failure of a summarization call
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// The service answered with an error status or a failed job
    #[error("Azure API error {status} ({code}): {message}")]
    RequestFailed {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Request to text analytics failed: {0}")]
    Transport(String),

    #[error("Unexpected text analytics response: {0}")]
    InvalidResponse(String),

    /// The job ran but rejected the document
    #[error("Document {id} failed ({code}): {message}")]
    Document {
        id: String,
        code: String,
        message: String,
    },

    #[error("Summarization job was cancelled")]
    Cancelled,
}

impl SummarizeError {
    /// Service error code, when the service reported one
    pub fn service_code(&self) -> Option<&str> {
        match self {
            SummarizeError::RequestFailed { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Extractive summarization of plain text
#[async_trait]
pub trait Summarize: Send + Sync {
    /// Summary sentences in the order the service returns them
    async fn summarize(&self, text: &str) -> Result<Vec<String>, SummarizeError>;
}
