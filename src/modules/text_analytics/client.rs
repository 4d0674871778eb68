use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::TextAnalyticsConfig;
use crate::core::error::AppError;
use crate::modules::text_analytics::summarize::{Summarize, SummarizeError};
use crate::modules::text_analytics::types::{
    AnalysisInput, AnalyzeTextJobRequest, ErrorResponse, InputDocument, JobState, JobStatus,
    SummarizationParameters, SummarizationTask,
};

const API_VERSION: &str = "2023-04-01";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_LOCATION_HEADER: &str = "operation-location";
const DOCUMENT_ID: &str = "1";

/// Client for extractive summarization jobs
pub struct TextAnalyticsClient {
    client: Client,
    endpoint: String,
    api_key: String,
    language: String,
    sentence_count: u32,
    poll_interval: Duration,
}

impl TextAnalyticsClient {
    pub fn new(config: TextAnalyticsConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(concat!("translate-summarize/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Text analytics client initialized for endpoint: {} (language: {}, sentences: {})",
            config.endpoint, config.language, config.sentence_count
        );

        Ok(Self {
            client,
            endpoint: config.endpoint,
            api_key: config.api_key,
            language: config.language,
            sentence_count: config.sentence_count,
            poll_interval: config.poll_interval,
        })
    }

    fn jobs_url(&self) -> String {
        format!(
            "{}/language/analyze-text/jobs?api-version={}",
            self.endpoint, API_VERSION
        )
    }

    /// Submit the job and return its operation location
    async fn start_job(&self, text: &str) -> Result<String, SummarizeError> {
        let request = AnalyzeTextJobRequest {
            display_name: "Document summarization",
            analysis_input: AnalysisInput {
                documents: vec![InputDocument {
                    id: DOCUMENT_ID,
                    language: &self.language,
                    text,
                }],
            },
            tasks: vec![SummarizationTask {
                kind: "ExtractiveSummarization",
                task_name: "Extractive summarization",
                parameters: SummarizationParameters {
                    sentence_count: self.sentence_count,
                    sort_by: "Offset",
                },
            }],
        };

        let response = self
            .client
            .post(self.jobs_url())
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizeError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(request_failed(response).await);
        }

        response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                SummarizeError::InvalidResponse("missing operation-location header".to_string())
            })
    }

    /// Poll the job until it leaves the in-progress states
    async fn wait_for_completion(&self, operation_location: &str) -> Result<JobState, SummarizeError> {
        loop {
            let response = self
                .client
                .get(operation_location)
                .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
                .send()
                .await
                .map_err(|e| SummarizeError::Transport(e.to_string()))?;

            if !response.status().is_success() {
                return Err(request_failed(response).await);
            }

            let delay = retry_after(&response).unwrap_or(self.poll_interval);

            let state: JobState = response
                .json()
                .await
                .map_err(|e| SummarizeError::InvalidResponse(e.to_string()))?;

            if !state.status.is_in_progress() {
                return Ok(state);
            }

            debug!("Summarization job {:?}, polling again in {:?}", state.status, delay);
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Summarize for TextAnalyticsClient {
    async fn summarize(&self, text: &str) -> Result<Vec<String>, SummarizeError> {
        let operation_location = self.start_job(text).await?;
        debug!("Summarization job started: {}", operation_location);

        let state = self.wait_for_completion(&operation_location).await?;
        let sentences = collect_sentences(state)?;

        info!("Summarization job returned {} sentences", sentences.len());
        Ok(sentences)
    }
}

/// Flatten a finished job into its sentences, in returned order
fn collect_sentences(state: JobState) -> Result<Vec<String>, SummarizeError> {
    match state.status {
        JobStatus::Succeeded | JobStatus::PartiallyCompleted | JobStatus::PartiallySucceeded => {}
        JobStatus::Failed => {
            let error = state.errors.into_iter().next();
            return Err(SummarizeError::RequestFailed {
                status: StatusCode::OK.as_u16(),
                code: error
                    .as_ref()
                    .map(|e| e.code.clone())
                    .unwrap_or_else(|| "JobFailed".to_string()),
                message: error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "Summarization job failed".to_string()),
            });
        }
        JobStatus::Cancelled => return Err(SummarizeError::Cancelled),
        other => {
            return Err(SummarizeError::InvalidResponse(format!(
                "unexpected job status {:?}",
                other
            )))
        }
    }

    let mut sentences = Vec::new();
    for task in state.tasks.map(|t| t.items).unwrap_or_default() {
        let Some(results) = task.results else {
            continue;
        };

        if let Some(failed) = results.errors.into_iter().next() {
            return Err(SummarizeError::Document {
                id: failed.id,
                code: failed.error.code,
                message: failed.error.message,
            });
        }

        for document in results.documents {
            debug!(
                "Document {} summarized into {} sentences",
                document.id,
                document.sentences.len()
            );
            sentences.extend(document.sentences.into_iter().map(|s| s.text));
        }
    }

    Ok(sentences)
}

async fn request_failed(response: Response) -> SummarizeError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => SummarizeError::RequestFailed {
            status: status.as_u16(),
            code: parsed.error.code,
            message: parsed.error.message,
        },
        Err(_) => SummarizeError::RequestFailed {
            status: status.as_u16(),
            code: status
                .canonical_reason()
                .unwrap_or("Unknown")
                .replace(' ', ""),
            message: body,
        },
    }
}

/// `Retry-After` in seconds, if the service sent one
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
