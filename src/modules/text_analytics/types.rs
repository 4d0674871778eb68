//! Wire types of the Azure AI Language `analyze-text/jobs` API

use serde::{Deserialize, Serialize};

// =============================================================================
// SUBMISSION
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTextJobRequest<'a> {
    pub display_name: &'a str,
    pub analysis_input: AnalysisInput<'a>,
    pub tasks: Vec<SummarizationTask<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisInput<'a> {
    pub documents: Vec<InputDocument<'a>>,
}

#[derive(Debug, Serialize)]
pub struct InputDocument<'a> {
    pub id: &'a str,
    pub language: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizationTask<'a> {
    pub kind: &'a str,
    pub task_name: &'a str,
    pub parameters: SummarizationParameters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizationParameters {
    pub sentence_count: u32,
    pub sort_by: &'static str,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Body of a non-2xx response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ServiceError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceError {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// JOB STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobStatus {
    NotStarted,
    Running,
    Cancelling,
    Succeeded,
    PartiallyCompleted,
    PartiallySucceeded,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn is_in_progress(self) -> bool {
        matches!(
            self,
            JobStatus::NotStarted | JobStatus::Running | JobStatus::Cancelling
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct JobState {
    pub status: JobStatus,
    #[serde(default)]
    pub errors: Vec<ServiceError>,
    #[serde(default)]
    pub tasks: Option<JobTasks>,
}

#[derive(Debug, Deserialize)]
pub struct JobTasks {
    #[serde(default)]
    pub items: Vec<TaskResult>,
}

#[derive(Debug, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub results: Option<SummarizationResults>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizationResults {
    #[serde(default)]
    pub documents: Vec<SummarizedDocument>,
    #[serde(default)]
    pub errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizedDocument {
    pub id: String,
    #[serde(default)]
    pub sentences: Vec<SummarySentence>,
}

#[derive(Debug, Deserialize)]
pub struct SummarySentence {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct DocumentError {
    pub id: String,
    pub error: ServiceError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_in_service_shape() {
        let request = AnalyzeTextJobRequest {
            display_name: "Document summarization",
            analysis_input: AnalysisInput {
                documents: vec![InputDocument {
                    id: "1",
                    language: "en",
                    text: "Hello.",
                }],
            },
            tasks: vec![SummarizationTask {
                kind: "ExtractiveSummarization",
                task_name: "summarize",
                parameters: SummarizationParameters {
                    sentence_count: 3,
                    sort_by: "Offset",
                },
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["displayName"], "Document summarization");
        assert_eq!(json["analysisInput"]["documents"][0]["text"], "Hello.");
        assert_eq!(json["tasks"][0]["kind"], "ExtractiveSummarization");
        assert_eq!(json["tasks"][0]["parameters"]["sentenceCount"], 3);
        assert_eq!(json["tasks"][0]["parameters"]["sortBy"], "Offset");
    }

    #[test]
    fn test_job_state_parses_results() {
        let state: JobState = serde_json::from_str(
            r#"{
                "jobId": "abc",
                "status": "succeeded",
                "errors": [],
                "tasks": {
                    "completed": 1, "failed": 0, "inProgress": 0, "total": 1,
                    "items": [{
                        "kind": "ExtractiveSummarizationLROResults",
                        "status": "succeeded",
                        "results": {
                            "documents": [{
                                "id": "1",
                                "sentences": [
                                    {"text": "First.", "rankScore": 1.0, "offset": 0, "length": 6},
                                    {"text": "Second.", "rankScore": 0.5, "offset": 7, "length": 7}
                                ],
                                "warnings": []
                            }],
                            "errors": [],
                            "modelVersion": "2023-02-01"
                        }
                    }]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(state.status, JobStatus::Succeeded);
        let items = state.tasks.unwrap().items;
        let docs = &items[0].results.as_ref().unwrap().documents;
        assert_eq!(docs[0].sentences[1].text, "Second.");
    }

    #[test]
    fn test_unknown_status_does_not_fail_parsing() {
        let state: JobState = serde_json::from_str(r#"{"status": "somethingNew"}"#).unwrap();

        assert_eq!(state.status, JobStatus::Unknown);
        assert!(!state.status.is_in_progress());
    }
}
