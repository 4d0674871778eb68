use serde::Serialize;
use utoipa::ToSchema;

/// Summary of one stored document
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct SummaryResponseDto {
    /// Blob the summary was computed from
    pub file_name: String,
    /// Summary sentences, each terminated by a newline, or a short error
    /// message when the analytics call failed
    pub summary: String,
}
