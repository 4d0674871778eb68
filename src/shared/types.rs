use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::validation::validate_blob_name;

/// Envelope used for every error body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            errors,
        }
    }
}

/// `?fileName=` query shared by the download and summarize endpoints
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FileNameQuery {
    /// Name of the blob in the container
    #[serde(default)]
    #[validate(custom(function = "validate_blob_name"))]
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_query_rejects_blank_names() {
        for name in ["", "   ", "\t"] {
            let query = FileNameQuery {
                file_name: name.to_string(),
            };
            assert!(query.validate().is_err(), "{:?} should be rejected", name);
        }

        let query = FileNameQuery {
            file_name: "report.pdf".to_string(),
        };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_file_name_query_rejects_relative_segments() {
        let query = FileNameQuery {
            file_name: "../other-container/evil.pdf".to_string(),
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_file_name_query_uses_camel_case() {
        let query: FileNameQuery = serde_json::from_str(r#"{"fileName": "a.pdf"}"#).unwrap();
        assert_eq!(query.file_name, "a.pdf");

        let query: FileNameQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.file_name, "");
    }
}
