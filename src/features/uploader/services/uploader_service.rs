use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::modules::storage::BlobStore;
use crate::shared::validation::validate_blob_name;

/// Prefix of names generated for uploads without a `file-name` header
pub const GENERATED_NAME_PREFIX: &str = "uploaded-file-";

/// Service writing uploaded bodies to blob storage
pub struct UploaderService {
    store: Arc<dyn BlobStore>,
}

impl UploaderService {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Pick the blob name for an upload
    ///
    /// A present, non-blank name is used exactly as given. Anything else
    /// gets a fresh `uploaded-file-{uuid}` name.
    pub fn resolve_blob_name(requested: Option<&str>) -> String {
        match requested {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("{}{}", GENERATED_NAME_PREFIX, Uuid::new_v4()),
        }
    }

    /// Store `data`, replacing any blob with the same name
    ///
    /// # Returns
    /// The name the blob was stored under
    ///
    /// # Errors
    /// `BadRequest` when the requested name has `.` or `..` segments
    pub async fn upload(
        &self,
        requested: Option<&str>,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let name = Self::resolve_blob_name(requested);
        validate_blob_name(&name).map_err(|e| {
            AppError::BadRequest(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid blob name".to_string()),
            )
        })?;
        let size = data.len();

        self.store.upload(&name, data, content_type).await?;

        info!(
            "File {} uploaded successfully ({} bytes, container {})",
            name,
            size,
            self.store.container_name()
        );

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::InMemoryBlobStore;

    #[test]
    fn test_resolve_blob_name_keeps_given_name() {
        assert_eq!(
            UploaderService::resolve_blob_name(Some("report.pdf")),
            "report.pdf"
        );
        // Used as-is, surrounding spaces included
        assert_eq!(
            UploaderService::resolve_blob_name(Some(" notes.txt")),
            " notes.txt"
        );
    }

    #[test]
    fn test_resolve_blob_name_generates_unique_names() {
        for requested in [None, Some(""), Some("   ")] {
            let name = UploaderService::resolve_blob_name(requested);
            let suffix = name
                .strip_prefix(GENERATED_NAME_PREFIX)
                .unwrap_or_else(|| panic!("unexpected name {}", name));
            assert!(Uuid::parse_str(suffix).is_ok(), "not a uuid: {}", suffix);
        }

        assert_ne!(
            UploaderService::resolve_blob_name(None),
            UploaderService::resolve_blob_name(None)
        );
    }

    #[tokio::test]
    async fn test_upload_overwrites_existing_blob() {
        let store = Arc::new(InMemoryBlobStore::new().with_blob(
            "report.pdf",
            b"old".to_vec(),
            "application/pdf",
        ));
        let service = UploaderService::new(store.clone());

        let name = service
            .upload(Some("report.pdf"), b"new".to_vec(), "application/pdf")
            .await
            .unwrap();

        assert_eq!(name, "report.pdf");
        assert_eq!(store.get("report.pdf").unwrap(), b"new");
        assert_eq!(store.names().len(), 1);
    }

    #[tokio::test]
    async fn test_upload_rejects_names_leaving_the_container() {
        let store = Arc::new(InMemoryBlobStore::new());
        let service = UploaderService::new(store.clone());

        for requested in ["../other-container/evil.pdf", "a/../b.pdf", ".."] {
            let err = service
                .upload(Some(requested), b"data".to_vec(), "application/pdf")
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{:?}", requested);
        }

        assert!(store.names().is_empty());
    }

    #[tokio::test]
    async fn test_upload_propagates_storage_failure() {
        let service = UploaderService::new(Arc::new(InMemoryBlobStore::failing()));

        let err = service
            .upload(Some("report.pdf"), b"data".to_vec(), "application/pdf")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
    }
}
