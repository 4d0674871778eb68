use async_trait::async_trait;

use crate::core::error::{AppError, Result};

/// A blob read back from storage
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub name: String,
    pub content: Vec<u8>,
    pub content_type: Option<String>,
}

/// Named byte objects in a single container
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Container every operation targets
    fn container_name(&self) -> &str;

    /// Create the container if it does not exist yet
    async fn ensure_container_exists(&self) -> Result<()>;

    /// Write `data` under `name`, replacing any existing blob
    async fn upload(&self, name: &str, data: Vec<u8>, content_type: &str) -> Result<()>;

    /// Read a blob, `None` when it does not exist
    async fn download(&self, name: &str) -> Result<Option<StoredBlob>>;

    /// Read a blob, failing with `NotFound` when it does not exist
    async fn download_existing(&self, name: &str) -> Result<StoredBlob> {
        self.download(name).await?.ok_or_else(|| {
            AppError::NotFound(format!(
                "Blob '{}' not found in container '{}'.",
                name,
                self.container_name()
            ))
        })
    }
}
