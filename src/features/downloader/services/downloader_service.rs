use std::sync::Arc;
use tracing::debug;

use crate::core::error::Result;
use crate::modules::storage::{BlobStore, StoredBlob};

/// Service reading blobs for download
pub struct DownloaderService {
    store: Arc<dyn BlobStore>,
}

impl DownloaderService {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Fetch a blob, `NotFound` when the container has no such name
    pub async fn download(&self, name: &str) -> Result<StoredBlob> {
        let blob = self.store.download_existing(name).await?;
        debug!("Serving blob {} ({} bytes)", name, blob.content.len());
        Ok(blob)
    }
}
