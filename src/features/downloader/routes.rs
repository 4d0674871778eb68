use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::downloader::handlers::download_file;
use crate::features::downloader::services::DownloaderService;

/// Create routes for the downloader feature
pub fn routes(service: Arc<DownloaderService>) -> Router {
    Router::new()
        .route("/api/Downloader", get(download_file).post(download_file))
        .with_state(service)
}
