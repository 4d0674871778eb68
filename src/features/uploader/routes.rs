use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;

use crate::features::uploader::handlers::upload_file;
use crate::features::uploader::services::UploaderService;

/// Create routes for the uploader feature
pub fn routes(service: Arc<UploaderService>, max_body_size: usize) -> Router {
    Router::new()
        .route("/api/Uploader", get(upload_file).post(upload_file))
        .route("/api/UploaderHTTP", get(upload_file).post(upload_file))
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(service)
}
