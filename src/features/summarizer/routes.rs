use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::summarizer::handlers::summarize_file;
use crate::features::summarizer::services::SummarizerService;

/// Create routes for the summarizer feature
pub fn routes(service: Arc<SummarizerService>) -> Router {
    Router::new()
        .route("/api/Summarizer", get(summarize_file).post(summarize_file))
        .route("/api/ProcessHTTP", get(summarize_file).post(summarize_file))
        .with_state(service)
}
