use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::core::extractor::ValidatedQuery;
use crate::features::downloader::services::DownloaderService;
use crate::shared::types::FileNameQuery;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Download a file
///
/// Returns the stored bytes unchanged.
#[utoipa::path(
    method(get, post),
    path = "/api/Downloader",
    tag = "downloader",
    params(FileNameQuery),
    responses(
        (status = 200, description = "Blob content", body = String, content_type = "application/octet-stream"),
        (status = 400, description = "Missing or blank fileName"),
        (status = 404, description = "Blob not found"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn download_file(
    State(service): State<Arc<DownloaderService>>,
    ValidatedQuery(query): ValidatedQuery<FileNameQuery>,
) -> Result<Response, AppError> {
    let blob = service.download(&query.file_name).await?;

    let content_type = blob
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, attachment(&blob.name)),
        ],
        blob.content,
    )
        .into_response())
}

/// `attachment` disposition naming the last path segment of the blob
///
/// Characters that cannot appear in a quoted ASCII filename become `_`.
fn attachment(name: &str) -> HeaderValue {
    let file_name: String = name
        .rsplit('/')
        .next()
        .unwrap_or(name)
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
