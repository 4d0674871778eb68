use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::uploader::services::UploaderService;

/// Header carrying the requested blob name
pub const FILE_NAME_HEADER: &str = "file-name";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Upload a file
///
/// Stores the raw request body as a blob. The name is taken from the
/// `file-name` header; without it a unique `uploaded-file-{uuid}` name is
/// generated. An existing blob with the same name is overwritten.
#[utoipa::path(
    method(get, post),
    path = "/api/Uploader",
    tag = "uploader",
    params(
        ("file-name" = Option<String>, Header, description = "Blob name to store the body under")
    ),
    request_body(
        content = String,
        content_type = "application/octet-stream",
        description = "Raw file content",
    ),
    responses(
        (status = 200, description = "File stored", body = String, content_type = "text/plain"),
        (status = 400, description = "file-name is not UTF-8 or has '.'/'..' segments"),
        (status = 413, description = "Body larger than the configured limit"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn upload_file(
    State(service): State<Arc<UploaderService>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<String, AppError> {
    let requested = headers
        .get(FILE_NAME_HEADER)
        .map(|value| {
            std::str::from_utf8(value.as_bytes()).map_err(|_| {
                AppError::BadRequest("The file-name header must be valid UTF-8".to_string())
            })
        })
        .transpose()?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    let name = service
        .upload(requested, body.to_vec(), content_type)
        .await?;

    Ok(format!("File {} uploaded successfully.", name))
}
