use utoipa::{Modify, OpenApi};

use crate::features::downloader::handlers as downloader_handlers;
use crate::features::summarizer::{dtos as summarizer_dtos, handlers as summarizer_handlers};
use crate::features::uploader::handlers as uploader_handlers;
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Uploader
        uploader_handlers::upload_file,
        // Downloader
        downloader_handlers::download_file,
        // Summarizer
        summarizer_handlers::summarize_file,
    ),
    components(
        schemas(
            summarizer_dtos::SummaryResponseDto,
            ApiResponse<String>,
        )
    ),
    tags(
        (name = "uploader", description = "Store request bodies as blobs"),
        (name = "downloader", description = "Read stored blobs back"),
        (name = "summarizer", description = "Extractive summaries of stored PDFs"),
    ),
    info(
        title = "Translate Summarize API",
        version = "0.1.0",
        description = "Blob upload, download and PDF summarization",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_endpoint() {
        let doc = ApiDoc::openapi();

        for path in ["/api/Uploader", "/api/Downloader", "/api/Summarizer"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_swagger_info_modifier_overrides_info() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Docs".to_string(),
            version: "9.9.9".to_string(),
            description: "Custom".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Docs");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("Custom"));
    }
}
