//! Azure Blob Storage client
//!
//! Talks to the Blob service REST API directly with reqwest and signs
//! requests with Shared Key authorization (or appends a SAS token).

use async_trait::async_trait;
use base64::prelude::*;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{header::CONTENT_TYPE, Client, Method, Response, StatusCode, Url};
use sha2::Sha256;
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};
use crate::modules::storage::blob_store::{BlobStore, StoredBlob};
use crate::modules::storage::connection_string::{StorageAccount, StorageCredentials};

type HmacSha256 = Hmac<Sha256>;

/// REST API version sent as `x-ms-version`
const API_VERSION: &str = "2023-11-03";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Azure Blob Storage client bound to one container
pub struct AzureBlobClient {
    account: StorageAccount,
    container: String,
    http_client: Client,
}

impl AzureBlobClient {
    /// Create a new client from configuration
    ///
    /// Fails when the connection string cannot be parsed, so a bad
    /// configuration is caught at startup.
    pub fn new(config: StorageConfig) -> Result<Self> {
        let account = StorageAccount::parse(&config.connection_string)?;

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Azure Blob client initialized for endpoint: {}, container: {}",
            account.blob_endpoint, config.container
        );

        Ok(Self {
            account,
            container: config.container,
            http_client,
        })
    }

    /// Build the URL of a blob, percent-encoding each path segment
    fn blob_url(&self, name: &str) -> Result<Url> {
        let encoded = name
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        let container_path = format!("{}/", self.container_url()?.path());
        let url = format!("{}/{}/{}", self.account.blob_endpoint, self.container, encoded);
        let url = Url::parse(&url)
            .map_err(|e| AppError::Internal(format!("Invalid blob URL '{}': {}", url, e)))?;

        // Dot segments are resolved while parsing
        if !url.path().starts_with(&container_path) || url.path().len() == container_path.len() {
            return Err(AppError::BadRequest(format!(
                "Blob name '{}' does not resolve inside container '{}'",
                name, self.container
            )));
        }

        Ok(url)
    }

    fn container_url(&self) -> Result<Url> {
        let url = format!(
            "{}/{}?restype=container",
            self.account.blob_endpoint, self.container
        );
        Url::parse(&url)
            .map_err(|e| AppError::Internal(format!("Invalid container URL '{}': {}", url, e)))
    }

    /// Current time in the RFC 1123 format expected by `x-ms-date`
    fn rfc1123_now() -> String {
        Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }

    /// Send a signed request to the Blob service
    async fn send(
        &self,
        method: Method,
        mut url: Url,
        body: Option<(Vec<u8>, &str)>,
        ms_headers: &[(&str, &str)],
    ) -> Result<Response> {
        let date = Self::rfc1123_now();

        let mut signed_headers: Vec<(&str, &str)> =
            vec![("x-ms-date", date.as_str()), ("x-ms-version", API_VERSION)];
        signed_headers.extend_from_slice(ms_headers);
        signed_headers.sort_by(|a, b| a.0.cmp(b.0));

        let (content_length, content_type) = body
            .as_ref()
            .map(|(data, ct)| (data.len(), *ct))
            .unwrap_or((0, ""));

        let authorization = match &self.account.credentials {
            StorageCredentials::SharedKey { key } => {
                let resource = canonicalized_resource(&self.account.account_name, &url);
                let to_sign = string_to_sign(
                    method.as_str(),
                    content_length,
                    content_type,
                    &signed_headers,
                    &resource,
                );
                Some(format!(
                    "SharedKey {}:{}",
                    self.account.account_name,
                    sign(key, &to_sign)?
                ))
            }
            StorageCredentials::Sas { token } => {
                let query = match url.query() {
                    Some(q) if !q.is_empty() => format!("{}&{}", q, token),
                    _ => token.clone(),
                };
                url.set_query(Some(&query));
                None
            }
        };

        let mut request = self.http_client.request(method, url);
        for (name, value) in &signed_headers {
            request = request.header(*name, *value);
        }
        if let Some(auth) = authorization {
            request = request.header("Authorization", auth);
        }
        if let Some((data, ct)) = body {
            request = request.header(CONTENT_TYPE, ct).body(data);
        }

        request
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Blob service request failed: {}", e)))
    }

    async fn error_from(context: &str, response: Response) -> AppError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        AppError::Storage(format!("Failed to {}: {} - {}", context, status, body))
    }
}

#[async_trait]
impl BlobStore for AzureBlobClient {
    fn container_name(&self) -> &str {
        &self.container
    }

    /// Ensure the container exists, create if not
    async fn ensure_container_exists(&self) -> Result<()> {
        let response = self
            .send(Method::PUT, self.container_url()?, None, &[])
            .await?;

        match response.status() {
            status if status.is_success() => {
                info!("Container '{}' created successfully", self.container);
                Ok(())
            }
            StatusCode::CONFLICT => {
                debug!("Container '{}' already exists", self.container);
                Ok(())
            }
            status => {
                // Credentials scoped to a single container (SAS) cannot create it
                let body = response.text().await.unwrap_or_default();
                warn!(
                    "Could not create container '{}': {} - {}. Assuming it exists.",
                    self.container, status, body
                );
                Ok(())
            }
        }
    }

    async fn upload(&self, name: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        let size = data.len();
        let response = self
            .send(
                Method::PUT,
                self.blob_url(name)?,
                Some((data, content_type)),
                &[("x-ms-blob-type", "BlockBlob")],
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(&format!("upload blob '{}'", name), response).await);
        }

        debug!(
            "Uploaded blob '{}' ({} bytes) to container '{}'",
            name, size, self.container
        );
        Ok(())
    }

    async fn download(&self, name: &str) -> Result<Option<StoredBlob>> {
        let response = self
            .send(Method::GET, self.blob_url(name)?, None, &[])
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Blob '{}' not found in container '{}'", name, self.container);
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_from(&format!("download blob '{}'", name), response).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let content = response
            .bytes()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to read blob '{}': {}", name, e)))?;

        debug!(
            "Downloaded blob '{}' ({} bytes) from container '{}'",
            name,
            content.len(),
            self.container
        );

        Ok(Some(StoredBlob {
            name: name.to_string(),
            content: content.to_vec(),
            content_type: content_type.or_else(|| Some(DEFAULT_CONTENT_TYPE.to_string())),
        }))
    }
}

/// `/{account}{encoded path}` followed by sorted, decoded query parameters
fn canonicalized_resource(account: &str, url: &Url) -> String {
    let mut resource = format!("/{}{}", account, url.path());

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.to_lowercase(), v.into_owned()))
        .collect();
    params.sort();
    for (key, value) in params {
        resource.push_str(&format!("\n{}:{}", key, value));
    }

    resource
}

/// Shared Key string-to-sign; `ms_headers` must already be sorted
fn string_to_sign(
    method: &str,
    content_length: usize,
    content_type: &str,
    ms_headers: &[(&str, &str)],
    canonicalized_resource: &str,
) -> String {
    // Zero length is signed as an empty string
    let content_length = if content_length == 0 {
        String::new()
    } else {
        content_length.to_string()
    };

    let canonicalized_headers: String = ms_headers
        .iter()
        .map(|(k, v)| format!("{}:{}\n", k.to_lowercase(), v.trim()))
        .collect();

    // VERB, Content-Encoding, Content-Language, Content-Length, Content-MD5,
    // Content-Type, Date, If-Modified-Since, If-Match, If-None-Match,
    // If-Unmodified-Since, Range
    format!(
        "{}\n\n\n{}\n\n{}\n\n\n\n\n\n\n{}{}",
        method, content_length, content_type, canonicalized_headers, canonicalized_resource
    )
}

/// HMAC-SHA256 signature, base64 encoded
fn sign(key: &[u8], string_to_sign: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(string_to_sign.as_bytes());
    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}
