//! Azure Storage connection string parsing
//!
//! Supports account key strings, SAS strings and the Azurite shortcut
//! `UseDevelopmentStorage=true`.

use base64::prelude::*;

use crate::core::error::AppError;

/// Well-known Azurite account
const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

/// How requests to the account are authorized
#[derive(Clone)]
pub enum StorageCredentials {
    /// Shared Key auth with the decoded account key
    SharedKey { key: Vec<u8> },
    /// SAS token appended to every request URL (no leading `?`)
    Sas { token: String },
}

/// Storage account resolved from a connection string
#[derive(Clone)]
pub struct StorageAccount {
    pub account_name: String,
    /// Blob service endpoint without trailing slash
    pub blob_endpoint: String,
    pub credentials: StorageCredentials,
}

impl std::fmt::Debug for StorageAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let auth = match self.credentials {
            StorageCredentials::SharedKey { .. } => "SharedKey",
            StorageCredentials::Sas { .. } => "Sas",
        };
        f.debug_struct("StorageAccount")
            .field("account_name", &self.account_name)
            .field("blob_endpoint", &self.blob_endpoint)
            .field("credentials", &auth)
            .finish()
    }
}

impl StorageAccount {
    pub fn parse(connection_string: &str) -> Result<Self, AppError> {
        let mut protocol = None;
        let mut account_name = None;
        let mut account_key = None;
        let mut endpoint_suffix = None;
        let mut blob_endpoint = None;
        let mut sas = None;
        let mut development = false;

        for part in connection_string.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            // Never echo the segment, it may hold the key
            let (key, value) = part.split_once('=').ok_or_else(|| {
                AppError::Internal("Malformed connection string segment".to_string())
            })?;
            let value = value.trim().to_string();

            match key.trim().to_ascii_lowercase().as_str() {
                "defaultendpointsprotocol" => protocol = Some(value),
                "accountname" => account_name = Some(value),
                "accountkey" => account_key = Some(value),
                "endpointsuffix" => endpoint_suffix = Some(value),
                "blobendpoint" => blob_endpoint = Some(value),
                "sharedaccesssignature" => sas = Some(value),
                "usedevelopmentstorage" => development = value.eq_ignore_ascii_case("true"),
                // Queue/table/file endpoints are irrelevant here
                _ => {}
            }
        }

        if development {
            return Ok(Self {
                account_name: DEV_ACCOUNT_NAME.to_string(),
                blob_endpoint: blob_endpoint
                    .unwrap_or_else(|| DEV_BLOB_ENDPOINT.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                credentials: StorageCredentials::SharedKey {
                    key: decode_key(DEV_ACCOUNT_KEY)?,
                },
            });
        }

        let account_name = account_name
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Internal("Connection string has no AccountName".to_string()))?;

        let credentials = match (account_key, sas) {
            (Some(key), _) => StorageCredentials::SharedKey {
                key: decode_key(&key)?,
            },
            (None, Some(token)) => StorageCredentials::Sas {
                token: token.trim_start_matches('?').to_string(),
            },
            (None, None) => {
                return Err(AppError::Internal(
                    "Connection string has neither AccountKey nor SharedAccessSignature"
                        .to_string(),
                ))
            }
        };

        let blob_endpoint = match blob_endpoint {
            Some(endpoint) => endpoint,
            None => format!(
                "{}://{}.blob.{}",
                protocol.as_deref().unwrap_or("https"),
                account_name,
                endpoint_suffix.as_deref().unwrap_or("core.windows.net")
            ),
        };

        Ok(Self {
            account_name,
            blob_endpoint: blob_endpoint.trim_end_matches('/').to_string(),
            credentials,
        })
    }
}

fn decode_key(key: &str) -> Result<Vec<u8>, AppError> {
    BASE64_STANDARD
        .decode(key)
        .map_err(|e| AppError::Internal(format!("AccountKey is not valid base64: {}", e)))
}
