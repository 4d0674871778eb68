//! Storage module for file management
//!
//! Provides the `BlobStore` abstraction and its Azure Blob Storage
//! implementation.

mod azure_blob_client;
mod blob_store;
mod connection_string;

pub use azure_blob_client::AzureBlobClient;
pub use blob_store::{BlobStore, StoredBlob};
