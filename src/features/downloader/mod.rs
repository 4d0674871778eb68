//! Serves stored blobs back as raw bytes.

pub mod handlers;
pub mod routes;
pub mod services;

pub use services::DownloaderService;
