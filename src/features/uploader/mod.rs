//! Raw body uploads into the blob container.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET, POST | `/api/Uploader` | Store the request body as a blob |
//! | GET, POST | `/api/UploaderHTTP` | Legacy alias of `/api/Uploader` |
//!
//! The blob name comes from the `file-name` header, or is generated when the
//! header is missing.

pub mod handlers;
pub mod routes;
pub mod services;

pub use services::UploaderService;
