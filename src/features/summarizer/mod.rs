//! Extractive summaries of stored PDF documents.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET, POST | `/api/Summarizer` | Summarize the PDF named by `fileName` |
//! | GET, POST | `/api/ProcessHTTP` | Legacy alias of `/api/Summarizer` |
//!
//! Analytics failures are reported inside the `Summary` field unless strict
//! error handling is enabled, in which case they become `502` responses.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::SummarizerService;
