//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for blob storage, text analytics and PDF
//! text extraction.

pub mod pdf;
pub mod storage;
pub mod text_analytics;
