//! Text analytics module
//!
//! Extractive summarization through the Azure AI Language
//! long-running `analyze-text` jobs API.

mod client;
mod summarize;
mod types;

pub use client::TextAnalyticsClient;
pub use summarize::{Summarize, SummarizeError};
