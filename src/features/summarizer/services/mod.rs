pub mod summarizer_service;

pub use summarizer_service::SummarizerService;
