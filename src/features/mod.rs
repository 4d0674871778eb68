pub mod downloader;
pub mod summarizer;
pub mod uploader;
