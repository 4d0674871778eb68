pub mod downloader_service;

pub use downloader_service::DownloaderService;
