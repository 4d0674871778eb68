pub mod uploader_service;

pub use uploader_service::UploaderService;
