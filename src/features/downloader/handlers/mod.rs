pub mod download_handler;

pub use download_handler::{__path_download_file, download_file};
