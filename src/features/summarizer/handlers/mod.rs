pub mod summary_handler;

pub use summary_handler::{__path_summarize_file, summarize_file};
