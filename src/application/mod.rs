pub mod downloader;

pub use downloader::{suggested_filename, DownloadEvent, Downloader};
