pub mod application;
pub mod domain;
pub mod http;
pub mod utils;

pub use application::{suggested_filename, DownloadEvent, Downloader};
pub use domain::{Coordinate, DownloadError, DownloadState, SelectionError, SelectionModel};
pub use http::{HttpClient, HttpError};
