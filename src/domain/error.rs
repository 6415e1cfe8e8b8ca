use thiserror::Error;

use crate::http::HttpError;

/// Raised by range selection when the item-count callback cannot answer for
/// a group inside the walked range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("item count unavailable for group {group}")]
    InvalidGroup { group: usize },
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
