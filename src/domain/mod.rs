pub mod error;
pub mod model;
pub mod selection;

pub use error::{DownloadError, SelectionError};
pub use model::DownloadState;
pub use selection::{Coordinate, SelectionModel};
