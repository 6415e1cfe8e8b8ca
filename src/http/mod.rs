pub mod client;

pub use client::{HttpClient, HttpError, Result};
