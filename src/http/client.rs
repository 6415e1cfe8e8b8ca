use futures::Stream;
use futures::TryStreamExt;
use reqwest::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(u16),
}

pub type Result<T> = std::result::Result<T, HttpError>;

#[derive(Clone, Default)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a URL as a chunked byte stream with its content length, so the
    /// caller can report progress while the body arrives.
    pub async fn fetch_stream(
        &self,
        url: &str,
    ) -> Result<(Option<u64>, impl Stream<Item = Result<bytes::Bytes>>)> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status.as_u16()));
        }

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(HttpError::Request);

        Ok((total_size, stream))
    }
}
