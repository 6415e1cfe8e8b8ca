use std::path::PathBuf;

use bytes::Bytes;
use futures::{stream::BoxStream, StreamExt};
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::{
    domain::{DownloadError, DownloadState},
    http::HttpClient,
    utils::sanitize_filename,
};

#[derive(Debug)]
pub enum DownloadEvent {
    /// Fraction of the body written so far, 0.0 when the length is unknown.
    Progress(f32),
    Completed(PathBuf),
    Failed(DownloadError),
}

impl DownloadEvent {
    pub fn state(&self) -> DownloadState {
        match self {
            DownloadEvent::Progress(_) => DownloadState::Downloading,
            DownloadEvent::Completed(_) => DownloadState::Finished,
            DownloadEvent::Failed(_) => DownloadState::Failed,
        }
    }
}

/// Derive a save-file name from the URL's last path segment, falling back
/// when the path has none (e.g. a bare origin).
pub fn suggested_filename(url: &str, fallback: &str) -> String {
    let name = Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string());

    sanitize_filename(&name)
}

#[derive(Clone, Default)]
pub struct Downloader {
    http_client: HttpClient,
}

impl Downloader {
    pub fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Stream a URL to disk, emitting one event per chunk and a terminal
    /// `Completed` or `Failed`. The stream ends after the terminal event.
    pub fn download_stream(&self, url: String, path: PathBuf) -> BoxStream<'static, DownloadEvent> {
        let client = self.http_client.clone();
        futures::stream::unfold(Transfer::Pending { url, path }, move |phase| {
            let client = client.clone();
            async move {
                match phase {
                    Transfer::Pending { url, path } => {
                        match ActiveTransfer::open(&client, &url, path).await {
                            Ok(active) => {
                                Some((DownloadEvent::Progress(0.0), Transfer::Active(active)))
                            }
                            Err(e) => Some((DownloadEvent::Failed(e), Transfer::Done)),
                        }
                    }
                    Transfer::Active(mut active) => match active.step().await {
                        Ok(Some(progress)) => {
                            Some((DownloadEvent::Progress(progress), Transfer::Active(active)))
                        }
                        Ok(None) => {
                            Some((DownloadEvent::Completed(active.into_path()), Transfer::Done))
                        }
                        Err(e) => Some((DownloadEvent::Failed(e), Transfer::Done)),
                    },
                    Transfer::Done => None,
                }
            }
        })
        .boxed()
    }
}

enum Transfer {
    Pending { url: String, path: PathBuf },
    Active(ActiveTransfer),
    Done,
}

/// An in-flight transfer: the destination file plus the response body being
/// drained into it.
struct ActiveTransfer {
    file: tokio::fs::File,
    chunks: BoxStream<'static, crate::http::Result<Bytes>>,
    written: u64,
    total: Option<u64>,
    path: PathBuf,
}

impl ActiveTransfer {
    async fn open(
        client: &HttpClient,
        url: &str,
        path: PathBuf,
    ) -> Result<Self, DownloadError> {
        let file = tokio::fs::File::create(&path).await?;
        let (total, chunks) = client.fetch_stream(url).await?;

        Ok(Self {
            file,
            chunks: chunks.boxed(),
            written: 0,
            total,
            path,
        })
    }

    /// Write the next chunk and report the new progress fraction, or `None`
    /// once the body is exhausted and flushed to disk.
    async fn step(&mut self) -> Result<Option<f32>, DownloadError> {
        match self.chunks.next().await {
            Some(chunk) => {
                let chunk = chunk?;
                self.file.write_all(&chunk).await?;
                self.written += chunk.len() as u64;
                Ok(Some(self.progress()))
            }
            None => {
                self.file.sync_all().await?;
                Ok(None)
            }
        }
    }

    fn progress(&self) -> f32 {
        match self.total {
            Some(total) if total > 0 => self.written as f32 / total as f32,
            _ => 0.0,
        }
    }

    fn into_path(self) -> PathBuf {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpError;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("linkgrab-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn download_stream_writes_file_and_completes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/a.bin")
            .with_body(b"0123456789")
            .create_async()
            .await;

        let downloader = Downloader::new(HttpClient::new());
        let path = temp_path("a.bin");
        let events: Vec<DownloadEvent> = downloader
            .download_stream(format!("{}/a.bin", server.url()), path.clone())
            .collect()
            .await;

        assert!(matches!(events.first(), Some(DownloadEvent::Progress(p)) if *p == 0.0));
        assert!(
            matches!(events.last(), Some(DownloadEvent::Completed(done)) if *done == path)
        );
        assert_eq!(events.last().unwrap().state(), DownloadState::Finished);

        let written = tokio::fs::read(&path).await.unwrap();
        assert_eq!(written, b"0123456789");
        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn download_stream_reports_http_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/gone")
            .with_status(404)
            .create_async()
            .await;

        let downloader = Downloader::new(HttpClient::new());
        let path = temp_path("gone.bin");
        let events: Vec<DownloadEvent> = downloader
            .download_stream(format!("{}/gone", server.url()), path.clone())
            .collect()
            .await;

        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            DownloadEvent::Failed(DownloadError::Http(HttpError::Status(404)))
        ));
        assert_eq!(events[0].state(), DownloadState::Failed);
        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn download_stream_reports_file_creation_failure() {
        let downloader = Downloader::default();
        let path = temp_path("no-such-dir").join("out.bin");

        // The destination is unwritable, so the transfer fails before any
        // request is made.
        let events: Vec<DownloadEvent> = downloader
            .download_stream("http://127.0.0.1:9/x".to_string(), path)
            .collect()
            .await;

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], DownloadEvent::Failed(DownloadError::Io(_))));
    }

    #[test]
    fn suggested_filename_uses_last_segment() {
        assert_eq!(
            suggested_filename("http://example.com/music/track01.mp3", "download"),
            "track01.mp3"
        );
        assert_eq!(
            suggested_filename("http://example.com/", "download"),
            "download"
        );
        assert_eq!(
            suggested_filename("http://example.com/a/we:ird*name", "download"),
            "we_ird_name"
        );
    }
}
