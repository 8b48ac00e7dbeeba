//! HTTP client wrapper for fetching archives to disk.
//!
//! This module provides the `HttpClient` struct which streams response bodies
//! into a `.part` file next to the destination and renames it into place only
//! once the whole body has been written.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, PROGRESS_INTERVAL, READ_TIMEOUT_SECS, TEMP_SUFFIX};
use super::error::DownloadError;
use super::progress::{DownloadProgress, ProgressThrottle, format_bytes};
use crate::user_agent;

/// One in-flight fetch: where the bytes come from and where they land.
///
/// Lives only for the duration of a single [`HttpClient::fetch_to_file`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// Source URL.
    pub url: String,
    /// Final destination path.
    pub destination: PathBuf,
    /// Suffix appended to `destination` while the transfer is running.
    pub temp_suffix: &'static str,
}

impl DownloadTask {
    /// Creates a task using the default `.part` suffix.
    #[must_use]
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            temp_suffix: TEMP_SUFFIX,
        }
    }

    /// Path the body is streamed into before the final rename.
    #[must_use]
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self.destination.as_os_str().to_os_string();
        name.push(self.temp_suffix);
        PathBuf::from(name)
    }
}

/// HTTP client for fetching files with streaming support.
///
/// Create once and reuse for every listing and archive request so the
/// connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Overall request timeout: 5 minutes
    /// - Gzip decompression: enabled
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, DownloadError> {
        Self::with_timeouts(
            Duration::from_secs(CONNECT_TIMEOUT_SECS),
            Duration::from_secs(READ_TIMEOUT_SECS),
        )
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Client`] if the TLS backend cannot be initialized.
    #[instrument(level = "debug")]
    pub fn with_timeouts(
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|source| DownloadError::Client { source })?;
        Ok(Self { client })
    }

    /// Streams `url` to `destination`, returning the number of bytes written.
    ///
    /// The body is written to `destination` + `.part` and renamed into place
    /// after the last chunk is flushed. On any failure the temporary file is
    /// removed and `destination` is left untouched. The parent directory of
    /// `destination` must already exist.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout, dropped body)
    /// - The server returns an error status (4xx, 5xx)
    /// - Creating, writing or renaming the file fails
    #[instrument(skip(self, progress), fields(url = %url, destination = %destination.display()))]
    pub async fn fetch_to_file(
        &self,
        url: &str,
        destination: &Path,
        progress: &dyn DownloadProgress,
    ) -> Result<u64, DownloadError> {
        self.fetch_task(&DownloadTask::new(url, destination), progress)
            .await
    }

    /// Executes a prepared [`DownloadTask`].
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`fetch_to_file`](Self::fetch_to_file).
    pub async fn fetch_task(
        &self,
        task: &DownloadTask,
        progress: &dyn DownloadProgress,
    ) -> Result<u64, DownloadError> {
        debug!("starting download");

        Url::parse(&task.url).map_err(|_| DownloadError::invalid_url(task.url.clone()))?;

        let response = self.send_get(&task.url).await?;
        let content_length = response.content_length();

        let temp_path = task.temp_path();
        let guard = PartialFileGuard::new(temp_path.clone());
        let file = File::create(&temp_path)
            .await
            .map_err(|e| DownloadError::io(temp_path.clone(), e))?;

        let label = task
            .destination
            .file_name()
            .map_or_else(|| task.url.clone(), |name| name.to_string_lossy().into_owned());
        progress.on_start(&label, content_length);
        let stream_result = stream_to_file(file, response, &task.url, &temp_path, progress).await;
        progress.on_finish();

        // Guard drop removes the temp file on the error path.
        let bytes_written = stream_result?;

        tokio::fs::rename(&temp_path, &task.destination)
            .await
            .map_err(|e| DownloadError::io(task.destination.clone(), e))?;
        guard.disarm();

        info!(
            path = %task.destination.display(),
            bytes = bytes_written,
            size = %format_bytes(bytes_written),
            "download complete"
        );

        Ok(bytes_written)
    }

    /// Sends a GET request and rejects non-success statuses.
    pub(crate) async fn send_get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }

    /// Returns a reference to the underlying reqwest client.
    ///
    /// The listing client reuses it so both share one connection pool.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    progress: &dyn DownloadProgress,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;
    let mut throttle = ProgressThrottle::new(PROGRESS_INTERVAL);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
        if throttle.ready(Instant::now()) {
            progress.on_advance(bytes_written);
        }
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;
    writer
        .into_inner()
        .sync_all()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    progress.on_advance(bytes_written);
    Ok(bytes_written)
}

/// Removes the temporary file unless the transfer was committed.
///
/// Also covers cancellation: dropping the fetch future drops the guard.
struct PartialFileGuard {
    path: PathBuf,
    armed: bool,
}

impl PartialFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed partial file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove partial file"),
        }
    }
}
