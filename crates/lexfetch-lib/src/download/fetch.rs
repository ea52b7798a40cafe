use super::progress::TransferProgress;
use super::types::FetchOutcome;
use crate::error::LexFetchError;
use crate::http::HttpContext;
use eyre::{Result, WrapErr};
use futures::StreamExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Destination file that is deleted on drop unless the transfer completed.
///
/// Covers both error returns and the transfer future being dropped on interruption.
struct PartialFile {
    path: PathBuf,
    file: Option<File>,
    completed: bool,
}

impl PartialFile {
    /// Synchronous: no await point may separate creating the file from arming the guard.
    fn create_new(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(File::from_std(file)),
            completed: false,
        })
    }

    async fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.write_all(buf).await,
            None => Err(std::io::Error::other("partial file already closed")),
        }
    }

    async fn complete(mut self) -> std::io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
        }
        self.completed = true;
        Ok(())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        drop(self.file.take());
        if self.completed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed partial file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove partial file")
            }
        }
    }
}

/// Streams `url` into `destination` unless the destination already exists.
///
/// The body is written in `chunk_size` pieces and `progress` is advanced after each one.
/// On failure the destination is removed; a later run starts the file from byte zero.
pub async fn download_file<P: TransferProgress>(
    http: &HttpContext,
    url: &Url,
    destination: &Path,
    progress: &mut P,
) -> Result<FetchOutcome, LexFetchError> {
    let exists = tokio::fs::try_exists(destination)
        .await
        .map_err(|e| LexFetchError::transfer(url.as_str(), destination, e))?;
    if exists {
        tracing::debug!(url = %url, path = %destination.display(), "Destination exists, skipping");
        return Ok(FetchOutcome::Skipped);
    }

    let response = http
        .client()
        .get(url.clone())
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| LexFetchError::transfer(url.as_str(), destination, e))?;
    let total_bytes = response.content_length();

    let mut partial = match PartialFile::create_new(destination) {
        Ok(partial) => partial,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::debug!(path = %destination.display(), "Destination appeared during request, skipping");
            return Ok(FetchOutcome::Skipped);
        }
        Err(e) => return Err(LexFetchError::transfer(url.as_str(), destination, e)),
    };

    let name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| url.to_string());
    progress.begin(&name, total_bytes);

    let streamed = stream_to_file(response, &mut partial, http.chunk_size(), progress).await;

    let result = match streamed {
        Ok(bytes) => partial
            .complete()
            .await
            .map(|()| bytes)
            .wrap_err_with(|| format!("Failed to finalize {}", destination.display())),
        Err(e) => Err(e),
    };

    match result {
        Ok(bytes) => {
            progress.finish();
            tracing::debug!(url = %url, path = %destination.display(), bytes, "Downloaded");
            Ok(FetchOutcome::Downloaded { bytes })
        }
        Err(e) => {
            progress.abandon();
            Err(LexFetchError::transfer(url.as_str(), destination, format!("{e:#}")))
        }
    }
}

async fn stream_to_file<P: TransferProgress>(
    response: reqwest::Response,
    file: &mut PartialFile,
    chunk_size: usize,
    progress: &mut P,
) -> Result<u64> {
    let mut body = response.bytes_stream();
    let mut chunk: Vec<u8> = Vec::with_capacity(chunk_size);
    let mut downloaded: u64 = 0;

    while let Some(bytes) = body.next().await {
        let bytes = bytes.wrap_err("Failed to read response body")?;
        let mut remaining = &bytes[..];

        while !remaining.is_empty() {
            let take = (chunk_size - chunk.len()).min(remaining.len());
            chunk.extend_from_slice(&remaining[..take]);
            remaining = &remaining[take..];

            if chunk.len() == chunk_size {
                downloaded += write_chunk(file, &mut chunk).await?;
                progress.advance(downloaded);
            }
        }
    }

    if !chunk.is_empty() {
        downloaded += write_chunk(file, &mut chunk).await?;
        progress.advance(downloaded);
    }

    Ok(downloaded)
}

async fn write_chunk(file: &mut PartialFile, chunk: &mut Vec<u8>) -> Result<u64> {
    file.write_all(chunk)
        .await
        .wrap_err("Failed to write chunk")?;
    let written = chunk.len() as u64;
    chunk.clear();
    Ok(written)
}
