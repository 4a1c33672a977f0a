use std::path::{Path, PathBuf};

use futures::StreamExt;
use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::client::Client;
use crate::error::DownloadError;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};

/// Outcome of a finished download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub path: PathBuf,
    pub bytes_downloaded: u64,
    /// `sha256:<hex>` of the file content
    pub content_hash: String,
}

/// Sibling path the body is streamed into before the final rename
pub fn partial_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

/// Stream the media at `url` to `output_path`
///
/// The body goes to `<output_path>.partial` first and is hashed on the
/// way; only a complete download is renamed into place. On failure the
/// partial file is removed.
pub async fn download_episode<C: HttpClient>(
    client: &Client<C>,
    url: &str,
    output_path: &Path,
    label: &str,
    reporter: &SharedProgressReporter,
) -> Result<DownloadResult, DownloadError> {
    let partial = partial_path(output_path);

    let result = stream_to_file(client.http(), url, &partial, label, reporter).await;
    let (bytes_downloaded, content_hash) = match result {
        Ok(done) => done,
        Err(err) => {
            let _ = tokio::fs::remove_file(&partial).await;
            reporter.report(ProgressEvent::DownloadFailed {
                label: label.to_string(),
                error: err.to_string(),
            });
            return Err(err);
        }
    };

    reporter.report(ProgressEvent::Finalizing {
        label: label.to_string(),
    });

    tokio::fs::rename(&partial, output_path)
        .await
        .map_err(|source| DownloadError::FileWriteFailed {
            path: output_path.to_path_buf(),
            source,
        })?;

    tracing::debug!(url, path = %output_path.display(), bytes_downloaded, "download finished");

    reporter.report(ProgressEvent::DownloadCompleted {
        label: label.to_string(),
        bytes_downloaded,
        hash: content_hash.clone(),
    });

    Ok(DownloadResult {
        path: output_path.to_path_buf(),
        bytes_downloaded,
        content_hash,
    })
}

async fn stream_to_file<C: HttpClient>(
    http: &C,
    url: &str,
    path: &Path,
    label: &str,
    reporter: &SharedProgressReporter,
) -> Result<(u64, String), DownloadError> {
    let response = http
        .get_stream(url)
        .await
        .map_err(|source| DownloadError::HttpFailed {
            url: url.to_string(),
            source,
        })?;

    if response.status >= 400 {
        return Err(DownloadError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    reporter.report(ProgressEvent::DownloadStarting {
        label: label.to_string(),
        content_length: response.content_length,
    });

    let mut file = File::create(path)
        .await
        .map_err(|source| DownloadError::FileCreateFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let mut hasher = Sha256::new();
    let mut bytes_downloaded: u64 = 0;
    let mut stream = response.body;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| DownloadError::StreamFailed {
            url: url.to_string(),
            source,
        })?;

        file.write_all(&chunk)
            .await
            .map_err(|source| DownloadError::FileWriteFailed {
                path: path.to_path_buf(),
                source,
            })?;
        hasher.update(&chunk);
        bytes_downloaded += chunk.len() as u64;

        reporter.report(ProgressEvent::DownloadProgress {
            bytes_downloaded,
            total_bytes: response.content_length,
        });
    }

    file.flush()
        .await
        .map_err(|source| DownloadError::FileWriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok((bytes_downloaded, format!("sha256:{:x}", hasher.finalize())))
}
