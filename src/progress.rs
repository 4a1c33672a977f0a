use std::sync::Arc;

/// Events emitted while a media file is downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The media URL answered and the body is about to be streamed
    DownloadStarting {
        label: String,
        /// Expected content length in bytes, if known
        content_length: Option<u64>,
    },

    DownloadProgress {
        bytes_downloaded: u64,
        total_bytes: Option<u64>,
    },

    /// The `.partial` file is being renamed into place
    Finalizing { label: String },

    DownloadCompleted {
        label: String,
        bytes_downloaded: u64,
        /// `sha256:<hex>` of the written content
        hash: String,
    },

    DownloadFailed { label: String, error: String },
}

/// Receives download progress, e.g. to drive a progress bar
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// Ignores all events. Used in tests and quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {}
}

impl NoopReporter {
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
