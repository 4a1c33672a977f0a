use std::path::PathBuf;
use thiserror::Error;

use crate::http::Method;

/// Structured error returned by the API for a response with status >= 400
///
/// `error_code` and `messages` come from the error envelope and stay at
/// `0` / empty when the body could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Spreaker API error {status_code}{}",
    .messages.first().map(|m| format!(": {m}")).unwrap_or_default()
)]
pub struct ApiError {
    pub status_code: u16,
    pub error_code: i64,
    pub messages: Vec<String>,
}

impl ApiError {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            error_code: 0,
            messages: Vec::new(),
        }
    }

    /// HTTP 404
    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    /// HTTP 401
    pub fn is_unauthorized(&self) -> bool {
        self.status_code == 401
    }

    /// HTTP 429
    pub fn is_rate_limited(&self) -> bool {
        self.status_code == 429
    }

    pub fn first_message(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }
}

/// Errors that can occur while talking to the Spreaker API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request {method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to set up HTTP client: {0}")]
    HttpSetup(#[source] reqwest::Error),

    #[error("Malformed response envelope (HTTP {status}): {source}")]
    MalformedEnvelope {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to decode response payload: {source}")]
    PayloadDecode {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to read file {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Authentication required: pass --token or set SPREAKER_TOKEN")]
    AuthRequired,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Redirect from {url} carried no Location header")]
    MissingRedirectLocation { url: String },

    #[error("Unexpected HTTP status {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },
}

impl ClientError {
    /// The structured API error, if the server answered with one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_not_found)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_unauthorized)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_rate_limited)
    }

    /// Failures raised before any request went out
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::FileUnreadable { .. }
                | Self::AuthRequired
                | Self::InvalidArgument(_)
                | Self::Serialize(_)
        )
    }
}

/// Errors that can occur during episode media downloads
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP request failed for {url}: {source}")]
    HttpFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to create file {path}: {source}")]
    FileCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to file {path}: {source}")]
    FileWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stream error while downloading {url}: {source}")]
    StreamFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
