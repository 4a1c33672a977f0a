// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://api.spreaker.com";

/// Default API version path segment
pub const DEFAULT_API_VERSION: &str = "v2";

/// Default timeout for a whole request round trip
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a single API client, fixed once the client is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host, without a trailing slash
    pub base_url: String,
    /// Version segment inserted between host and resource path (e.g. "v2")
    pub api_version: String,
    /// OAuth bearer token; empty means unauthenticated
    pub token: String,
    /// Bounds connect, write and read of one request together
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config with defaults and the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Point the client at a different host
    ///
    /// Trailing slashes are dropped so URL building never produces "//v2".
    /// An empty value keeps the current base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/');
        if !trimmed.is_empty() {
            self.base_url = trimmed.to_string();
        }
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Override the timeout; a zero duration keeps the current value
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Whether a bearer token is configured
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token: String::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("spreaker-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
