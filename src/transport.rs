// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{ApiRequest, HttpClient, Method, RawResponse, RequestBody};

/// Join host, version and a resource path that starts with "/"
///
/// No slash normalization happens beyond what the config already did.
pub fn build_url(base_url: &str, api_version: &str, resource_path: &str) -> String {
    format!("{base_url}/{api_version}{resource_path}")
}

/// Turns request descriptors into dispatched HTTP exchanges
pub struct Transport<C> {
    config: ClientConfig,
    http: C,
}

impl<C: HttpClient> Transport<C> {
    pub fn new(config: ClientConfig, http: C) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn build_url(&self, resource_path: &str) -> String {
        build_url(&self.config.base_url, &self.config.api_version, resource_path)
    }

    /// Attach the standard headers to a request
    ///
    /// Authorization is only sent when a token is configured. Multipart
    /// requests get their Content-Type (with boundary) from the HTTP client.
    pub fn new_request(&self, method: Method, url: String, body: RequestBody) -> ApiRequest {
        let mut headers = vec![
            ("User-Agent".to_string(), self.config.user_agent.clone()),
            ("Accept".to_string(), "application/json".to_string()),
        ];

        if self.config.has_token() {
            headers.push((
                "Authorization".to_string(),
                format!("Bearer {}", self.config.token),
            ));
        }

        if matches!(body, RequestBody::Json(_)) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        ApiRequest {
            method,
            url,
            headers,
            body,
            follow_redirects: true,
        }
    }

    /// Send a request; network failures surface as `ClientError::Transport`
    pub async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let method = request.method;
        let url = request.url.clone();

        tracing::debug!(%method, %url, "dispatching request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|source| ClientError::Transport {
                method,
                url: url.clone(),
                source,
            })?;

        tracing::debug!(
            %method,
            %url,
            status = response.status,
            bytes = response.body.len(),
            "response received"
        );

        Ok(response)
    }
}
