// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use reqwest::multipart::{Form, Part};

/// A streaming response body
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// A file read into memory for a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    /// Name of the multipart part (e.g. "media_file")
    pub field_name: String,
    /// Base name of the file on disk
    pub file_name: String,
    pub content: Vec<u8>,
    pub mime_type: String,
}

/// Request payload
///
/// A JSON body and form fields are separate variants, so one request can
/// never carry both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Serialized JSON document
    Json(Vec<u8>),
    /// multipart/form-data fields with an optional file part
    Multipart {
        fields: Vec<(String, String)>,
        file: Option<FileAttachment>,
    },
}

/// A fully built request, ready to be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// When false, a 3xx response is returned as-is instead of followed
    pub follow_redirects: bool,
}

impl ApiRequest {
    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status, redirect target and fully read body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Location header value, if present
    pub location: Option<String>,
    pub body: Bytes,
}

/// HTTP response with status, content length, and body stream
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Content-Length header value, if present
    pub content_length: Option<u64>,
    /// Response body as a stream of bytes
    pub body: ByteStream,
}

/// HTTP client abstraction for testability
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a request and read the entire response body
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, reqwest::Error>;

    /// Get a streaming response for large downloads
    async fn get_stream(&self, url: &str) -> Result<HttpResponse, reqwest::Error>;
}

/// Default HTTP client implementation using reqwest
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    no_redirect: reqwest::Client,
    streaming: reqwest::Client,
}

impl ReqwestClient {
    /// Create a ReqwestClient whose API requests are bounded by `timeout`
    ///
    /// Media streams have no total limit. `timeout` only bounds connecting
    /// and each wait for more body bytes.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let no_redirect = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        let streaming = reqwest::Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            no_redirect,
            streaming,
        })
    }

    /// Create a ReqwestClient from custom reqwest clients
    ///
    /// `no_redirect` is used for requests that must not follow redirects,
    /// `streaming` for media downloads.
    pub fn with_clients(
        client: reqwest::Client,
        no_redirect: reqwest::Client,
        streaming: reqwest::Client,
    ) -> Self {
        Self {
            client,
            no_redirect,
            streaming,
        }
    }
}

fn build_form(
    fields: Vec<(String, String)>,
    file: Option<FileAttachment>,
) -> Result<Form, reqwest::Error> {
    let mut form = Form::new();

    if let Some(file) = file {
        let part = Part::bytes(file.content)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)?;
        form = form.part(file.field_name, part);
    }

    for (name, value) in fields {
        form = form.text(name, value);
    }

    Ok(form)
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, reqwest::Error> {
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.no_redirect
        };

        let mut builder = client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder.body(bytes),
            RequestBody::Multipart { fields, file } => builder.multipart(build_form(fields, file)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let body = response.bytes().await?;

        Ok(RawResponse {
            status,
            location,
            body,
        })
    }

    async fn get_stream(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let response = self.streaming.get(url).send().await?;
        let status = response.status().as_u16();
        let content_length = response.content_length();

        let body: ByteStream = Box::pin(response.bytes_stream());

        Ok(HttpResponse {
            status,
            content_length,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reqwest_client_can_be_created() {
        let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();
        let _cloned = client.clone();
    }

    #[test]
    fn method_maps_to_reqwest() {
        assert_eq!(reqwest::Method::from(Method::Delete), reqwest::Method::DELETE);
        assert_eq!(Method::Put.to_string(), "PUT");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = ApiRequest {
            method: Method::Get,
            url: "https://api.spreaker.com/v2/me".to_string(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: RequestBody::Empty,
            follow_redirects: true,
        };

        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn form_accepts_file_and_fields() {
        let file = FileAttachment {
            field_name: "media_file".to_string(),
            file_name: "ep.mp3".to_string(),
            content: b"audio".to_vec(),
            mime_type: "audio/mpeg".to_string(),
        };

        let form = build_form(vec![("title".to_string(), "Ep".to_string())], Some(file));
        assert!(form.is_ok());
    }
}
