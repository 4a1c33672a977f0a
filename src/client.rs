// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::future::Future;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::envelope::{decode_error, decode_success};
use crate::error::ClientError;
use crate::http::{FileAttachment, HttpClient, Method, RawResponse, ReqwestClient, RequestBody};
use crate::pagination::{Page, RawPage};
use crate::params::{PaginationParams, Params};
use crate::transport::Transport;

/// Spreaker API client
///
/// Every call is a single request/response round trip. The configuration
/// is read-only, so a client can be shared between tasks.
pub struct Client<C = ReqwestClient> {
    transport: Transport<C>,
}

impl Client<ReqwestClient> {
    /// Create a client backed by reqwest, using the configured timeout
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = ReqwestClient::new(config.timeout).map_err(ClientError::HttpSetup)?;
        Ok(Self::with_http_client(config, http))
    }
}

impl<C: HttpClient> Client<C> {
    pub fn with_http_client(config: ClientConfig, http: C) -> Self {
        Self {
            transport: Transport::new(config, http),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    pub(crate) fn http(&self) -> &C {
        self.transport.http()
    }

    /// Fail locally when no token is configured
    pub fn require_auth(&self) -> Result<(), ClientError> {
        if self.config().has_token() {
            Ok(())
        } else {
            Err(ClientError::AuthRequired)
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&Params>,
        body: RequestBody,
    ) -> Result<RawResponse, ClientError> {
        let mut url = self.transport.build_url(path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(&query.encode());
        }

        let request = self.transport.new_request(method, url, body);
        self.transport.execute(request).await
    }

    fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ClientError> {
        decode_success(&response.body, response.status)?.decode()
    }

    /// Succeed on any status below 400 without looking at the body
    fn ensure_success(response: &RawResponse) -> Result<(), ClientError> {
        if response.status >= 400 {
            return Err(ClientError::Api(decode_error(&response.body, response.status)));
        }
        Ok(())
    }

    /// GET `path` with URL-encoded query parameters
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Params,
    ) -> Result<T, ClientError> {
        let response = self.send(Method::Get, path, Some(query), RequestBody::Empty).await?;
        Self::decode(&response)
    }

    /// POST a JSON body; `None` sends the request without a body
    pub async fn post_json<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(Method::Post, path, None, json_body(body)?).await?;
        Self::decode(&response)
    }

    /// POST a JSON body for its side effect only
    pub async fn post_json_no_content<B>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(Method::Post, path, None, json_body(body)?).await?;
        Self::ensure_success(&response)
    }

    /// POST multipart form fields
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &Params,
    ) -> Result<T, ClientError> {
        let body = RequestBody::Multipart {
            fields: fields.clone().into_pairs(),
            file: None,
        };
        let response = self.send(Method::Post, path, None, body).await?;
        Self::decode(&response)
    }

    pub async fn post_form_no_content(
        &self,
        path: &str,
        fields: &Params,
    ) -> Result<(), ClientError> {
        let body = RequestBody::Multipart {
            fields: fields.clone().into_pairs(),
            file: None,
        };
        let response = self.send(Method::Post, path, None, body).await?;
        Self::ensure_success(&response)
    }

    /// POST multipart form fields plus one file part
    ///
    /// The file is read fully before anything goes over the network, so a
    /// missing or unreadable file fails locally.
    pub async fn post_form_with_file<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &Params,
        file_field: &str,
        file_path: &Path,
    ) -> Result<T, ClientError> {
        let attachment = read_attachment(file_field, file_path).await?;
        let body = RequestBody::Multipart {
            fields: fields.clone().into_pairs(),
            file: Some(attachment),
        };
        let response = self.send(Method::Post, path, None, body).await?;
        Self::decode(&response)
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.send(Method::Put, path, None, RequestBody::Empty).await?;
        Self::decode(&response)
    }

    pub async fn put_no_content(&self, path: &str) -> Result<(), ClientError> {
        let response = self.send(Method::Put, path, None, RequestBody::Empty).await?;
        Self::ensure_success(&response)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.send(Method::Delete, path, None, RequestBody::Empty).await?;
        Self::decode(&response)
    }

    pub async fn delete_no_content(&self, path: &str) -> Result<(), ClientError> {
        let response = self.send(Method::Delete, path, None, RequestBody::Empty).await?;
        Self::ensure_success(&response)
    }

    /// GET one page of a list endpoint
    ///
    /// A single item that fails to decode fails the whole page.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Params,
    ) -> Result<Page<T>, ClientError> {
        let raw: RawPage<T> = self.get(path, query).await?;
        Ok(raw.into())
    }

    /// Follow the cursor of a raw list path until the last page
    ///
    /// Each continuation is re-issued through `path` with the original query
    /// overlaid by the parameters found in `next_url`.
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Params,
        max_items: Option<usize>,
    ) -> Result<Vec<T>, ClientError> {
        self.collect_pages(PaginationParams::default(), max_items, |pagination| {
            let current = query.clone().merge(&pagination.to_params());
            async move { self.get_page(path, &current).await }
        })
        .await
    }

    /// Collect every page `fetch` returns, until the last one or `max_items`
    ///
    /// `fetch` is usually an endpoint wrapper, so its preconditions run for
    /// every page. Calls after the first get `first` with its cursor set to
    /// the query of the previous page's `next_url`. Stops early when the
    /// server repeats a cursor.
    pub async fn collect_pages<T, F, Fut>(
        &self,
        first: PaginationParams,
        max_items: Option<usize>,
        mut fetch: F,
    ) -> Result<Vec<T>, ClientError>
    where
        F: FnMut(PaginationParams) -> Fut,
        Fut: Future<Output = Result<Page<T>, ClientError>>,
    {
        let mut items = Vec::new();
        if max_items == Some(0) {
            return Ok(items);
        }

        let mut pagination = first;
        loop {
            let page = fetch(pagination.clone()).await?;
            let has_more = page.has_more;
            let continuation = page.continuation();
            items.extend(page.items);

            tracing::debug!(collected = items.len(), has_more, "fetched page");

            if let Some(max) = max_items
                && items.len() >= max
            {
                items.truncate(max);
                break;
            }

            if !has_more {
                break;
            }

            let Some(continuation) = continuation else {
                tracing::warn!("next_url carries no usable cursor, stopping");
                break;
            };

            if continuation == pagination.cursor {
                tracing::warn!("cursor did not advance, stopping");
                break;
            }
            pagination.cursor = continuation;
        }

        Ok(items)
    }

    /// Issue a GET without following redirects and return where it points
    ///
    /// A 3xx answer yields its Location header, a 200 yields the request URL.
    pub async fn resolve_redirect(&self, path: &str) -> Result<String, ClientError> {
        let url = self.transport.build_url(path);
        let mut request = self
            .transport
            .new_request(Method::Get, url.clone(), RequestBody::Empty);
        request.follow_redirects = false;

        let response = self.transport.execute(request).await?;
        match response.status {
            300..=399 => response
                .location
                .filter(|location| !location.is_empty())
                .ok_or(ClientError::MissingRedirectLocation { url }),
            200 => Ok(url),
            status if status >= 400 => Err(ClientError::Api(decode_error(&response.body, status))),
            status => Err(ClientError::UnexpectedStatus { url, status }),
        }
    }
}

fn json_body<B: Serialize + ?Sized>(body: Option<&B>) -> Result<RequestBody, ClientError> {
    match body {
        Some(body) => serde_json::to_vec(body)
            .map(RequestBody::Json)
            .map_err(ClientError::Serialize),
        None => Ok(RequestBody::Empty),
    }
}

async fn read_attachment(field_name: &str, path: &Path) -> Result<FileAttachment, ClientError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("file")
        .to_string();

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Ok(FileAttachment {
        field_name: field_name.to_string(),
        file_name,
        content,
        mime_type,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::{ApiRequest, HttpResponse};
    use async_trait::async_trait;
    use bytes::Bytes;
    use serde::Deserialize;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Replays canned responses and records every request it sees
    #[derive(Default)]
    pub(crate) struct MockHttpClient {
        responses: Mutex<VecDeque<RawResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl MockHttpClient {
        pub(crate) fn with_responses(responses: Vec<(u16, &str)>) -> Self {
            let responses = responses
                .into_iter()
                .map(|(status, body)| RawResponse {
                    status,
                    location: None,
                    body: Bytes::from(body.to_string()),
                })
                .collect();

            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn push(&self, response: RawResponse) {
            self.responses.lock().unwrap().push_back(response);
        }

        pub(crate) fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn execute(&self, request: ApiRequest) -> Result<RawResponse, reqwest::Error> {
            self.requests.lock().unwrap().push(request);
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no canned response left");
            Ok(response)
        }

        async fn get_stream(&self, _url: &str) -> Result<HttpResponse, reqwest::Error> {
            unimplemented!("not used by client tests")
        }
    }

    pub(crate) fn client_with(token: &str, responses: Vec<(u16, &str)>) -> Client<MockHttpClient> {
        Client::with_http_client(
            ClientConfig::new(token),
            MockHttpClient::with_responses(responses),
        )
    }

    /// Enveloped list page with the given raw items.
    pub(crate) fn page_body(items: &str, next_url: &str) -> String {
        format!(r#"{{"response":{{"items":[{items}],"next_url":"{next_url}"}}}}"#)
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    #[tokio::test]
    async fn get_appends_encoded_query() {
        let client = client_with("", vec![(200, r#"{"response":{"id":1}}"#)]);
        let query = Params::new().with("q", "a b&c").with("type", "shows");

        let item: Item = client.get("/search", &query).await.unwrap();

        assert_eq!(item, Item { id: 1 });
        let requests = client.http().requests();
        assert_eq!(
            requests[0].url,
            "https://api.spreaker.com/v2/search?q=a+b%26c&type=shows"
        );
        assert_eq!(requests[0].method, Method::Get);
    }

    #[tokio::test]
    async fn get_without_query_has_no_question_mark() {
        let client = client_with("", vec![(200, r#"{"response":{"id":9}}"#)]);

        let _: Item = client.get("/shows/9", &Params::new()).await.unwrap();
        assert_eq!(
            client.http().requests()[0].url,
            "https://api.spreaker.com/v2/shows/9"
        );
    }

    #[tokio::test]
    async fn post_json_serializes_body() {
        let client = client_with("tok", vec![(200, r#"{"response":{"id":2}}"#)]);
        let body = serde_json::json!({"text": "hello"});

        let item: Item = client.post_json("/episodes/1/messages", Some(&body)).await.unwrap();

        assert_eq!(item.id, 2);
        let request = &client.http().requests()[0];
        assert_eq!(request.body, RequestBody::Json(br#"{"text":"hello"}"#.to_vec()));
        assert_eq!(request.header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn post_json_without_body_sends_empty_request() {
        let client = client_with("tok", vec![(200, "")]);

        client
            .post_json_no_content("/episodes/1/messages/2/report-abuse", None::<&()>)
            .await
            .unwrap();

        let request = &client.http().requests()[0];
        assert_eq!(request.body, RequestBody::Empty);
        assert_eq!(request.header("Content-Type"), None);
    }

    #[tokio::test]
    async fn post_form_sends_multipart_fields() {
        let client = client_with("tok", vec![(200, r#"{"response":{"id":3}}"#)]);
        let fields = Params::new().with("title", "My show");

        let _: Item = client.post_form("/shows", &fields).await.unwrap();

        match &client.http().requests()[0].body {
            RequestBody::Multipart { fields, file } => {
                assert_eq!(fields, &vec![("title".to_string(), "My show".to_string())]);
                assert!(file.is_none());
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn post_form_with_file_attaches_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("episode.mp3");
        std::fs::write(&path, b"ID3 audio").unwrap();

        let client = client_with("tok", vec![(200, r#"{"response":{"id":4}}"#)]);
        let fields = Params::new().with("title", "Ep");

        let _: Item = client
            .post_form_with_file("/shows/1/episodes", &fields, "media_file", &path)
            .await
            .unwrap();

        match &client.http().requests()[0].body {
            RequestBody::Multipart {
                file: Some(file), ..
            } => {
                assert_eq!(file.field_name, "media_file");
                assert_eq!(file.file_name, "episode.mp3");
                assert_eq!(file.content, b"ID3 audio");
                assert_eq!(file.mime_type, "audio/mpeg");
            }
            other => panic!("expected file attachment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_upload_file_fails_without_network_call() {
        let client = client_with("tok", vec![]);

        let result: Result<Item, _> = client
            .post_form_with_file(
                "/shows/1/episodes",
                &Params::new(),
                "media_file",
                Path::new("/definitely/not/here.mp3"),
            )
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, ClientError::FileUnreadable { .. }));
        assert!(err.is_local());
        assert_eq!(client.http().call_count(), 0);
    }

    #[tokio::test]
    async fn no_content_verbs_ignore_body_but_surface_errors() {
        let client = client_with(
            "tok",
            vec![
                (204, ""),
                (404, r#"{"response":{"error":{"code":3,"messages":["gone"]}}}"#),
            ],
        );

        client.put_no_content("/users/1/likes/2").await.unwrap();
        let err = client.delete_no_content("/users/1/likes/2").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.api_error().unwrap().error_code, 3);

        let methods: Vec<_> = client.http().requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Put, Method::Delete]);
    }

    #[tokio::test]
    async fn typed_put_and_delete_decode_payload() {
        let client = client_with(
            "tok",
            vec![
                (200, r#"{"response":{"id":5}}"#),
                (200, r#"{"response":{"id":6}}"#),
            ],
        );

        let put: Item = client.put("/users/1/favorites/5").await.unwrap();
        let deleted: Item = client.delete("/users/1/favorites/6").await.unwrap();

        assert_eq!((put.id, deleted.id), (5, 6));
    }

    #[tokio::test]
    async fn get_page_decodes_items_and_cursor() {
        let client = client_with(
            "",
            vec![(200, r#"{"response":{"items":[{"id":1},{"id":2}],"next_url":""}}"#)],
        );

        let page: Page<Item> = client.get_page("/shows/1/episodes", &Params::new()).await.unwrap();

        assert_eq!(page.items, vec![Item { id: 1 }, Item { id: 2 }]);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn get_page_fails_whole_page_on_bad_item() {
        let client = client_with(
            "",
            vec![(200, r#"{"response":{"items":[{"id":1},{"name":"x"}],"next_url":""}}"#)],
        );

        let err = client
            .get_page::<Item>("/shows/1/episodes", &Params::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::PayloadDecode { .. }));
    }

    #[tokio::test]
    async fn caller_loop_stops_on_last_page() {
        let first = page_body(r#"{"id":1}"#, "https://api.spreaker.com/v2/x?last_id=1");
        let second = page_body(r#"{"id":2}"#, "https://api.spreaker.com/v2/x?last_id=2");
        let last = page_body(r#"{"id":3}"#, "");
        let client = client_with(
            "",
            vec![(200, first.as_str()), (200, second.as_str()), (200, last.as_str())],
        );

        let mut query = Params::new();
        let mut pages = 0;
        loop {
            let page: Page<Item> = client.get_page("/x", &query).await.unwrap();
            pages += 1;
            if !page.has_more {
                break;
            }
            query = query.merge(&page.continuation().unwrap());
        }

        assert_eq!(pages, 3);
        assert_eq!(client.http().call_count(), 3);
    }

    #[tokio::test]
    async fn get_all_follows_cursor() {
        let first = page_body(
            r#"{"id":1},{"id":2}"#,
            "https://api.spreaker.com/v2/x?limit=2&last_id=2",
        );
        let last = page_body(r#"{"id":3}"#, "");
        let client = client_with("", vec![(200, first.as_str()), (200, last.as_str())]);

        let items: Vec<Item> = client
            .get_all("/x", &Params::new().with("limit", "2"), None)
            .await
            .unwrap();

        assert_eq!(items.len(), 3);
        let requests = client.http().requests();
        assert_eq!(requests[1].url, "https://api.spreaker.com/v2/x?limit=2&last_id=2");
    }

    #[tokio::test]
    async fn get_all_respects_max_items() {
        let body = page_body(r#"{"id":1},{"id":2}"#, "https://api.spreaker.com/v2/x?last_id=2");
        let client = client_with("", vec![(200, body.as_str())]);

        let items: Vec<Item> = client.get_all("/x", &Params::new(), Some(1)).await.unwrap();

        assert_eq!(items, vec![Item { id: 1 }]);
        assert_eq!(client.http().call_count(), 1);
    }

    #[tokio::test]
    async fn zero_max_items_sends_nothing() {
        let client = client_with("", vec![]);

        let items: Vec<Item> = client.get_all("/x", &Params::new(), Some(0)).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(client.http().call_count(), 0);
    }

    #[tokio::test]
    async fn collect_pages_passes_cursor_to_wrapper() {
        let first = page_body(
            r#"{"show_id":1,"title":"A"}"#,
            "https://api.spreaker.com/v2/users/7/shows?limit=1&last_id=1",
        );
        let last = page_body(r#"{"show_id":2,"title":"B"}"#, "");
        let client = client_with("tok", vec![(200, first.as_str()), (200, last.as_str())]);

        let shows = client
            .collect_pages(PaginationParams::limit(1), None, |p| client.get_user_shows(7, p))
            .await
            .unwrap();

        assert_eq!(shows.len(), 2);
        let requests = client.http().requests();
        assert_eq!(requests[0].url, "https://api.spreaker.com/v2/users/7/shows?limit=1");
        assert_eq!(
            requests[1].url,
            "https://api.spreaker.com/v2/users/7/shows?limit=1&last_id=1"
        );
    }

    #[tokio::test]
    async fn collect_pages_keeps_wrapper_auth_check() {
        let client = client_with("", vec![(200, r#"{"response":{"items":[],"next_url":""}}"#)]);

        let err = client
            .collect_pages(PaginationParams::default(), None, |p| {
                client.get_user_blocks(7, p)
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::AuthRequired));
        assert_eq!(client.http().call_count(), 0);
    }

    #[tokio::test]
    async fn get_all_stops_when_cursor_repeats() {
        let repeating = page_body(r#"{"id":1}"#, "https://api.spreaker.com/v2/x?last_id=1");
        let client = client_with("", vec![(200, repeating.as_str()), (200, repeating.as_str())]);

        let items: Vec<Item> = client.get_all("/x", &Params::new(), None).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(client.http().call_count(), 2);
    }

    #[tokio::test]
    async fn resolve_redirect_reads_location_without_following() {
        let client = client_with("", vec![]);
        client.http().push(RawResponse {
            status: 302,
            location: Some("https://cdn.example.com/ep.mp3".to_string()),
            body: Bytes::new(),
        });

        let url = client.resolve_redirect("/episodes/7/download").await.unwrap();

        assert_eq!(url, "https://cdn.example.com/ep.mp3");
        assert!(!client.http().requests()[0].follow_redirects);
    }

    #[tokio::test]
    async fn resolve_redirect_handles_other_statuses() {
        let client = client_with("", vec![(200, ""), (302, ""), (204, "")]);

        assert_eq!(
            client.resolve_redirect("/episodes/7/download").await.unwrap(),
            "https://api.spreaker.com/v2/episodes/7/download"
        );
        assert!(matches!(
            client.resolve_redirect("/episodes/7/download").await,
            Err(ClientError::MissingRedirectLocation { .. })
        ));
        assert!(matches!(
            client.resolve_redirect("/episodes/7/download").await,
            Err(ClientError::UnexpectedStatus { status: 204, .. })
        ));
    }

    #[test]
    fn require_auth_checks_token() {
        assert!(client_with("tok", vec![]).require_auth().is_ok());
        assert!(matches!(
            client_with("", vec![]).require_auth(),
            Err(ClientError::AuthRequired)
        ));
    }
}
