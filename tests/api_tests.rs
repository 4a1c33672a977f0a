//! Integration tests against a local mock of the Spreaker API.
//!
//! Covers the response envelope, standard headers, query and form encoding,
//! redirects, pagination and transport failures.

use std::time::Duration;

use serde::Deserialize;
use spreaker::models::Cuepoint;
use spreaker::{
    Client, ClientConfig, ClientError, PaginationParams, Params, SearchParams, UploadEpisodeParams,
};
use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: u64,
}

fn client_for(server: &MockServer, token: &str) -> Client {
    let config = ClientConfig::new(token).with_base_url(server.uri());
    Client::new(config).unwrap()
}

fn json(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn get_me_without_token_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/me"))
        .respond_with(json(serde_json::json!({"response": {"user": {"user_id": 1}}})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client.get_me().await.unwrap_err();

    assert!(matches!(err, ClientError::AuthRequired));
    assert!(err.is_local());
}

#[tokio::test]
async fn public_read_without_token_surfaces_server_401() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/shows/7"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "response": {"error": {"code": 401, "messages": ["Unauthorized"]}}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client.get_show(7).await.unwrap_err();

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn success_envelope_decodes_payload() {
    #[derive(Debug, Deserialize)]
    struct ShowPayload {
        show_id: u64,
        title: String,
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/shows/123"))
        .respond_with(json(serde_json::json!({"response": {"show_id": 123, "title": "Foo"}})))
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    let payload: ShowPayload = client.get("/shows/123", &Params::new()).await.unwrap();

    assert_eq!(payload.show_id, 123);
    assert_eq!(payload.title, "Foo");
}

#[tokio::test]
async fn error_envelope_becomes_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/shows/123"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "response": {"error": {"code": 7, "messages": ["show not found"]}}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    let err = client.get_show(123).await.unwrap_err();
    let api = err.api_error().unwrap();

    assert_eq!(api.status_code, 404);
    assert_eq!(api.error_code, 7);
    assert_eq!(api.messages, vec!["show not found".to_string()]);
    assert!(err.is_not_found());
}

#[tokio::test]
async fn last_page_has_no_more() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/items"))
        .respond_with(json(serde_json::json!({
            "response": {"items": [{"id": 1}, {"id": 2}], "next_url": ""}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    let page = client.get_page::<Item>("/items", &Params::new()).await.unwrap();

    assert_eq!(page.items, vec![Item { id: 1 }, Item { id: 2 }]);
    assert!(!page.has_more);
}

#[tokio::test]
async fn standard_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/me"))
        .and(header("authorization", "Bearer secret-token"))
        .and(header("accept", "application/json"))
        .and(header_exists("user-agent"))
        .respond_with(json(serde_json::json!({
            "response": {"user": {"user_id": 42, "fullname": "Jane", "username": "jane"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "secret-token");
    let me = client.get_me().await.unwrap();

    assert_eq!(me.user_id, 42);
    assert_eq!(me.username, "jane");
}

#[tokio::test]
async fn search_query_is_url_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/search"))
        .and(query_param("type", "shows"))
        .and(query_param("q", "rock & roll"))
        .and(query_param("limit", "5"))
        .respond_with(json(serde_json::json!({"response": {"items": [], "next_url": null}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let page = client
        .search_shows(&SearchParams::new("rock & roll"), PaginationParams::limit(5))
        .await
        .unwrap();

    assert!(page.is_empty());
}

#[tokio::test]
async fn upload_sends_multipart_with_media_file() {
    let dir = tempfile::tempdir().unwrap();
    let media = dir.path().join("pilot.mp3");
    std::fs::write(&media, b"ID3-fake-audio").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/shows/9/episodes"))
        .and(header("authorization", "Bearer tok"))
        .and(body_string_contains("name=\"media_file\"; filename=\"pilot.mp3\""))
        .and(body_string_contains("ID3-fake-audio"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("Pilot"))
        .respond_with(json(serde_json::json!({
            "response": {"episode": {"episode_id": 77, "title": "Pilot", "show_id": 9}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    let upload = UploadEpisodeParams {
        title: "Pilot".to_string(),
        media_file: media,
        ..Default::default()
    };
    let episode = client.upload_episode(9, &upload).await.unwrap();

    assert_eq!(episode.episode_id, 77);
}

#[tokio::test]
async fn upload_of_missing_file_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    let upload = UploadEpisodeParams {
        title: "Pilot".to_string(),
        media_file: "/definitely/not/here.mp3".into(),
        ..Default::default()
    };
    let err = client.upload_episode(9, &upload).await.unwrap_err();

    assert!(matches!(err, ClientError::FileUnreadable { .. }));
}

#[tokio::test]
async fn cuepoints_travel_as_json_form_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/episodes/3/cuepoints"))
        .and(body_string_contains("name=\"cuepoints\""))
        .and(body_string_contains(r#"[{"timecode":1000,"ads_max_count":2}]"#))
        .respond_with(json(serde_json::json!({"response": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    client
        .update_episode_cuepoints(
            3,
            &[Cuepoint {
                timecode: 1000,
                ads_max_count: 2,
            }],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn like_and_unlike_use_put_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/users/1/likes/2"))
        .respond_with(json(serde_json::json!({"response": {}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/users/1/likes/2"))
        .respond_with(json(serde_json::json!({"response": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "tok");
    client.like_episode(1, 2).await.unwrap();
    client.unlike_episode(1, 2).await.unwrap();
}

#[tokio::test]
async fn download_url_is_taken_from_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/episodes/5/download"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", "https://cdn.example.com/ep5.mp3"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let url = client.get_episode_download_url(5).await.unwrap();

    assert_eq!(url, "https://cdn.example.com/ep5.mp3");
}

#[tokio::test]
async fn redirect_without_location_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/episodes/5/download"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client.get_episode_download_url(5).await.unwrap_err();

    assert!(matches!(err, ClientError::MissingRedirectLocation { .. }));
}

#[tokio::test]
async fn get_all_follows_next_url() {
    let server = MockServer::start().await;
    let next_url = format!("{}/v2/shows/1/episodes?limit=2&last_id=2", server.uri());

    Mock::given(method("GET"))
        .and(path("/v2/shows/1/episodes"))
        .and(query_param("last_id", "2"))
        .respond_with(json(serde_json::json!({
            "response": {"items": [{"id": 3}], "next_url": ""}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/shows/1/episodes"))
        .respond_with(json(serde_json::json!({
            "response": {"items": [{"id": 1}, {"id": 2}], "next_url": next_url}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let items: Vec<Item> = client
        .get_all("/shows/1/episodes", &PaginationParams::limit(2).to_params(), None)
        .await
        .unwrap();

    assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }, Item { id: 3 }]);
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let config = ClientConfig::new("tok")
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(2));
    let client = Client::new(config).unwrap();

    let err = client.get_show(1).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport { .. }));
    assert!(err.api_error().is_none());
}

#[tokio::test]
async fn slow_response_times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/shows/1"))
        .respond_with(
            json(serde_json::json!({"response": {"show": {"show_id": 1}}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new("")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(300));
    let client = Client::new(config).unwrap();

    let err = client.get_show(1).await.unwrap_err();

    match err {
        ClientError::Transport { source, .. } => assert!(source.is_timeout()),
        other => panic!("expected a transport error, got {other:?}"),
    }
}
