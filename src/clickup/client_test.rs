//! Tests for the ClickUp API client.

use serial_test::serial;
use std::env;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::clickup::client::{ApiClient, DEFAULT_API_URL};
use crate::clickup::error::ClickUpError;
use crate::clickup::types::SpacesResponse;
use crate::credentials::Credentials;

fn test_credentials() -> Credentials {
    Credentials {
        api_key: "pk_test_key".to_string(),
        team_id: "9001".to_string(),
    }
}

#[test]
fn test_new_with_explicit_url() {
    let client = ApiClient::new(Some("http://custom:8080".to_string()));
    assert_eq!(client.base_url(), "http://custom:8080");
}

#[test]
fn test_new_with_default() {
    let client = ApiClient::new(None);
    // Actual value depends on CLICKUP_API_URL if set in the environment
    assert!(!client.base_url().is_empty());
}

#[test]
#[serial]
fn test_env_var_overrides_default() {
    unsafe {
        env::set_var("CLICKUP_API_URL", "http://from-env:9999");
    }

    let client = ApiClient::new(None);
    assert_eq!(client.base_url(), "http://from-env:9999");

    // Cleanup
    unsafe {
        env::remove_var("CLICKUP_API_URL");
    }
}

#[test]
#[serial]
fn test_explicit_url_beats_env_var() {
    unsafe {
        env::set_var("CLICKUP_API_URL", "http://from-env:9999");
    }

    let client = ApiClient::new(Some("http://explicit:7777".to_string()));
    assert_eq!(client.base_url(), "http://explicit:7777");

    // Cleanup
    unsafe {
        env::remove_var("CLICKUP_API_URL");
    }
}

#[test]
#[serial]
fn test_default_url_without_env() {
    unsafe {
        env::remove_var("CLICKUP_API_URL");
    }

    let client = ApiClient::new(None);
    assert_eq!(client.base_url(), DEFAULT_API_URL);
}

#[tokio::test]
async fn test_requests_carry_the_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/9001/space"))
        .and(header("authorization", "pk_test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "spaces": [{ "id": "1", "name": "Engineering" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(Some(server.uri()));
    let credentials = test_credentials();

    let response = client
        .get(&credentials, "/team/9001/space")
        .send()
        .await
        .expect("request should succeed");
    let parsed: SpacesResponse = ApiClient::handle_response(response)
        .await
        .expect("should deserialize");

    assert_eq!(parsed.spaces.len(), 1);
    assert_eq!(parsed.spaces[0].name, "Engineering");
}

#[tokio::test]
async fn test_handle_response_maps_non_success_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/task/nope"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"err":"Task not found","ECODE":"ITEM_013"}"#),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(Some(server.uri()));
    let credentials = test_credentials();

    let response = client
        .get(&credentials, "/task/nope")
        .send()
        .await
        .expect("transport should succeed");
    let result: Result<serde_json::Value, _> = ApiClient::handle_response(response).await;

    match result {
        Err(ClickUpError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("Task not found"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_download_returns_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"pdf-bytes".to_vec()))
        .mount(&server)
        .await;

    let client = ApiClient::new(Some(server.uri()));
    let url = reqwest::Url::parse(&format!("{}/files/report.pdf", server.uri())).unwrap();

    let bytes = client.download(url).await.expect("download should succeed");
    assert_eq!(bytes, b"pdf-bytes");
}

#[tokio::test]
async fn test_download_failure_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/gone.pdf"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let client = ApiClient::new(Some(server.uri()));
    let url = reqwest::Url::parse(&format!("{}/files/gone.pdf", server.uri())).unwrap();

    match client.download(url).await {
        Err(ClickUpError::Api { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Forbidden");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_handle_empty_response_checks_status_only() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/task/abc/tag/urgent"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = ApiClient::new(Some(server.uri()));
    let credentials = test_credentials();

    let response = client
        .post(&credentials, "/task/abc/tag/urgent")
        .send()
        .await
        .expect("transport should succeed");

    ApiClient::handle_empty_response(response)
        .await
        .expect("an empty 200 body should be fine");
}
