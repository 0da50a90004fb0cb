//! Tests for Folder MCP tools

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::RawContent;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::clickup::client::ApiClient;
use crate::clickup::hierarchy::BranchErrorPolicy;
use crate::credentials::PartialCredentials;
use crate::mcp::server::McpServer;
use crate::mcp::tools::folders::{GetFolderParams, GetFoldersParams};

fn test_server(uri: &str) -> McpServer {
    McpServer::new(
        Arc::new(ApiClient::new(Some(uri.to_string()))),
        PartialCredentials {
            api_key: Some("pk_test_123".to_string()),
            team_id: Some("9001".to_string()),
        },
        BranchErrorPolicy::default(),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_folders_lists_space_folders() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/space/s1/folder"))
        .and(header("authorization", "pk_test_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "folders": [{"id": "f1", "name": "Sprints"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = test_server(&mock_server.uri());
    let result = server
        .get_folders(Parameters(GetFoldersParams {
            space_id: "s1".to_string(),
            archived: None,
        }))
        .await
        .expect("get_folders should succeed");

    let content_text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };
    let json: serde_json::Value = serde_json::from_str(content_text).unwrap();
    assert_eq!(json["folders"][0]["name"], "Sprints");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_folders_includes_archived_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/space/s1/folder"))
        .and(query_param("archived", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"folders": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = test_server(&mock_server.uri());
    server
        .get_folders(Parameters(GetFoldersParams {
            space_id: "s1".to_string(),
            archived: Some(false),
        }))
        .await
        .expect("get_folders should succeed");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_folder_returns_folder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/folder/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "f1",
            "name": "Sprints",
            "space": {"id": "s1"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = test_server(&mock_server.uri());
    let result = server
        .get_folder(Parameters(GetFolderParams {
            folder_id: "f1".to_string(),
        }))
        .await
        .expect("get_folder should succeed");

    let content_text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };
    let json: serde_json::Value = serde_json::from_str(content_text).unwrap();
    assert_eq!(json["id"], "f1");
    assert_eq!(json["space"]["id"], "s1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_folder_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/folder/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "err": "Folder not found"
        })))
        .mount(&mock_server)
        .await;

    let server = test_server(&mock_server.uri());
    let result = server
        .get_folder(Parameters(GetFolderParams {
            folder_id: "missing".to_string(),
        }))
        .await;

    let error = result.expect_err("a 404 must surface as an error");
    assert_eq!(error.message, "not_found");
}
