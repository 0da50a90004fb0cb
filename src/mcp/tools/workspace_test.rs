//! Tests for the workspace hierarchy tool

use std::env;
use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::RawContent;
use serial_test::serial;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::clickup::client::ApiClient;
use crate::clickup::hierarchy::BranchErrorPolicy;
use crate::credentials::{API_KEY_ENV, PartialCredentials, TEAM_ID_ENV};
use crate::mcp::server::McpServer;
use crate::mcp::tools::workspace::GetWorkspaceHierarchyParams;

fn test_server(uri: &str, branch_policy: BranchErrorPolicy) -> McpServer {
    McpServer::new(
        Arc::new(ApiClient::new(Some(uri.to_string()))),
        PartialCredentials {
            api_key: Some("pk_test_123".to_string()),
            team_id: Some("9001".to_string()),
        },
        branch_policy,
    )
}

async fn mount_workspace(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/team/9001/space"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "spaces": [{"id": "s1", "name": "Engineering"}]
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/space/s1/folder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "folders": [{"id": "f1", "name": "Sprints"}]
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/space/s1/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "lists": [{"id": "l2", "name": "Inbox"}]
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/folder/f1/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "lists": [{"id": "l1", "name": "Sprint 1"}]
        })))
        .mount(mock_server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_workspace_hierarchy_renders_tree() {
    let mock_server = MockServer::start().await;
    mount_workspace(&mock_server).await;

    let server = test_server(&mock_server.uri(), BranchErrorPolicy::default());
    let result = server
        .get_workspace_hierarchy(Parameters(GetWorkspaceHierarchyParams { archived: None }))
        .await
        .expect("get_workspace_hierarchy should succeed");

    let content_text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };

    let expected = "Workspace 9001\n\
                    └── Space: Engineering (id: s1)\n    \
                    ├── Folder: Sprints (id: f1)\n    \
                    │   └── List: Sprint 1 (id: l1)\n    \
                    └── List: Inbox (id: l2)";
    assert_eq!(content_text, expected);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_workspace_hierarchy_strict_policy_propagates_branch_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/9001/space"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "spaces": [{"id": "s1", "name": "Engineering"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/space/s1/folder"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/space/s1/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"lists": []})))
        .mount(&mock_server)
        .await;

    let server = test_server(&mock_server.uri(), BranchErrorPolicy::Fail);
    let result = server
        .get_workspace_hierarchy(Parameters(GetWorkspaceHierarchyParams { archived: None }))
        .await;

    let error = result.expect_err("strict policy must propagate branch failures");
    assert_eq!(error.message, "clickup_api_error");
}

#[tokio::test(flavor = "multi_thread")]
#[serial]
async fn test_get_workspace_hierarchy_missing_credentials_makes_no_request() {
    unsafe {
        env::remove_var(API_KEY_ENV);
        env::remove_var(TEAM_ID_ENV);
    }

    let mock_server = MockServer::start().await;
    let server = McpServer::new(
        Arc::new(ApiClient::new(Some(mock_server.uri()))),
        PartialCredentials::default(),
        BranchErrorPolicy::default(),
    );

    let result = server
        .get_workspace_hierarchy(Parameters(GetWorkspaceHierarchyParams { archived: None }))
        .await;

    assert!(result.is_err());
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
