//! MCP tools for List lookups.
//!
//! Lists hang off folders or directly off spaces (folderless); the two
//! locations are separate ClickUp endpoints and separate tools here.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
    schemars,
    schemars::JsonSchema,
};
use serde::{Deserialize, Serialize};

use crate::clickup::client::ApiClient;
use crate::mcp::server::McpServer;
use crate::mcp::tools::{map_clickup_error, send};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetListsParams {
    #[schemars(description = "Folder ID to list lists from")]
    pub folder_id: String,
    #[schemars(description = "Include archived lists. Omit to use the ClickUp default.")]
    pub archived: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetFolderlessListsParams {
    #[schemars(description = "Space ID to list folderless lists from")]
    pub space_id: String,
    #[schemars(description = "Include archived lists. Omit to use the ClickUp default.")]
    pub archived: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetListParams {
    #[schemars(description = "List ID")]
    pub list_id: String,
}

// =============================================================================
// List Tools
// =============================================================================

pub async fn get_lists(
    server: &McpServer,
    params: GetListsParams,
) -> Result<CallToolResult, McpError> {
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let mut request = server
        .client
        .get(&credentials, &format!("/folder/{}/list", params.folder_id));
    if let Some(archived) = params.archived {
        request = request.query(&[("archived", archived.to_string())]);
    }

    let response = send(request).await.map_err(map_clickup_error)?;
    let lists: serde_json::Value = ApiClient::handle_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&lists).unwrap(),
    )]))
}

pub async fn get_folderless_lists(
    server: &McpServer,
    params: GetFolderlessListsParams,
) -> Result<CallToolResult, McpError> {
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let mut request = server
        .client
        .get(&credentials, &format!("/space/{}/list", params.space_id));
    if let Some(archived) = params.archived {
        request = request.query(&[("archived", archived.to_string())]);
    }

    let response = send(request).await.map_err(map_clickup_error)?;
    let lists: serde_json::Value = ApiClient::handle_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&lists).unwrap(),
    )]))
}

pub async fn get_list(
    server: &McpServer,
    params: GetListParams,
) -> Result<CallToolResult, McpError> {
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let request = server
        .client
        .get(&credentials, &format!("/list/{}", params.list_id));

    let response = send(request).await.map_err(map_clickup_error)?;
    let list: serde_json::Value = ApiClient::handle_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&list).unwrap(),
    )]))
}
