//! MCP tools for Folder lookups.

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
pub struct GetFoldersParams {
    #[schemars(description = "Space ID to list folders from")]
    pub space_id: String,
    #[schemars(description = "Include archived folders. Omit to use the ClickUp default.")]
    pub archived: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetFolderParams {
    #[schemars(description = "Folder ID")]
    pub folder_id: String,
}

// =============================================================================
// Folder Tools
// =============================================================================

pub async fn get_folders(
    server: &McpServer,
    params: GetFoldersParams,
) -> Result<CallToolResult, McpError> {
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let mut request = server
        .client
        .get(&credentials, &format!("/space/{}/folder", params.space_id));
    if let Some(archived) = params.archived {
        request = request.query(&[("archived", archived.to_string())]);
    }

    let response = send(request).await.map_err(map_clickup_error)?;
    let folders: serde_json::Value = ApiClient::handle_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&folders).unwrap(),
    )]))
}

pub async fn get_folder(
    server: &McpServer,
    params: GetFolderParams,
) -> Result<CallToolResult, McpError> {
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let request = server
        .client
        .get(&credentials, &format!("/folder/{}", params.folder_id));

    let response = send(request).await.map_err(map_clickup_error)?;
    let folder: serde_json::Value = ApiClient::handle_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&folder).unwrap(),
    )]))
}
