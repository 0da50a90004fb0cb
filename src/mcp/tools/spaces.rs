//! MCP tools for Space discovery.

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
pub struct GetSpacesParams {
    #[schemars(description = "Include archived spaces. Omit to use the ClickUp default.")]
    pub archived: Option<bool>,
}

// =============================================================================
// Space Tools
// =============================================================================

pub async fn get_spaces(
    server: &McpServer,
    params: GetSpacesParams,
) -> Result<CallToolResult, McpError> {
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let mut request = server
        .client
        .get(&credentials, &format!("/team/{}/space", credentials.team_id));
    if let Some(archived) = params.archived {
        request = request.query(&[("archived", archived.to_string())]);
    }

    let response = send(request).await.map_err(map_clickup_error)?;
    let spaces: serde_json::Value = ApiClient::handle_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&spaces).unwrap(),
    )]))
}
