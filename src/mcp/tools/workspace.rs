//! Workspace hierarchy tool.
//!
//! The only tool that fans out to multiple API calls; assembly and
//! rendering live in [`crate::clickup::hierarchy`], this module just
//! wires them to the MCP surface.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
    schemars,
    schemars::JsonSchema,
};
use serde::{Deserialize, Serialize};

use crate::clickup::hierarchy::{self, HierarchyOptions};
use crate::mcp::server::McpServer;
use crate::mcp::tools::map_clickup_error;

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetWorkspaceHierarchyParams {
    #[schemars(
        description = "Include archived spaces, folders, and lists. Omit to use the ClickUp default."
    )]
    pub archived: Option<bool>,
}

// =============================================================================
// Workspace Tools
// =============================================================================

pub async fn get_workspace_hierarchy(
    server: &McpServer,
    params: GetWorkspaceHierarchyParams,
) -> Result<CallToolResult, McpError> {
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let options = HierarchyOptions {
        archived: params.archived,
        on_branch_error: server.branch_policy,
    };
    let root = hierarchy::fetch(&server.client, &credentials, options)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        hierarchy::render(&root),
    )]))
}
