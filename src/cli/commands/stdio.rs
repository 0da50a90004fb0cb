//! stdio transport command.

use std::sync::Arc;

use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::info;

use crate::cli::error::{CliError, CliResult};
use crate::clickup::client::ApiClient;
use crate::clickup::hierarchy::BranchErrorPolicy;
use crate::credentials::PartialCredentials;
use crate::mcp::McpServer;

pub async fn run(
    client: Arc<ApiClient>,
    process: PartialCredentials,
    branch_policy: BranchErrorPolicy,
) -> CliResult<()> {
    info!("Starting MCP server on stdio");

    let service = McpServer::new(client, process, branch_policy);
    let server = service
        .serve(stdio())
        .await
        .map_err(|e| CliError::Stdio {
            message: e.to_string(),
        })?;

    let quit_reason = server.waiting().await.map_err(|e| CliError::Stdio {
        message: e.to_string(),
    })?;
    info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}
