//! MCP Streamable HTTP service creation
//!
//! This module provides the function to create the MCP service
//! that can be integrated with an Axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::clickup::client::ApiClient;
use crate::clickup::hierarchy::BranchErrorPolicy;
use crate::credentials::PartialCredentials;

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// This function creates a StreamableHttpService that can be nested into an Axum router.
/// Every session gets its own `McpServer` so header and query credentials captured at
/// initialize stay scoped to that session; the API client is shared.
///
/// # Arguments
/// * `client` - Shared ClickUp API client
/// * `process` - Process-level credential tier (CLI flags)
/// * `branch_policy` - Hierarchy behavior when a folder or list fetch fails
/// * `cancellation_token` - Token for graceful shutdown
///
/// # Returns
/// A StreamableHttpService that implements tower::Service
///
/// # Example
/// ```no_run
/// use axum::Router;
/// use std::sync::Arc;
/// use tokio_util::sync::CancellationToken;
/// # use clickup_mcp::clickup::ApiClient;
/// # use clickup_mcp::clickup::hierarchy::BranchErrorPolicy;
/// # use clickup_mcp::credentials::PartialCredentials;
/// # use clickup_mcp::mcp::create_mcp_service;
///
/// let ct = CancellationToken::new();
/// let client = Arc::new(ApiClient::new(None));
/// let mcp_service = create_mcp_service(
///     client,
///     PartialCredentials::default(),
///     BranchErrorPolicy::default(),
///     ct,
/// );
///
/// let app: Router = Router::new()
///     .nest_service("/mcp", mcp_service);
/// ```
pub fn create_mcp_service(
    client: Arc<ApiClient>,
    process: PartialCredentials,
    branch_policy: BranchErrorPolicy,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer, LocalSessionManager> {
    // Service factory: creates new McpServer instance per session
    // Note: Returns io::Error to match rmcp's expected signature
    let service_factory = move || -> Result<McpServer, std::io::Error> {
        let server = McpServer::new(Arc::clone(&client), process.clone(), branch_policy);
        Ok(server)
    };

    // Configure Streamable HTTP server
    // (field-by-field: StreamableHttpServerConfig is #[non_exhaustive])
    let mut config = StreamableHttpServerConfig::default();
    config.sse_keep_alive = None; // Use default (15s)
    config.sse_retry = None; // Use default retry behavior
    config.stateful_mode = true; // Enable session management
    config.cancellation_token = cancellation_token;

    // Create service with local session manager
    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
