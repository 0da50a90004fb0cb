//! Streamable HTTP transport command.

use std::net::IpAddr;
use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::cli::error::{CliError, CliResult};
use crate::clickup::client::ApiClient;
use crate::clickup::hierarchy::BranchErrorPolicy;
use crate::credentials::PartialCredentials;
use crate::mcp::create_mcp_service;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[instrument]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Build the HTTP router: the MCP service under /mcp plus a health probe.
pub(crate) fn build_router(
    client: Arc<ApiClient>,
    process: PartialCredentials,
    branch_policy: BranchErrorPolicy,
    cancellation_token: CancellationToken,
) -> Router {
    let mcp_service = create_mcp_service(client, process, branch_policy, cancellation_token);

    Router::new()
        .route("/health", get(health))
        .nest_service("/mcp", mcp_service)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(
    client: Arc<ApiClient>,
    process: PartialCredentials,
    branch_policy: BranchErrorPolicy,
    host: IpAddr,
    port: u16,
) -> CliResult<()> {
    let ct = CancellationToken::new();
    let app = build_router(client, process, branch_policy, ct.clone());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| CliError::BindFailed {
            addr: addr.clone(),
            source,
        })?;
    info!("MCP server listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(ct))
        .await
        .map_err(CliError::Serve)?;

    Ok(())
}

/// Resolves on ctrl-c and cancels open MCP sessions before axum drains.
async fn shutdown_signal(ct: CancellationToken) {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
    ct.cancel();
}
