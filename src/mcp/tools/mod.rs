//! MCP tool implementations
//!
//! One module per ClickUp entity. Tool bodies all follow the same shape:
//! resolve credentials, issue a single API request, return the response
//! as one text content item.

pub mod folders;
pub mod lists;
pub mod spaces;
pub mod tasks;
pub mod workspace;

#[cfg(test)]
mod folders_test;
#[cfg(test)]
mod workspace_test;

use rmcp::ErrorData as McpError;

use crate::clickup::error::{ClickUpError, ClickUpResult};

/// Issue a built request, folding transport failures into `ClickUpError`.
pub(crate) async fn send(request: reqwest::RequestBuilder) -> ClickUpResult<reqwest::Response> {
    Ok(request.send().await?)
}

/// Map adapter errors to MCP protocol errors.
///
/// Credential and parameter problems surface as invalid_params so the
/// client knows the call never reached ClickUp. A 404 from the API maps
/// to resource_not_found; everything else is an internal error.
pub(crate) fn map_clickup_error(error: ClickUpError) -> McpError {
    let detail = serde_json::json!({ "error": error.to_string() });
    match error {
        ClickUpError::MissingCredential { .. } => {
            McpError::invalid_params("missing_credentials", Some(detail))
        }
        ClickUpError::InvalidParams { .. } => {
            McpError::invalid_params("invalid_params", Some(detail))
        }
        ClickUpError::InvalidUrl { .. } => {
            McpError::invalid_params("invalid_file_url", Some(detail))
        }
        ClickUpError::Api { status: 404, .. } => {
            McpError::resource_not_found("not_found", Some(detail))
        }
        _ => McpError::internal_error("clickup_api_error", Some(detail)),
    }
}
