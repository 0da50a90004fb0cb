//! Model Context Protocol (MCP) server implementation
//!
//! The server speaks two transports: Streamable HTTP (nested into an
//! Axum router) and stdio. Both run the same [`McpServer`], which owns
//! the tool router and the per-session credential tiers.
//!
//! # Layout
//!
//! - **server**: `McpServer`, the tool router, and session initialization
//! - **service**: Streamable HTTP service factory for Axum
//! - **tools**: Tool bodies, one module per ClickUp entity
//!   - spaces: Space discovery
//!   - tasks: Task CRUD, workspace-wide filters, tags, attachments
//!   - folders: Folder lookups
//!   - lists: Folder and folderless list lookups
//!   - workspace: The assembled hierarchy tree

pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
mod service_test;

pub use server::McpServer;
pub use service::create_mcp_service;
