//! MCP server implementation
//!
//! One `McpServer` per session. The tool surface is a flat router of
//! thin wrappers; the bodies live in [`super::tools`], one module per
//! ClickUp entity.

use std::sync::{Arc, RwLock};

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, InitializeRequestParam, ServerCapabilities, ServerInfo},
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::clickup::client::ApiClient;
use crate::clickup::error::ClickUpResult;
use crate::clickup::hierarchy::BranchErrorPolicy;
use crate::credentials::{self, CredentialOverrides, Credentials, PartialCredentials};

use super::tools;
use super::tools::folders::{GetFolderParams, GetFoldersParams};
use super::tools::lists::{GetFolderlessListsParams, GetListParams, GetListsParams};
use super::tools::spaces::GetSpacesParams;
use super::tools::tasks::{
    AddTagToTaskParams, AttachFileToTaskParams, CreateTaskParams, GetTaskParams,
    GetWorkspaceTasksParams, RemoveTagFromTaskParams, UpdateTaskParams,
};
use super::tools::workspace::GetWorkspaceHierarchyParams;

/// Main MCP server.
///
/// Holds the shared API client plus the credential tiers: header and
/// query values are captured when the session initializes over HTTP,
/// the process tier (CLI flags, then environment) rides along from
/// startup. Resolution happens fresh on every tool call.
#[derive(Clone)]
pub struct McpServer {
    pub(crate) client: Arc<ApiClient>,
    pub(crate) branch_policy: BranchErrorPolicy,
    process: PartialCredentials,
    overrides: Arc<RwLock<CredentialOverrides>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl McpServer {
    pub fn new(
        client: Arc<ApiClient>,
        process: PartialCredentials,
        branch_policy: BranchErrorPolicy,
    ) -> Self {
        Self {
            client,
            branch_policy,
            process,
            overrides: Arc::new(RwLock::new(CredentialOverrides::default())),
            tool_router: Self::tool_router(),
        }
    }

    /// Resolve credentials for one call: session tiers first, then CLI
    /// flags, then environment.
    pub(crate) fn credentials(&self) -> ClickUpResult<Credentials> {
        let overrides = self
            .overrides
            .read()
            .expect("credential overrides lock poisoned")
            .clone();
        let process = self.process.clone().or(credentials::from_env());
        credentials::resolve(&overrides, &process)
    }

    // ------------------------------------------------------------------
    // Spaces
    // ------------------------------------------------------------------

    #[tool(description = "List all spaces in the workspace. Set archived=true to include archived spaces.")]
    pub async fn get_spaces(
        &self,
        params: Parameters<GetSpacesParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::spaces::get_spaces(self, params.0).await
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    #[tool(description = "Get a task by ID with full details including status, assignees, and tags.")]
    pub async fn get_task(
        &self,
        params: Parameters<GetTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::tasks::get_task(self, params.0).await
    }

    #[tool(
        description = "Create a new task in a list. Requires list_id and name; description, status, priority (1 urgent to 4 low), due_date, time_estimate, assignees, and tags are optional."
    )]
    pub async fn create_task(
        &self,
        params: Parameters<CreateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::tasks::create_task(self, params.0).await
    }

    #[tool(
        description = "Update a task. Only the provided fields are sent to ClickUp; everything else stays untouched. Priority runs 1 (urgent) to 4 (low)."
    )]
    pub async fn update_task(
        &self,
        params: Parameters<UpdateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::tasks::update_task(self, params.0).await
    }

    #[tool(
        description = "List tasks across the whole workspace with optional filters: statuses, assignees, tags, lists, folders, spaces, pagination, and ordering."
    )]
    pub async fn get_workspace_tasks(
        &self,
        params: Parameters<GetWorkspaceTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::tasks::get_workspace_tasks(self, params.0).await
    }

    #[tool(description = "Add an existing tag to a task. The tag must already exist in the task's space.")]
    pub async fn add_tag_to_task(
        &self,
        params: Parameters<AddTagToTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::tasks::add_tag_to_task(self, params.0).await
    }

    #[tool(description = "Remove a tag from a task.")]
    pub async fn remove_tag_from_task(
        &self,
        params: Parameters<RemoveTagFromTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::tasks::remove_tag_from_task(self, params.0).await
    }

    #[tool(
        description = "Download a file from an http(s) URL and attach it to a task. file_name defaults to the last URL path segment."
    )]
    pub async fn attach_file_to_task(
        &self,
        params: Parameters<AttachFileToTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::tasks::attach_file_to_task(self, params.0).await
    }

    // ------------------------------------------------------------------
    // Folders
    // ------------------------------------------------------------------

    #[tool(description = "List the folders in a space.")]
    pub async fn get_folders(
        &self,
        params: Parameters<GetFoldersParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::folders::get_folders(self, params.0).await
    }

    #[tool(description = "Get a folder by ID.")]
    pub async fn get_folder(
        &self,
        params: Parameters<GetFolderParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::folders::get_folder(self, params.0).await
    }

    // ------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------

    #[tool(description = "List the lists in a folder.")]
    pub async fn get_lists(
        &self,
        params: Parameters<GetListsParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::lists::get_lists(self, params.0).await
    }

    #[tool(description = "List the lists attached directly to a space, outside any folder.")]
    pub async fn get_folderless_lists(
        &self,
        params: Parameters<GetFolderlessListsParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::lists::get_folderless_lists(self, params.0).await
    }

    #[tool(description = "Get a list by ID.")]
    pub async fn get_list(
        &self,
        params: Parameters<GetListParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::lists::get_list(self, params.0).await
    }

    // ------------------------------------------------------------------
    // Workspace
    // ------------------------------------------------------------------

    #[tool(
        description = "Render the whole workspace as an indented tree: spaces, folders, and lists with their ids. Branches that fail to load render as empty."
    )]
    pub async fn get_workspace_hierarchy(
        &self,
        params: Parameters<GetWorkspaceHierarchyParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::workspace::get_workspace_hierarchy(self, params.0).await
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<ServerInfo, McpError> {
        if context.peer.peer_info().is_none() {
            context.peer.set_peer_info(request);
        }

        // On the HTTP transport the request parts ride along in the
        // context extensions; stdio has none and resolution falls
        // through to the process tier.
        if let Some(parts) = context.extensions.get::<axum::http::request::Parts>() {
            let overrides = CredentialOverrides::from_request_parts(parts);
            tracing::debug!(
                "session credentials captured (header tier set: {}, query tier set: {})",
                !overrides.header.is_empty(),
                !overrides.query.is_empty()
            );
            *self
                .overrides
                .write()
                .expect("credential overrides lock poisoned") = overrides;
        }

        Ok(self.get_info())
    }

    fn get_info(&self) -> ServerInfo {
        // Field-by-field: ServerInfo is #[non_exhaustive]
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(
            "ClickUp MCP server - query and update tasks, spaces, folders, and lists in a ClickUp workspace".to_string(),
        );
        info
    }
}
