//! MCP tools for Task management.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
    schemars,
    schemars::JsonSchema,
};
use serde::{Deserialize, Serialize};

use crate::clickup::client::ApiClient;
use crate::clickup::error::{ClickUpError, ClickUpResult};
use crate::clickup::types::{CreateTaskRequest, UpdateTaskRequest};
use crate::mcp::server::McpServer;
use crate::mcp::tools::{map_clickup_error, send};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTaskParams {
    #[schemars(description = "Task ID")]
    pub task_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    #[schemars(description = "List ID the task is created in. Use get_lists or get_folderless_lists to find one.")]
    pub list_id: String,
    #[schemars(description = "Task name")]
    pub name: String,
    #[schemars(description = "Task description (optional)")]
    pub description: Option<String>,
    #[schemars(description = "Status name as configured in ClickUp, e.g. 'to do' or 'in progress' (optional)")]
    pub status: Option<String>,
    #[schemars(description = "Priority: 1 (urgent) to 4 (low) (optional)")]
    pub priority: Option<u8>,
    #[schemars(description = "Due date as a unix timestamp in milliseconds (optional)")]
    pub due_date: Option<i64>,
    #[schemars(description = "Time estimate in milliseconds (optional)")]
    pub time_estimate: Option<i64>,
    #[schemars(description = "Assignee user IDs (optional)")]
    pub assignees: Option<Vec<u64>>,
    #[schemars(description = "Tag names to apply on creation (optional)")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    #[schemars(description = "Task ID to update")]
    pub task_id: String,
    #[schemars(description = "New task name (optional)")]
    pub name: Option<String>,
    #[schemars(description = "New description (optional)")]
    pub description: Option<String>,
    #[schemars(description = "New status name (optional)")]
    pub status: Option<String>,
    #[schemars(description = "Priority: 1 (urgent) to 4 (low) (optional)")]
    pub priority: Option<u8>,
    #[schemars(description = "Due date as a unix timestamp in milliseconds (optional)")]
    pub due_date: Option<i64>,
    #[schemars(description = "Time estimate in milliseconds (optional)")]
    pub time_estimate: Option<i64>,
    #[schemars(description = "Assignee user IDs; replaces the current assignees (optional)")]
    pub assignees: Option<Vec<u64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetWorkspaceTasksParams {
    #[schemars(description = "Include archived tasks")]
    pub archived: Option<bool>,
    #[schemars(description = "Page to fetch (starts at 0)")]
    pub page: Option<u32>,
    #[schemars(description = "Field to order by: id, created, updated, or due_date")]
    pub order_by: Option<String>,
    #[schemars(description = "Reverse the sort order")]
    pub reverse: Option<bool>,
    #[schemars(description = "Include subtasks")]
    pub subtasks: Option<bool>,
    #[schemars(description = "Include closed tasks")]
    pub include_closed: Option<bool>,
    #[schemars(description = "Filter by status names")]
    pub statuses: Option<Vec<String>>,
    #[schemars(description = "Filter by assignee user IDs")]
    pub assignees: Option<Vec<u64>>,
    #[schemars(description = "Filter by tag names")]
    pub tags: Option<Vec<String>>,
    #[schemars(description = "Restrict to these list IDs")]
    pub list_ids: Option<Vec<String>>,
    #[schemars(description = "Restrict to these folder IDs")]
    pub folder_ids: Option<Vec<String>>,
    #[schemars(description = "Restrict to these space IDs")]
    pub space_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddTagToTaskParams {
    #[schemars(description = "Task ID")]
    pub task_id: String,
    #[schemars(description = "Tag name. The tag must already exist in the task's space.")]
    pub tag_name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RemoveTagFromTaskParams {
    #[schemars(description = "Task ID")]
    pub task_id: String,
    #[schemars(description = "Tag name to remove")]
    pub tag_name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AttachFileToTaskParams {
    #[schemars(description = "Task ID")]
    pub task_id: String,
    #[schemars(description = "Absolute http(s) URL of the file to download and attach")]
    pub file_url: String,
    #[schemars(
        description = "File name for the attachment; defaults to the last path segment of the URL (optional)"
    )]
    pub file_name: Option<String>,
}

// =============================================================================
// Task Tools
// =============================================================================

pub async fn get_task(
    server: &McpServer,
    params: GetTaskParams,
) -> Result<CallToolResult, McpError> {
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let request = server
        .client
        .get(&credentials, &format!("/task/{}", params.task_id));

    let response = send(request).await.map_err(map_clickup_error)?;
    let task: serde_json::Value = ApiClient::handle_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&task).unwrap(),
    )]))
}

pub async fn create_task(
    server: &McpServer,
    params: CreateTaskParams,
) -> Result<CallToolResult, McpError> {
    validate_priority(params.priority).map_err(map_clickup_error)?;
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let body = CreateTaskRequest {
        name: params.name,
        description: params.description,
        status: params.status,
        priority: params.priority,
        due_date: params.due_date,
        time_estimate: params.time_estimate,
        assignees: params.assignees,
        tags: params.tags,
    };

    let request = server
        .client
        .post(&credentials, &format!("/list/{}/task", params.list_id))
        .json(&body);

    let response = send(request).await.map_err(map_clickup_error)?;
    let task: serde_json::Value = ApiClient::handle_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&task).unwrap(),
    )]))
}

pub async fn update_task(
    server: &McpServer,
    params: UpdateTaskParams,
) -> Result<CallToolResult, McpError> {
    validate_priority(params.priority).map_err(map_clickup_error)?;
    let credentials = server.credentials().map_err(map_clickup_error)?;

    // Only fields the caller provided end up in the body; ClickUp leaves
    // everything absent untouched.
    let body = UpdateTaskRequest {
        name: params.name,
        description: params.description,
        status: params.status,
        priority: params.priority,
        due_date: params.due_date,
        time_estimate: params.time_estimate,
        assignees: params.assignees,
    };

    let request = server
        .client
        .put(&credentials, &format!("/task/{}", params.task_id))
        .json(&body);

    let response = send(request).await.map_err(map_clickup_error)?;
    let task: serde_json::Value = ApiClient::handle_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&task).unwrap(),
    )]))
}

pub async fn get_workspace_tasks(
    server: &McpServer,
    params: GetWorkspaceTasksParams,
) -> Result<CallToolResult, McpError> {
    let credentials = server.credentials().map_err(map_clickup_error)?;

    // ClickUp's filtered team endpoint takes repeated `key[]` parameters
    // for the list-valued filters.
    let mut query: Vec<(String, String)> = Vec::new();
    if let Some(archived) = params.archived {
        query.push(("archived".to_string(), archived.to_string()));
    }
    if let Some(page) = params.page {
        query.push(("page".to_string(), page.to_string()));
    }
    if let Some(order_by) = params.order_by {
        query.push(("order_by".to_string(), order_by));
    }
    if let Some(reverse) = params.reverse {
        query.push(("reverse".to_string(), reverse.to_string()));
    }
    if let Some(subtasks) = params.subtasks {
        query.push(("subtasks".to_string(), subtasks.to_string()));
    }
    if let Some(include_closed) = params.include_closed {
        query.push(("include_closed".to_string(), include_closed.to_string()));
    }
    for status in params.statuses.into_iter().flatten() {
        query.push(("statuses[]".to_string(), status));
    }
    for assignee in params.assignees.into_iter().flatten() {
        query.push(("assignees[]".to_string(), assignee.to_string()));
    }
    for tag in params.tags.into_iter().flatten() {
        query.push(("tags[]".to_string(), tag));
    }
    for list_id in params.list_ids.into_iter().flatten() {
        query.push(("list_ids[]".to_string(), list_id));
    }
    for folder_id in params.folder_ids.into_iter().flatten() {
        query.push(("folder_ids[]".to_string(), folder_id));
    }
    for space_id in params.space_ids.into_iter().flatten() {
        query.push(("space_ids[]".to_string(), space_id));
    }

    let request = server
        .client
        .get(&credentials, &format!("/team/{}/task", credentials.team_id))
        .query(&query);

    let response = send(request).await.map_err(map_clickup_error)?;
    let tasks: serde_json::Value = ApiClient::handle_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&tasks).unwrap(),
    )]))
}

pub async fn add_tag_to_task(
    server: &McpServer,
    params: AddTagToTaskParams,
) -> Result<CallToolResult, McpError> {
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let request = server.client.post(
        &credentials,
        &format!(
            "/task/{}/tag/{}",
            params.task_id,
            urlencoding::encode(&params.tag_name)
        ),
    );

    let response = send(request).await.map_err(map_clickup_error)?;
    ApiClient::handle_empty_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(format!(
        "Tag \"{}\" added to task {}",
        params.tag_name, params.task_id
    ))]))
}

pub async fn remove_tag_from_task(
    server: &McpServer,
    params: RemoveTagFromTaskParams,
) -> Result<CallToolResult, McpError> {
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let request = server.client.delete(
        &credentials,
        &format!(
            "/task/{}/tag/{}",
            params.task_id,
            urlencoding::encode(&params.tag_name)
        ),
    );

    let response = send(request).await.map_err(map_clickup_error)?;
    ApiClient::handle_empty_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(format!(
        "Tag \"{}\" removed from task {}",
        params.tag_name, params.task_id
    ))]))
}

pub async fn attach_file_to_task(
    server: &McpServer,
    params: AttachFileToTaskParams,
) -> Result<CallToolResult, McpError> {
    let url = reqwest::Url::parse(&params.file_url).map_err(|_| {
        map_clickup_error(ClickUpError::InvalidUrl {
            url: params.file_url.clone(),
        })
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(map_clickup_error(ClickUpError::InvalidUrl {
            url: params.file_url.clone(),
        }));
    }
    let credentials = server.credentials().map_err(map_clickup_error)?;

    let file_name = params
        .file_name
        .or_else(|| {
            url.path_segments()
                .and_then(|segments| segments.last())
                .filter(|segment| !segment.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| "attachment".to_string());

    let data = server.client.download(url).await.map_err(map_clickup_error)?;
    let mime = mime_guess::from_path(&file_name).first_or_octet_stream();

    let part = reqwest::multipart::Part::bytes(data)
        .file_name(file_name)
        .mime_str(mime.essence_str())
        .map_err(|e| map_clickup_error(e.into()))?;
    let form = reqwest::multipart::Form::new().part("attachment", part);

    let request = server
        .client
        .post(&credentials, &format!("/task/{}/attachment", params.task_id))
        .multipart(form);

    let response = send(request).await.map_err(map_clickup_error)?;
    let attachment: serde_json::Value = ApiClient::handle_response(response)
        .await
        .map_err(map_clickup_error)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&attachment).unwrap(),
    )]))
}

/// ClickUp priorities run 1 (urgent) through 4 (low).
fn validate_priority(priority: Option<u8>) -> ClickUpResult<()> {
    match priority {
        Some(p) if !(1..=4).contains(&p) => Err(ClickUpError::InvalidParams {
            message: format!("priority must be between 1 and 4, got {}", p),
        }),
        _ => Ok(()),
    }
}
