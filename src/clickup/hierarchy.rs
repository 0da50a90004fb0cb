//! Workspace hierarchy assembly and tree rendering.
//!
//! Fan-out shape: one spaces fetch, then per space a concurrent
//! folders/folderless-lists pair, then one lists fetch per folder. The
//! spaces fetch failing fails the whole call; every deeper fetch is
//! governed by `BranchErrorPolicy`.

use futures_util::future::join_all;
use tracing::warn;

use crate::clickup::client::ApiClient;
use crate::clickup::error::ClickUpResult;
use crate::clickup::types::{Folder, FoldersResponse, ListsResponse, SpacesResponse, TaskList};
use crate::credentials::Credentials;

/// Policy for folder- and list-level fetch failures during assembly.
///
/// The spaces fetch sits above this policy and always fails the call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BranchErrorPolicy {
    /// Log a warning and render the failed branch as empty.
    #[default]
    EmptyBranch,
    /// Abort the whole call on the first failed branch.
    Fail,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyOptions {
    /// Forwarded as the `archived` query parameter on every fetch when
    /// set; omitted from the query string when `None`.
    pub archived: Option<bool>,
    pub on_branch_error: BranchErrorPolicy,
}

/// One line of the rendered tree: a label plus ordered children.
///
/// Children keep remote iteration order; nothing is re-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    pub label: String,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }
}

/// Assemble the containment tree Workspace → Space → Folder → List.
///
/// Folderless lists hang directly off their space, after the folders.
/// Each space's two child fetches run concurrently, as do the per-folder
/// list fetches; a folder's lists are never requested before the folder
/// itself is known.
pub async fn fetch(
    client: &ApiClient,
    credentials: &Credentials,
    options: HierarchyOptions,
) -> ClickUpResult<HierarchyNode> {
    let mut request = client.get(
        credentials,
        &format!("/team/{}/space", credentials.team_id),
    );
    if let Some(archived) = options.archived {
        request = request.query(&[("archived", archived.to_string())]);
    }
    let response = request.send().await?;
    let spaces: SpacesResponse = ApiClient::handle_response(response).await?;

    let mut root = HierarchyNode::new(format!("Workspace {}", credentials.team_id));

    for space in spaces.spaces {
        let (folders, folderless) = tokio::join!(
            fetch_folders(client, credentials, &space.id, options.archived),
            fetch_space_lists(client, credentials, &space.id, options.archived),
        );
        let folders = soften(folders, "folders", &space.id, options.on_branch_error)?;
        let folderless = soften(
            folderless,
            "folderless lists",
            &space.id,
            options.on_branch_error,
        )?;

        let lists_per_folder = join_all(
            folders
                .iter()
                .map(|folder| fetch_folder_lists(client, credentials, &folder.id, options.archived)),
        )
        .await;

        let mut space_node =
            HierarchyNode::new(format!("Space: {} (id: {})", space.name, space.id));
        for (folder, lists) in folders.iter().zip(lists_per_folder) {
            let lists = soften(lists, "lists", &folder.id, options.on_branch_error)?;
            let mut folder_node =
                HierarchyNode::new(format!("Folder: {} (id: {})", folder.name, folder.id));
            folder_node.children = lists.into_iter().map(list_node).collect();
            space_node.children.push(folder_node);
        }
        space_node
            .children
            .extend(folderless.into_iter().map(list_node));
        root.children.push(space_node);
    }

    Ok(root)
}

/// Render the tree as an indented glyph block.
///
/// Last siblings get `└── ` with blank continuation spacing underneath,
/// all others `├── ` with `│   `. One recursion serves every level.
/// No trailing newline after the final line.
pub fn render(root: &HierarchyNode) -> String {
    let mut out = root.label.clone();
    render_children(&root.children, "", &mut out);
    out
}

fn render_children(children: &[HierarchyNode], prefix: &str, out: &mut String) {
    for (index, child) in children.iter().enumerate() {
        let last = index + 1 == children.len();
        let (branch, continuation) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push('\n');
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&child.label);
        render_children(&child.children, &format!("{}{}", prefix, continuation), out);
    }
}

fn list_node(list: TaskList) -> HierarchyNode {
    HierarchyNode::new(format!("List: {} (id: {})", list.name, list.id))
}

/// The single point where a branch fetch failure is either degraded to an
/// empty branch or propagated, per the configured policy.
fn soften<T>(
    result: ClickUpResult<Vec<T>>,
    what: &str,
    parent_id: &str,
    policy: BranchErrorPolicy,
) -> ClickUpResult<Vec<T>> {
    match result {
        Ok(items) => Ok(items),
        Err(error) => match policy {
            BranchErrorPolicy::EmptyBranch => {
                warn!(
                    "Fetching {} for {} failed, rendering branch as empty: {}",
                    what, parent_id, error
                );
                Ok(Vec::new())
            }
            BranchErrorPolicy::Fail => Err(error),
        },
    }
}

async fn fetch_folders(
    client: &ApiClient,
    credentials: &Credentials,
    space_id: &str,
    archived: Option<bool>,
) -> ClickUpResult<Vec<Folder>> {
    let mut request = client.get(credentials, &format!("/space/{}/folder", space_id));
    if let Some(archived) = archived {
        request = request.query(&[("archived", archived.to_string())]);
    }
    let response = request.send().await?;
    let folders: FoldersResponse = ApiClient::handle_response(response).await?;
    Ok(folders.folders)
}

async fn fetch_space_lists(
    client: &ApiClient,
    credentials: &Credentials,
    space_id: &str,
    archived: Option<bool>,
) -> ClickUpResult<Vec<TaskList>> {
    let mut request = client.get(credentials, &format!("/space/{}/list", space_id));
    if let Some(archived) = archived {
        request = request.query(&[("archived", archived.to_string())]);
    }
    let response = request.send().await?;
    let lists: ListsResponse = ApiClient::handle_response(response).await?;
    Ok(lists.lists)
}

async fn fetch_folder_lists(
    client: &ApiClient,
    credentials: &Credentials,
    folder_id: &str,
    archived: Option<bool>,
) -> ClickUpResult<Vec<TaskList>> {
    let mut request = client.get(credentials, &format!("/folder/{}/list", folder_id));
    if let Some(archived) = archived {
        request = request.query(&[("archived", archived.to_string())]);
    }
    let response = request.send().await?;
    let lists: ListsResponse = ApiClient::handle_response(response).await?;
    Ok(lists.lists)
}
