//! Folder handlers: CheckFolderInfo, EnumerateChildren, and the file-side
//! EnumerateAncestors.
//!
//! This host exposes a single folder — the storage root. Folder ids are
//! matched case-insensitively against its name.

use axum::extract::{Host, Path, Query, State};
use axum::response::Response;
use serde::Serialize;

use wopihub_core::error::AppError;
use wopihub_core::types::{FileId, FolderId};

use crate::handlers::{file_url, folder_url, require_file, AccessTokenQuery};
use crate::headers;
use crate::response;
use crate::state::AppState;

/// Owner reported for the root folder.
const OWNER_ID: &str = "wopihub";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CheckFolderInfo {
    folder_name: String,
    owner_id: String,
}

/// `GET /wopi/folders/:id` — CheckFolderInfo.
pub async fn check_folder_info(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
) -> Result<Response, AppError> {
    let id = FolderId::parse(&raw_id);
    let user = state.gate.validate(&query.access_token, id.as_str(), false)?;

    let root = state.storage.root().await?;
    if !id.matches(&root.name) {
        return Err(AppError::not_found(format!("Folder Unknown: {id}")));
    }

    tracing::debug!(id = %id, user = %user.name, "CheckFolderInfo");

    Ok(response::json(CheckFolderInfo {
        folder_name: root.name,
        owner_id: OWNER_ID.to_string(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ChildrenResponse {
    children: Vec<Child>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Child {
    name: String,
    version: String,
    url: String,
}

/// `GET /wopi/folders/:id/children` — EnumerateChildren.
///
/// Every child URL embeds a freshly minted access token for that file.
pub async fn enumerate_children(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
    Host(host): Host,
) -> Result<Response, AppError> {
    let id = FolderId::parse(&raw_id);
    let user = state.gate.validate(&query.access_token, id.as_str(), false)?;

    let root = state.storage.root().await?;
    if !id.matches(&root.name) {
        return Err(AppError::not_found(format!("Folder Unknown: {id}")));
    }

    let mut children = Vec::with_capacity(root.children.len());
    for child in root.children {
        let child_id = FileId::parse(&child.name);
        let token = state.minter.mint(&user.name, child_id.as_str())?;
        children.push(Child {
            url: file_url(&host, &child.name, &token),
            name: child.name,
            version: child.version,
        });
    }

    tracing::debug!(id = %id, user = %user.name, count = children.len(), "EnumerateChildren");

    Ok(response::json(ChildrenResponse { children }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct AncestryResponse {
    ancestors_with_root_first: Vec<Ancestor>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Ancestor {
    name: String,
    url: String,
}

/// `GET /wopi/files/:id/ancestry` — EnumerateAncestors.
///
/// The flat namespace has exactly one ancestor, the root; the response is
/// always flagged as incomplete.
pub async fn enumerate_ancestors(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
    Host(host): Host,
) -> Result<Response, AppError> {
    let id = FileId::parse(&raw_id);
    let user = state.gate.validate(&query.access_token, id.as_str(), false)?;
    require_file(&state, &id).await?;

    let root = state.storage.root().await?;

    tracing::debug!(id = %id, user = %user.name, "EnumerateAncestors");

    let body = AncestryResponse {
        ancestors_with_root_first: vec![Ancestor {
            url: folder_url(&host, &root.name),
            name: root.name,
        }],
    };

    Ok(response::with_header(
        response::json(body),
        headers::ENUMERATION_INCOMPLETE,
        "true",
    ))
}
