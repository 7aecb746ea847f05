//! File metadata, contents, delete, and rename handlers.

use axum::body::Body;
use axum::extract::{Host, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Serialize;

use wopihub_core::error::AppError;
use wopihub_core::types::FileId;

use crate::handlers::{folder_url, require_file, AccessTokenQuery};
use crate::headers;
use crate::locks::LockOutcome;
use crate::parser;
use crate::response;
use crate::state::AppState;

/// Owner reported for every file; this host has no per-file ownership.
const OWNER_ID: &str = "wopihub";

/// Metadata document returned by CheckFileInfo.
///
/// Field names are the WOPI wire contract; do not rename.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CheckFileInfo {
    base_file_name: String,
    size: i32,
    version: String,
    owner_id: String,
    user_id: String,
    user_friendly_name: String,
    user_principal_name: String,
    file_extension: String,
    read_only: bool,
    user_can_write: bool,
    supports_locks: bool,
    supports_update: bool,
    supports_get_lock: bool,
    supports_extended_lock_length: bool,
    supports_rename: bool,
    user_can_rename: bool,
    supports_folders: bool,
    supports_secure_store: bool,
    supports_scenario_links: bool,
    supports_user_info: bool,
    supports_add_activities: bool,
    user_can_not_write_relative: bool,
    supported_share_url_types: Vec<String>,
    breadcrumb_brand_name: String,
    breadcrumb_brand_url: String,
    breadcrumb_doc_name: String,
    breadcrumb_folder_name: String,
    breadcrumb_folder_url: String,
    user_info: String,
}

/// `GET /wopi/files/:id` — CheckFileInfo.
pub async fn check_file_info(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
    Host(host): Host,
) -> Result<Response, AppError> {
    let id = FileId::parse(&raw_id);
    let user = state.gate.validate(&query.access_token, id.as_str(), false)?;

    let Some(size) = state.storage.size(&id).await? else {
        return Err(AppError::not_found(format!("File Unknown: {id}")));
    };
    let version = state.storage.version(&id).await?;
    let read_only = state.storage.read_only(&id).await?;
    let root = state.storage.root().await?;

    tracing::debug!(id = %id, user = %user.name, "CheckFileInfo");

    let info = CheckFileInfo {
        base_file_name: id.to_string(),
        size: size as i32,
        version,
        owner_id: OWNER_ID.to_string(),
        user_id: user.name.clone(),
        user_friendly_name: user.name.clone(),
        user_principal_name: user.name.clone(),
        file_extension: id.extension().to_string(),
        read_only,
        user_can_write: !read_only,
        supports_locks: true,
        supports_update: true,
        supports_get_lock: true,
        supports_extended_lock_length: true,
        supports_rename: true,
        user_can_rename: true,
        supports_folders: true,
        supports_secure_store: true,
        supports_scenario_links: true,
        supports_user_info: true,
        supports_add_activities: true,
        user_can_not_write_relative: false,
        supported_share_url_types: vec!["ReadOnly".to_string(), "ReadWrite".to_string()],
        breadcrumb_brand_name: state.config.server.brand.clone(),
        breadcrumb_brand_url: format!("http://{host}/"),
        breadcrumb_doc_name: id.to_string(),
        breadcrumb_folder_name: root.name.clone(),
        breadcrumb_folder_url: folder_url(&host, &root.name),
        user_info: state.user_info.get(&user.name).unwrap_or_default(),
    };

    Ok(response::json(info))
}

/// `GET /wopi/files/:id/contents` — GetFile.
pub async fn get_file(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
) -> Result<Response, AppError> {
    let id = FileId::parse(&raw_id);
    let user = state.gate.validate(&query.access_token, id.as_str(), false)?;

    let stream = state.storage.open(&id).await?;

    tracing::debug!(id = %id, user = %user.name, "GetFile");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}

/// `POST /wopi/files/:id/contents` — PutFile.
pub async fn put_file(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
    req_headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let id = FileId::parse(&raw_id);
    let user = state.gate.validate(&query.access_token, id.as_str(), true)?;
    require_file(&state, &id).await?;

    let presented = parser::header_str(&req_headers, headers::LOCK);

    // The decision is made under the table mutex; the mutex does not span
    // the storage write, so a lock taken in between can interleave.
    match state.locks.check_write(&id, presented) {
        LockOutcome::Ok => {}
        LockOutcome::Mismatch { current } => {
            tracing::debug!(id = %id, "PutFile rejected, lock mismatch");
            return Ok(response::lock_mismatch(&current));
        }
        LockOutcome::NotLocked => {}
    }

    let written = state.storage.upload(&id, body).await?;
    let version = state.storage.version(&id).await?;

    tracing::info!(id = %id, user = %user.name, bytes = written, "PutFile");

    Ok(response::with_header(
        response::ok(),
        headers::ITEM_VERSION,
        &version,
    ))
}

/// `POST /wopi/files/:id` with `X-WOPI-Override: DELETE` — DeleteFile.
pub async fn delete_file(
    state: &AppState,
    id: &FileId,
    token: &str,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), true)?;
    require_file(state, id).await?;

    if let Some(current) = state.locks.current(id) {
        tracing::debug!(id = %id, "DeleteFile rejected, file is locked");
        return Ok(response::lock_mismatch(&current));
    }

    state.storage.delete(id).await?;

    tracing::info!(id = %id, user = %user.name, "DeleteFile");

    Ok(response::ok())
}

/// Name reported after a successful rename.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct RenameResponse {
    name: String,
}

/// `POST /wopi/files/:id` with `X-WOPI-Override: RENAME_FILE` — RenameFile.
pub async fn rename_file(
    state: &AppState,
    id: &FileId,
    token: &str,
    req_headers: &HeaderMap,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), true)?;
    require_file(state, id).await?;

    let presented = parser::header_str(req_headers, headers::LOCK);
    if let LockOutcome::Mismatch { current } = state.locks.check_write(id, presented) {
        tracing::debug!(id = %id, "RenameFile rejected, lock mismatch");
        return Ok(response::lock_mismatch(&current));
    }

    let Some(mut requested) = parser::decoded_header(req_headers, headers::REQUESTED_NAME) else {
        return Ok(response::unsupported());
    };

    // Clients send the new name without an extension; keep the old one.
    if !requested.contains('.') {
        requested.push_str(id.extension());
    }

    match state.storage.rename(id, &requested).await? {
        Some(final_name) => {
            tracing::info!(id = %id, user = %user.name, to = %final_name, "RenameFile");
            Ok(response::json(RenameResponse { name: final_name }))
        }
        None => {
            tracing::debug!(id = %id, to = %requested, "RenameFile rejected, name taken");
            Ok(response::with_header(
                StatusCode::BAD_REQUEST.into_response(),
                headers::INVALID_FILE_NAME_ERROR,
                &requested,
            ))
        }
    }
}
