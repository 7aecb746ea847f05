//! PutRelativeFile — create a sibling file from the request body.

use axum::http::HeaderMap;
use axum::response::Response;
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use wopihub_core::error::AppError;
use wopihub_core::types::FileId;

use crate::handlers::{file_url, require_file};
use crate::headers;
use crate::parser;
use crate::response;
use crate::state::AppState;

/// Body of a successful PutRelativeFile response. All three URLs point at
/// the new file and carry a freshly minted access token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PutRelativeResponse {
    name: String,
    url: String,
    host_view_url: String,
    host_edit_url: String,
}

/// `X-WOPI-Override: PUT_RELATIVE` — PutRelativeFile.
///
/// Exactly one of `X-WOPI-SuggestedTarget` and `X-WOPI-RelativeTarget`
/// must be present. A suggested target is advisory: a collision mints a
/// fresh name. A relative target is exact: a collision is only written
/// over when overwrite is requested and the target is unlocked.
pub async fn put_relative(
    state: &AppState,
    id: &FileId,
    token: &str,
    req_headers: &HeaderMap,
    host: &str,
    body: Bytes,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), true)?;
    require_file(state, id).await?;

    let suggested = parser::decoded_header(req_headers, headers::SUGGESTED_TARGET);
    let relative = parser::decoded_header(req_headers, headers::RELATIVE_TARGET);

    let (target, is_suggested) = match (suggested, relative) {
        (Some(target), None) => (target, true),
        (None, Some(target)) => (target, false),
        _ => return Ok(response::unsupported()),
    };

    if let Some(declared) = parser::header_str(req_headers, headers::SIZE) {
        if declared.parse::<usize>() != Ok(body.len()) {
            tracing::debug!(
                id = %id,
                declared,
                actual = body.len(),
                "PutRelativeFile size header disagrees with body"
            );
        }
    }

    let mut name = resolve_target_name(id, &target);

    if is_suggested {
        // Advisory target: dodge collisions with a fresh unique prefix.
        if state.storage.size(&FileId::parse(&name)).await?.is_some() {
            name = format!("{}{}", Uuid::new_v4(), name);
        }
    } else {
        let target_id = FileId::parse(&name);
        if state.storage.size(&target_id).await?.is_some() {
            let overwrite =
                parser::header_flag(req_headers, headers::OVERWRITE_RELATIVE_TARGET);
            let target_lock = state.locks.current(&target_id);
            if !overwrite || target_lock.is_some() {
                tracing::debug!(id = %id, target = %name, "PutRelativeFile rejected");
                return Ok(response::lock_mismatch(
                    target_lock.as_deref().unwrap_or(""),
                ));
            }
        }
    }

    state.storage.create_or_overwrite(&name, body).await?;

    let new_id = FileId::parse(&name);
    let fresh_token = state.minter.mint(&user.name, new_id.as_str())?;
    let url = file_url(host, &name, &fresh_token);

    tracing::info!(id = %id, user = %user.name, new = %name, "PutRelativeFile");

    Ok(response::json(PutRelativeResponse {
        name,
        url: url.clone(),
        host_view_url: url.clone(),
        host_edit_url: url,
    }))
}

/// A target beginning with `.` and containing no further dot is an
/// extension change: the new name is the source's stem plus the target.
fn resolve_target_name(id: &FileId, target: &str) -> String {
    if let Some(rest) = target.strip_prefix('.') {
        if !rest.contains('.') {
            return format!("{}{}", id.stem(), target);
        }
    }
    target.to_string()
}
