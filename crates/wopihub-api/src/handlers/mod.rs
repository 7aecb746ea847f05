//! WOPI operation handlers.
//!
//! `GET` routes map straight to handlers; `POST /wopi/files/{id}` is
//! classified once by [`dispatch_file_post`] and fans out to the typed
//! handler for its override.

pub mod file;
pub mod folder;
pub mod lock;
pub mod misc;
pub mod relative;

use axum::extract::{Host, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use wopihub_core::error::AppError;
use wopihub_core::types::FileId;

use crate::parser::{self, WopiOverride};
use crate::response;
use crate::state::AppState;

/// The `access_token` query parameter every WOPI request carries.
#[derive(Debug, Deserialize)]
pub struct AccessTokenQuery {
    /// Raw token value; empty when the parameter is missing.
    #[serde(default)]
    pub access_token: String,
}

/// Dispatch a `POST /wopi/files/{id}` request by its override header.
pub async fn dispatch_file_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<AccessTokenQuery>,
    Host(host): Host,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let id = FileId::parse(&raw_id);
    let token = query.access_token.as_str();
    let op = parser::classify(&headers);

    tracing::debug!(id = %id, ?op, "Dispatching file POST");

    match op {
        WopiOverride::Lock => lock::lock(&state, &id, token, &headers).await,
        WopiOverride::UnlockAndRelock => {
            lock::unlock_and_relock(&state, &id, token, &headers).await
        }
        WopiOverride::Unlock => lock::unlock(&state, &id, token, &headers).await,
        WopiOverride::RefreshLock => lock::refresh_lock(&state, &id, token, &headers).await,
        WopiOverride::GetLock => lock::get_lock(&state, &id, token).await,
        WopiOverride::PutRelative => {
            relative::put_relative(&state, &id, token, &headers, &host, body).await
        }
        WopiOverride::Delete => file::delete_file(&state, &id, token).await,
        WopiOverride::Rename => file::rename_file(&state, &id, token, &headers).await,
        WopiOverride::ReadSecureStore => {
            misc::read_secure_store(&state, &id, token, &headers).await
        }
        WopiOverride::GetRestrictedLink => {
            misc::get_restricted_link(&state, &id, token, &headers).await
        }
        WopiOverride::RevokeRestrictedLink => {
            misc::revoke_restricted_link(&state, &id, token, &headers).await
        }
        WopiOverride::GetShareUrl => {
            misc::get_share_url(&state, &id, token, &headers, &host).await
        }
        WopiOverride::PutUserInfo => misc::put_user_info(&state, &id, token, body).await,
        WopiOverride::AddActivities => misc::add_activities(&state, &id, token, body).await,
        WopiOverride::Cobalt => {
            tracing::debug!(id = %id, "Cobalt requested, not supported");
            Ok(response::unsupported())
        }
        WopiOverride::Unknown => {
            tracing::warn!(id = %id, "Missing or unknown X-WOPI-Override");
            Ok(response::server_error())
        }
    }
}

/// 404 unless the file exists (absent and unreadable look the same).
pub(crate) async fn require_file(state: &AppState, id: &FileId) -> Result<(), AppError> {
    match state.storage.size(id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::not_found(format!("File Unknown: {id}"))),
    }
}

pub(crate) fn encode_segment(name: &str) -> String {
    utf8_percent_encode(name, NON_ALPHANUMERIC).to_string()
}

/// WOPI file URL carrying an access token.
pub(crate) fn file_url(host: &str, name: &str, token: &str) -> String {
    format!(
        "http://{host}/wopi/files/{}?access_token={token}",
        encode_segment(name)
    )
}

/// WOPI folder URL.
pub(crate) fn folder_url(host: &str, name: &str) -> String {
    format!("http://{host}/wopi/folders/{}", encode_segment(name))
}
