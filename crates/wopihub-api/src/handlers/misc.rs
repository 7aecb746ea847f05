//! Remaining operations: GetShareUrl, PutUserInfo, restricted links,
//! ReadSecureStore, and AddActivities.

use std::time::Instant;

use axum::http::HeaderMap;
use axum::response::Response;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use wopihub_core::error::AppError;
use wopihub_core::types::FileId;

use crate::handlers::{file_url, require_file};
use crate::headers;
use crate::parser;
use crate::response;
use crate::state::AppState;

/// Scenario selector required by the restricted-link operations.
const FORMS_SCENARIO: &str = "FORMS";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ShareUrlResponse {
    share_url: String,
}

/// `X-WOPI-Override: GET_SHARE_URL` — GetShareUrl.
pub async fn get_share_url(
    state: &AppState,
    id: &FileId,
    token: &str,
    req_headers: &HeaderMap,
    host: &str,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), false)?;
    require_file(state, id).await?;

    let url_type = parser::header_str(req_headers, headers::URL_TYPE);
    if !matches!(url_type, Some("ReadOnly") | Some("ReadWrite")) {
        tracing::debug!(id = %id, ?url_type, "GetShareUrl with unsupported url type");
        return Ok(response::unsupported());
    }

    let fresh_token = state.minter.mint(&user.name, id.as_str())?;

    tracing::debug!(id = %id, user = %user.name, "GetShareUrl");

    Ok(response::json(ShareUrlResponse {
        share_url: file_url(host, id.as_str(), &fresh_token),
    }))
}

/// `X-WOPI-Override: PUT_USER_INFO` — store the body verbatim per user.
pub async fn put_user_info(
    state: &AppState,
    id: &FileId,
    token: &str,
    body: Bytes,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), false)?;
    require_file(state, id).await?;

    let info = String::from_utf8_lossy(&body).to_string();
    state.user_info.put(&user.name, info);

    tracing::debug!(id = %id, user = %user.name, "PutUserInfo");

    Ok(response::ok())
}

/// `X-WOPI-Override: GET_RESTRICTED_LINK` — GetRestrictedLink.
///
/// The link travels in a response header; a revoked file answers with an
/// empty one.
pub async fn get_restricted_link(
    state: &AppState,
    id: &FileId,
    token: &str,
    req_headers: &HeaderMap,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), false)?;
    require_file(state, id).await?;

    if parser::header_str(req_headers, headers::RESTRICTED_USE_LINK) != Some(FORMS_SCENARIO) {
        return Ok(response::unsupported());
    }

    let link = if state.revoked_links.is_revoked(id) {
        String::new()
    } else {
        format!("http://officeserver4/restricted/{id}")
    };

    tracing::debug!(id = %id, user = %user.name, revoked = link.is_empty(), "GetRestrictedLink");

    Ok(response::with_header(
        response::ok(),
        headers::RESTRICTED_USE_LINK,
        &link,
    ))
}

/// `X-WOPI-Override: REVOKE_RESTRICTED_LINK` — RevokeRestrictedLink.
pub async fn revoke_restricted_link(
    state: &AppState,
    id: &FileId,
    token: &str,
    req_headers: &HeaderMap,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), false)?;
    require_file(state, id).await?;

    if parser::header_str(req_headers, headers::RESTRICTED_USE_LINK) != Some(FORMS_SCENARIO) {
        return Ok(response::unsupported());
    }

    state.revoked_links.revoke(id.clone());

    tracing::info!(id = %id, user = %user.name, "RevokeRestrictedLink");

    Ok(response::ok())
}

/// Fixed credentials returned by ReadSecureStore.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SecureStoreResponse {
    user_name: String,
    password: String,
    is_windows_credentials: bool,
    is_group: bool,
}

/// `X-WOPI-Override: READ_SECURE_STORE` — ReadSecureStore.
pub async fn read_secure_store(
    state: &AppState,
    id: &FileId,
    token: &str,
    req_headers: &HeaderMap,
) -> Result<Response, AppError> {
    let started = Instant::now();

    let user = state.gate.validate(token, id.as_str(), false)?;
    require_file(state, id).await?;

    let application_id = parser::header_str(req_headers, headers::APPLICATION_ID);
    if application_id.map_or(true, str::is_empty) {
        return Ok(response::unsupported());
    }

    tracing::debug!(id = %id, user = %user.name, application_id, "ReadSecureStore");

    let mut resp = response::json(SecureStoreResponse {
        user_name: "SecureStoreUser".to_string(),
        password: "SecureStorePassword".to_string(),
        is_windows_credentials: true,
        is_group: false,
    });

    if parser::header_flag(req_headers, headers::PERF_TRACE_REQUESTED) {
        let elapsed = format!("{}ms", started.elapsed().as_millis());
        resp = response::with_header(resp, headers::PERF_TRACE, &elapsed);
    }

    Ok(resp)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ActivitiesRequest {
    #[serde(default)]
    activities: Vec<Activity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Activity {
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    data: ActivityData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ActivityData {
    #[serde(default)]
    content_id: String,
    #[serde(default)]
    content_action: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ActivityResponses {
    activity_responses: Vec<ActivityResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ActivityResponse {
    id: String,
    status: i32,
    message: String,
}

/// `X-WOPI-Override: ADD_ACTIVITIES` — acknowledge each activity in order.
pub async fn add_activities(
    state: &AppState,
    id: &FileId,
    token: &str,
    body: Bytes,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), false)?;
    require_file(state, id).await?;

    let request: ActivitiesRequest = serde_json::from_slice(&body)?;

    for activity in &request.activities {
        tracing::debug!(
            id = %id,
            user = %user.name,
            activity = %activity.kind,
            activity_id = %activity.id,
            timestamp = %activity.timestamp,
            content_id = %activity.data.content_id,
            content_action = %activity.data.content_action,
            "Activity recorded"
        );
    }

    let responses = request
        .activities
        .into_iter()
        .map(|activity| ActivityResponse {
            id: activity.id,
            status: 0,
            message: String::new(),
        })
        .collect();

    Ok(response::json(ActivityResponses {
        activity_responses: responses,
    }))
}
