//! Lock protocol handlers: Lock, Unlock, RefreshLock, UnlockAndRelock,
//! GetLock.
//!
//! The state machine itself lives in [`crate::locks::LockTable`]; these
//! handlers translate its outcomes into the WOPI response contract.

use axum::http::HeaderMap;
use axum::response::Response;

use wopihub_core::error::AppError;
use wopihub_core::types::FileId;

use crate::handlers::require_file;
use crate::headers;
use crate::locks::LockOutcome;
use crate::parser;
use crate::response;
use crate::state::AppState;

/// `X-WOPI-Override: LOCK` without an old lock — take or refresh a lock.
pub async fn lock(
    state: &AppState,
    id: &FileId,
    token: &str,
    req_headers: &HeaderMap,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), true)?;
    require_file(state, id).await?;

    let Some(new_lock) = parser::header_str(req_headers, headers::LOCK) else {
        return Ok(response::unsupported());
    };

    match state.locks.lock(id, new_lock) {
        LockOutcome::Ok => {
            tracing::info!(id = %id, user = %user.name, "Lock");
            let version = state.storage.version(id).await?;
            Ok(response::with_header(
                response::ok(),
                headers::ITEM_VERSION,
                &version,
            ))
        }
        LockOutcome::Mismatch { current } => Ok(response::lock_mismatch(&current)),
        LockOutcome::NotLocked => Ok(response::not_locked()),
    }
}

/// `X-WOPI-Override: UNLOCK` — release a lock.
pub async fn unlock(
    state: &AppState,
    id: &FileId,
    token: &str,
    req_headers: &HeaderMap,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), true)?;
    require_file(state, id).await?;

    let Some(presented) = parser::header_str(req_headers, headers::LOCK) else {
        return Ok(response::unsupported());
    };

    match state.locks.unlock(id, presented) {
        LockOutcome::Ok => {
            tracing::info!(id = %id, user = %user.name, "Unlock");
            let version = state.storage.version(id).await?;
            Ok(response::with_header(
                response::ok(),
                headers::ITEM_VERSION,
                &version,
            ))
        }
        LockOutcome::Mismatch { current } => Ok(response::lock_mismatch(&current)),
        LockOutcome::NotLocked => Ok(response::not_locked()),
    }
}

/// `X-WOPI-Override: REFRESH_LOCK` — extend a lock's lifetime.
pub async fn refresh_lock(
    state: &AppState,
    id: &FileId,
    token: &str,
    req_headers: &HeaderMap,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), true)?;
    require_file(state, id).await?;

    let Some(presented) = parser::header_str(req_headers, headers::LOCK) else {
        return Ok(response::unsupported());
    };

    match state.locks.refresh(id, presented) {
        LockOutcome::Ok => {
            tracing::debug!(id = %id, user = %user.name, "RefreshLock");
            Ok(response::ok())
        }
        LockOutcome::Mismatch { current } => Ok(response::lock_mismatch(&current)),
        LockOutcome::NotLocked => Ok(response::not_locked()),
    }
}

/// `X-WOPI-Override: LOCK` plus `X-WOPI-OldLock` — swap locks atomically.
pub async fn unlock_and_relock(
    state: &AppState,
    id: &FileId,
    token: &str,
    req_headers: &HeaderMap,
) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), true)?;
    require_file(state, id).await?;

    let (Some(new_lock), Some(old_lock)) = (
        parser::header_str(req_headers, headers::LOCK),
        parser::header_str(req_headers, headers::OLD_LOCK),
    ) else {
        return Ok(response::unsupported());
    };

    match state.locks.unlock_and_relock(id, old_lock, new_lock) {
        LockOutcome::Ok => {
            tracing::info!(id = %id, user = %user.name, "UnlockAndRelock");
            Ok(response::with_header(
                response::ok(),
                headers::OLD_LOCK,
                new_lock,
            ))
        }
        LockOutcome::Mismatch { current } => Ok(response::lock_mismatch(&current)),
        LockOutcome::NotLocked => Ok(response::not_locked()),
    }
}

/// `X-WOPI-Override: GET_LOCK` — read the current lock.
pub async fn get_lock(state: &AppState, id: &FileId, token: &str) -> Result<Response, AppError> {
    let user = state.gate.validate(token, id.as_str(), false)?;
    require_file(state, id).await?;

    let current = state.locks.current(id).unwrap_or_default();

    tracing::debug!(id = %id, user = %user.name, "GetLock");

    Ok(response::with_header(
        response::ok(),
        headers::LOCK,
        &current,
    ))
}
