//! WOPI request classification and header access.
//!
//! Routing alone cannot name the operation: `POST /wopi/files/{id}` is a
//! family of operations multiplexed through the `X-WOPI-Override` header.
//! [`classify`] turns that header into a typed variant once, so handler
//! code never compares strings.

use http::HeaderMap;
use percent_encoding::percent_decode_str;

use crate::headers;

/// Operation selected by `X-WOPI-Override` on `POST /wopi/files/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WopiOverride {
    /// Take or refresh a lock.
    Lock,
    /// Atomically release one lock and take another.
    UnlockAndRelock,
    /// Release a lock.
    Unlock,
    /// Extend a lock's lifetime.
    RefreshLock,
    /// Read the current lock.
    GetLock,
    /// Create a sibling file from the request body.
    PutRelative,
    /// Delete the file.
    Delete,
    /// Rename the file.
    Rename,
    /// Read fixed secure-store credentials.
    ReadSecureStore,
    /// Fetch the restricted-use link.
    GetRestrictedLink,
    /// Revoke the restricted-use link.
    RevokeRestrictedLink,
    /// Fetch a share URL.
    GetShareUrl,
    /// Store opaque per-user data.
    PutUserInfo,
    /// Record editor activity events.
    AddActivities,
    /// Incremental editing, not supported by this host.
    Cobalt,
    /// Absent or unrecognized override value.
    Unknown,
}

/// Classify a `POST /wopi/files/{id}` request by its override header.
///
/// `LOCK` splits on the presence of `X-WOPI-OldLock`: with it the request
/// is an UnlockAndRelock, without it a plain Lock.
pub fn classify(headers: &HeaderMap) -> WopiOverride {
    let Some(value) = header_str(headers, headers::OVERRIDE) else {
        return WopiOverride::Unknown;
    };

    match value {
        "LOCK" => {
            if headers.contains_key(headers::OLD_LOCK) {
                WopiOverride::UnlockAndRelock
            } else {
                WopiOverride::Lock
            }
        }
        "UNLOCK" => WopiOverride::Unlock,
        "REFRESH_LOCK" => WopiOverride::RefreshLock,
        "GET_LOCK" => WopiOverride::GetLock,
        "PUT_RELATIVE" => WopiOverride::PutRelative,
        "DELETE" => WopiOverride::Delete,
        "RENAME_FILE" => WopiOverride::Rename,
        "READ_SECURE_STORE" => WopiOverride::ReadSecureStore,
        "GET_RESTRICTED_LINK" => WopiOverride::GetRestrictedLink,
        "REVOKE_RESTRICTED_LINK" => WopiOverride::RevokeRestrictedLink,
        "GET_SHARE_URL" => WopiOverride::GetShareUrl,
        "PUT_USER_INFO" => WopiOverride::PutUserInfo,
        "ADD_ACTIVITIES" => WopiOverride::AddActivities,
        "COBALT" => WopiOverride::Cobalt,
        _ => WopiOverride::Unknown,
    }
}

/// A header value as a string slice, when present and valid UTF-8.
pub fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// A percent-decoded header value (target names arrive URL-encoded).
pub fn decoded_header(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = header_str(headers, name)?;
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|s| s.to_string())
}

/// A boolean-ish header: `true` / `1` (case-insensitive) count as set.
pub fn header_flag(headers: &HeaderMap, name: &str) -> bool {
    header_str(headers, name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}
