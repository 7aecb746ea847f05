//! WOPI response shaping.
//!
//! The protocol's outcomes travel in status codes and `X-WOPI-*` headers,
//! not bodies. These helpers build every shape the handlers need; lock
//! strings are client-chosen, so header values that fail validation are
//! replaced with an empty value rather than failing the response.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::headers;

/// 200 with an empty body.
pub fn ok() -> Response {
    StatusCode::OK.into_response()
}

/// 200 with a JSON body.
pub fn json<T: Serialize>(body: T) -> Response {
    Json(body).into_response()
}

/// Attach a header to a response, tolerating arbitrary value bytes.
pub fn with_header(mut resp: Response, name: &str, value: &str) -> Response {
    let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
        return resp;
    };
    let value =
        HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static(""));
    resp.headers_mut().insert(name, value);
    resp
}

/// 409 carrying the lock currently held on the file.
pub fn lock_mismatch(current: &str) -> Response {
    with_header(
        StatusCode::CONFLICT.into_response(),
        headers::LOCK,
        current,
    )
}

/// 409 for a lock-requiring operation on an unlocked file: empty lock
/// header plus a failure reason.
pub fn not_locked() -> Response {
    let resp = with_header(StatusCode::CONFLICT.into_response(), headers::LOCK, "");
    with_header(resp, headers::LOCK_FAILURE_REASON, "File not locked")
}

/// 404 File Unknown.
pub fn file_unknown() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

/// 501 Unsupported.
pub fn unsupported() -> Response {
    StatusCode::NOT_IMPLEMENTED.into_response()
}

/// 500 Server Error.
pub fn server_error() -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
