//! Stamps the standard WOPI identity headers on every response.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::headers;
use crate::response::with_header;
use crate::state::AppState;

/// Adds `X-WOPI-ServerVersion` and `X-WOPI-MachineName` to each response.
pub async fn server_headers(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let resp = next.run(req).await;
    let resp = with_header(resp, headers::SERVER_VERSION, &state.server_info.version);
    with_header(resp, headers::MACHINE_NAME, &state.server_info.machine_name)
}
