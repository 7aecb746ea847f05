//! Proof-key validation run before request dispatch.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use wopihub_core::traits::ProofRequest;

use crate::headers;
use crate::parser;
use crate::response;
use crate::state::AppState;

/// Verifies request-origin proof material with the configured validator.
///
/// A failing validator short-circuits to 500; the permissive default never
/// fails.
pub async fn verify_proof(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let url = req.uri().to_string();
    let access_token = query_access_token(req.uri().query()).unwrap_or_default();
    let timestamp =
        parser::header_str(req.headers(), headers::TIMESTAMP).and_then(|v| v.parse::<i64>().ok());

    let proof_req = ProofRequest {
        url: &url,
        access_token: &access_token,
        timestamp,
        proof: parser::header_str(req.headers(), headers::PROOF),
        proof_old: parser::header_str(req.headers(), headers::PROOF_OLD),
    };

    if let Err(e) = state.proof.verify(&proof_req) {
        tracing::warn!(url, error = %e, "Proof-key validation failed");
        return response::server_error();
    }

    next.run(req).await
}

/// Pull the raw `access_token` value out of a query string.
fn query_access_token(query: Option<&str>) -> Option<String> {
    query?
        .split('&')
        .find_map(|pair| pair.strip_prefix("access_token="))
        .map(|v| v.to_string())
}
