//! Route definitions for the WopiHub HTTP surface.
//!
//! The five WOPI routes from the protocol's URL grammar; everything else
//! is a 404. The router receives `AppState` and passes it to all handlers
//! via Axum's `State` extractor.

use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    Router::new()
        .route(
            "/wopi/files/:id",
            get(handlers::file::check_file_info).post(handlers::dispatch_file_post),
        )
        .route(
            "/wopi/files/:id/contents",
            get(handlers::file::get_file).post(handlers::file::put_file),
        )
        .route(
            "/wopi/files/:id/ancestry",
            get(handlers::folder::enumerate_ancestors),
        )
        .route("/wopi/folders/:id", get(handlers::folder::check_folder_info))
        .route(
            "/wopi/folders/:id/children",
            get(handlers::folder::enumerate_children),
        )
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::proof::verify_proof,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::headers::server_headers,
        ))
        .with_state(state)
}
