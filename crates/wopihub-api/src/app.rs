//! Application builder — wires state + router and runs the server.

use std::sync::Arc;

use tokio::net::TcpListener;

use wopihub_auth::gate::AccessGate;
use wopihub_auth::permission::StaticPermissionSource;
use wopihub_auth::token::{AccessTokenMinter, AccessTokenVerifier};
use wopihub_core::config::AppConfig;
use wopihub_core::error::AppError;
use wopihub_core::traits::PermissiveProofValidator;
use wopihub_storage::LocalWopiStorage;

use crate::locks::LockTable;
use crate::router::build_router;
use crate::session::{RevokedLinkSet, UserInfoStore};
use crate::state::{AppState, ServerInfo};

/// Construct the full application state from configuration.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let storage = Arc::new(LocalWopiStorage::new(&config.storage.root_path).await?);

    let minter = Arc::new(AccessTokenMinter::new(&config.auth));
    let verifier = Arc::new(AccessTokenVerifier::new(&config.auth));
    let permissions = Arc::new(StaticPermissionSource::from_config(&config.auth));
    let gate = Arc::new(AccessGate::new(verifier, permissions));

    Ok(AppState {
        config: Arc::new(config),
        storage,
        minter,
        gate,
        proof: Arc::new(PermissiveProofValidator),
        locks: Arc::new(LockTable::new()),
        user_info: Arc::new(UserInfoStore::new()),
        revoked_links: Arc::new(RevokedLinkSet::new()),
        server_info: Arc::new(ServerInfo::capture()),
    })
}

/// Build the app and serve it until ctrl-c.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config).await?;
    let router = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("WOPI host listening on {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutting down");
    }
}
