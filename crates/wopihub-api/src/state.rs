//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use wopihub_auth::gate::AccessGate;
use wopihub_auth::token::AccessTokenMinter;
use wopihub_core::config::AppConfig;
use wopihub_core::traits::{ProofKeyValidator, WopiStorage};

use crate::locks::LockTable;
use crate::session::{RevokedLinkSet, UserInfoStore};

/// Host identity stamped on every response.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    /// Host software version.
    pub version: String,
    /// Machine name the host runs on.
    pub machine_name: String,
}

impl ServerInfo {
    /// Capture the identity once at startup.
    pub fn capture() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            machine_name: std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string()),
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// File storage backend.
    pub storage: Arc<dyn WopiStorage>,
    /// Access token minter for URLs the host hands out.
    pub minter: Arc<AccessTokenMinter>,
    /// Token + permission gate.
    pub gate: Arc<AccessGate>,
    /// Proof-key validator run before dispatch.
    pub proof: Arc<dyn ProofKeyValidator>,
    /// WOPI lock table.
    pub locks: Arc<LockTable>,
    /// Per-user info strings.
    pub user_info: Arc<UserInfoStore>,
    /// Revoked restricted links.
    pub revoked_links: Arc<RevokedLinkSet>,
    /// Host identity for response headers.
    pub server_info: Arc<ServerInfo>,
}
