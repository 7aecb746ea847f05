//! Access token and permission configuration.

use serde::{Deserialize, Serialize};

use crate::types::Permission;

/// Authentication settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens. The default is for
    /// development only.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Permission granted to users not listed below.
    #[serde(default = "default_permission")]
    pub default_permission: Permission,
    /// Users limited to read access.
    #[serde(default)]
    pub read_only_users: Vec<String>,
    /// Users denied all access.
    #[serde(default)]
    pub denied_users: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            token_ttl_minutes: default_token_ttl(),
            default_permission: default_permission(),
            read_only_users: Vec::new(),
            denied_users: Vec::new(),
        }
    }
}

fn default_token_secret() -> String {
    "wopihub-development-secret".to_string()
}

fn default_token_ttl() -> u64 {
    600 // 10 hours, matching typical Office session tokens
}

fn default_permission() -> Permission {
    Permission::Write
}
