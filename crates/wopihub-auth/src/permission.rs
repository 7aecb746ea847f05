//! Configuration-driven permission source.

use std::collections::HashSet;

use wopihub_core::config::AuthConfig;
use wopihub_core::traits::PermissionSource;
use wopihub_core::types::Permission;

/// Permission source backed by static configuration lists.
///
/// Users in `denied_users` get [`Permission::None`], users in
/// `read_only_users` get [`Permission::Read`], everyone else gets the
/// configured default. Production hosts replace this with their own
/// [`PermissionSource`] implementation.
#[derive(Debug, Clone)]
pub struct StaticPermissionSource {
    default: Permission,
    read_only: HashSet<String>,
    denied: HashSet<String>,
}

impl StaticPermissionSource {
    /// Build the source from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            default: config.default_permission,
            read_only: config.read_only_users.iter().cloned().collect(),
            denied: config.denied_users.iter().cloned().collect(),
        }
    }
}

impl PermissionSource for StaticPermissionSource {
    fn permission(&self, user: &str, _resource_id: &str) -> Permission {
        if self.denied.contains(user) {
            Permission::None
        } else if self.read_only.contains(user) {
            Permission::Read
        } else {
            self.default
        }
    }
}
