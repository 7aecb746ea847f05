//! Permission lookup trait.

use crate::types::Permission;

/// Resolves the access level a user holds on a resource.
///
/// The access gate consults this after token validation; implementations
/// may be backed by configuration, a directory service, or anything else.
pub trait PermissionSource: Send + Sync + std::fmt::Debug + 'static {
    /// Look up the permission for `(user, resource_id)`.
    fn permission(&self, user: &str, resource_id: &str) -> Permission;
}
