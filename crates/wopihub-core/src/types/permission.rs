//! Per-user, per-resource access levels.

use serde::{Deserialize, Serialize};

/// The access level a user holds on a file or folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// No access at all; every request is rejected.
    None,
    /// Read-only access.
    Read,
    /// Full read/write access.
    Write,
}

impl Permission {
    /// Whether this permission satisfies a request that may require write
    /// access.
    pub fn allows(self, write_required: bool) -> bool {
        match self {
            Self::None => false,
            Self::Read => !write_required,
            Self::Write => true,
        }
    }
}
