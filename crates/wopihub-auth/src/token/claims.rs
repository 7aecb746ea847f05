//! Claims embedded in every WOPI access token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims payload for a WOPI access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user name.
    pub sub: String,
    /// The resource id (file or folder) this token is bound to,
    /// lower-cased.
    pub fid: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token id.
    pub jti: Uuid,
}

impl Claims {
    /// The user this token authenticates.
    pub fn user(&self) -> &str {
        &self.sub
    }

    /// Whether the token is bound to the given resource id.
    ///
    /// Binding comparison is case-insensitive because file ids are
    /// lower-cased at parse time while folder ids are not.
    pub fn binds(&self, resource_id: &str) -> bool {
        self.fid == resource_id.to_lowercase()
    }
}
