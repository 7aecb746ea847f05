//! The access gate every WOPI handler runs before touching storage.

use std::sync::Arc;

use wopihub_core::error::AppError;
use wopihub_core::traits::PermissionSource;

use crate::token::AccessTokenVerifier;

/// The authenticated user a request acts on behalf of.
#[derive(Debug, Clone)]
pub struct WopiUser {
    /// User name extracted from the access token.
    pub name: String,
}

/// Validates the access token and the user's permission on the resource.
///
/// Every failure mode collapses to a single 401 Invalid Token response;
/// the distinction between a bad signature, a misbound token, and an
/// insufficient permission is logged but never surfaced to the client.
#[derive(Debug, Clone)]
pub struct AccessGate {
    verifier: Arc<AccessTokenVerifier>,
    permissions: Arc<dyn PermissionSource>,
}

impl AccessGate {
    /// Create the gate from its collaborators.
    pub fn new(verifier: Arc<AccessTokenVerifier>, permissions: Arc<dyn PermissionSource>) -> Self {
        Self {
            verifier,
            permissions,
        }
    }

    /// Validate `token` against `resource_id` and check that the user may
    /// perform an operation that does (or does not) require write access.
    pub fn validate(
        &self,
        token: &str,
        resource_id: &str,
        write_required: bool,
    ) -> Result<WopiUser, AppError> {
        let claims = self.verifier.verify(token, resource_id).map_err(|e| {
            tracing::debug!(resource = resource_id, error = %e, "Token validation failed");
            AppError::unauthorized("Invalid Token")
        })?;

        let permission = self.permissions.permission(claims.user(), resource_id);
        if !permission.allows(write_required) {
            tracing::debug!(
                user = claims.user(),
                resource = resource_id,
                ?permission,
                write_required,
                "Permission denied"
            );
            return Err(AppError::unauthorized("Invalid Token"));
        }

        Ok(WopiUser {
            name: claims.sub,
        })
    }
}
