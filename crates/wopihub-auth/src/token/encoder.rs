//! Access token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use wopihub_core::config::AuthConfig;
use wopihub_core::error::AppError;

use super::claims::Claims;

/// Creates signed access tokens bound to a (user, resource) pair.
#[derive(Clone)]
pub struct AccessTokenMinter {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for AccessTokenMinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenMinter")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl AccessTokenMinter {
    /// Creates a new minter from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            ttl_minutes: config.token_ttl_minutes as i64,
        }
    }

    /// Mints a fresh token for `user` bound to `resource_id`.
    ///
    /// The resource id is lower-cased into the claims so that binding
    /// checks are insensitive to URL casing.
    pub fn mint(&self, user: &str, resource_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.ttl_minutes);

        let claims = Claims {
            sub: user.to_string(),
            fid: resource_id.to_lowercase(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }
}
