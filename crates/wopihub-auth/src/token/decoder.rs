//! Access token validation.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use wopihub_core::config::AuthConfig;
use wopihub_core::error::AppError;

use super::claims::Claims;

/// Validates access tokens and their resource binding.
#[derive(Clone)]
pub struct AccessTokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for AccessTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AccessTokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes a token and checks that it is bound to `resource_id`.
    ///
    /// Checks:
    /// 1. Signature validity
    /// 2. Expiration
    /// 3. The claims bind the token to the requested resource
    pub fn verify(&self, token: &str, resource_id: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::unauthorized(format!("Invalid access token: {e}")))?;

        let claims = token_data.claims;
        if !claims.binds(resource_id) {
            return Err(AppError::unauthorized(
                "Access token is not bound to this resource",
            ));
        }

        Ok(claims)
    }
}
