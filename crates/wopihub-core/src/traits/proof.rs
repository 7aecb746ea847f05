//! Proof-key validation hook run before request dispatch.

use crate::result::AppResult;

/// The request material a proof-key validator inspects.
#[derive(Debug, Clone)]
pub struct ProofRequest<'a> {
    /// Full request URL as received.
    pub url: &'a str,
    /// The `access_token` query parameter value.
    pub access_token: &'a str,
    /// Parsed `X-WOPI-TimeStamp` header, when present.
    pub timestamp: Option<i64>,
    /// `X-WOPI-Proof` header value.
    pub proof: Option<&'a str>,
    /// `X-WOPI-ProofOld` header value.
    pub proof_old: Option<&'a str>,
}

/// Validates that a request originated from a trusted WOPI client.
///
/// Validation failure short-circuits the request with a 500 before any
/// handler runs.
pub trait ProofKeyValidator: Send + Sync + std::fmt::Debug + 'static {
    /// Verify the request's proof material.
    fn verify(&self, req: &ProofRequest<'_>) -> AppResult<()>;
}

/// Accepts every request without inspecting it.
///
/// This is the wired default; production deployments must replace it with
/// a validator that checks signatures against the editor's published
/// proof keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveProofValidator;

impl ProofKeyValidator for PermissiveProofValidator {
    fn verify(&self, _req: &ProofRequest<'_>) -> AppResult<()> {
        Ok(())
    }
}
