//! WOPI access tokens.
//!
//! An access token is a signed credential binding a user to a single file
//! or folder id. The editor echoes it back as the `access_token` query
//! parameter on every request.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::AccessTokenVerifier;
pub use encoder::AccessTokenMinter;
