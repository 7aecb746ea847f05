//! # wopihub-auth
//!
//! Access-token minting and validation plus the access gate every WOPI
//! handler runs before touching storage. Tokens are JWTs bound to a single
//! resource id; permissions come from a pluggable [`PermissionSource`].
//!
//! [`PermissionSource`]: wopihub_core::traits::PermissionSource

pub mod gate;
pub mod permission;
pub mod token;

pub use gate::{AccessGate, WopiUser};
pub use permission::StaticPermissionSource;
pub use token::{AccessTokenMinter, AccessTokenVerifier};
