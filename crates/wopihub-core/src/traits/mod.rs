//! Pluggable collaborator traits.
//!
//! The traits live here in `wopihub-core` and are implemented elsewhere:
//! storage in `wopihub-storage`, permissions in `wopihub-auth`. The
//! proof-key validator ships with a permissive default suitable for
//! development.

pub mod permission;
pub mod proof;
pub mod storage;

pub use permission::PermissionSource;
pub use proof::{PermissiveProofValidator, ProofKeyValidator, ProofRequest};
pub use storage::{ByteStream, ChildFile, RootDirectory, WopiStorage};
