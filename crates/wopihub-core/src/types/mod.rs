//! Domain types shared across all WopiHub crates.

pub mod id;
pub mod lock;
pub mod permission;

pub use id::{FileId, FolderId};
pub use lock::{LockInfo, LOCK_TTL_MINUTES};
pub use permission::Permission;
