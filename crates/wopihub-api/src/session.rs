//! Auxiliary per-process state: user-info strings and revoked links.
//!
//! Both stores live for the process lifetime, like the lock table, but
//! each has its own mutex — their critical sections are independent.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use wopihub_core::types::FileId;

/// Opaque per-user strings stored by `PutUserInfo` and surfaced in
/// `CheckFileInfo`.
#[derive(Debug, Default)]
pub struct UserInfoStore {
    entries: Mutex<HashMap<String, String>>,
}

impl UserInfoStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store or replace the info string for `user`.
    pub fn put(&self, user: &str, info: String) {
        self.entries().insert(user.to_string(), info);
    }

    /// The stored info string for `user`, if any.
    pub fn get(&self, user: &str) -> Option<String> {
        self.entries().get(user).cloned()
    }
}

/// File ids whose restricted-use link has been revoked.
#[derive(Debug, Default)]
pub struct RevokedLinkSet {
    entries: Mutex<HashSet<FileId>>,
}

impl RevokedLinkSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashSet<FileId>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark the file's restricted link as revoked. Idempotent.
    pub fn revoke(&self, id: FileId) {
        self.entries().insert(id);
    }

    /// Whether the file's restricted link has been revoked.
    pub fn is_revoked(&self, id: &FileId) -> bool {
        self.entries().contains(id)
    }
}
