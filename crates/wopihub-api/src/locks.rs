//! In-memory WOPI lock table.
//!
//! One entry per file id, guarded by a single mutex. Every transition
//! performs its whole read-decide-write window inside one guard scope, so
//! concurrent requests against the same file serialize cleanly. Expiry is
//! lazy: an entry older than the TTL is reclaimed by the next touch.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use wopihub_core::types::{FileId, LockInfo};

/// Result of a lock-table transition, consumed by the response encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// The transition succeeded.
    Ok,
    /// The presented lock does not match the held one.
    Mismatch {
        /// The lock currently held on the file.
        current: String,
    },
    /// The file is not locked but the operation requires it to be.
    NotLocked,
}

/// Mapping file id → lock, with lazy 30-minute expiry.
#[derive(Debug, Default)]
pub struct LockTable {
    entries: Mutex<HashMap<FileId, LockInfo>>,
}

impl LockTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<FileId, LockInfo>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop the entry for `id` if it has expired as of `now`.
    fn reclaim(entries: &mut HashMap<FileId, LockInfo>, id: &FileId, now: DateTime<Utc>) {
        if entries.get(id).is_some_and(|info| info.is_expired(now)) {
            entries.remove(id);
        }
    }

    /// The current lock for `id`, reclaiming it first if expired.
    pub fn try_get(&self, id: &FileId, now: DateTime<Utc>) -> Option<LockInfo> {
        let mut entries = self.entries();
        Self::reclaim(&mut entries, id, now);
        entries.get(id).cloned()
    }

    /// Upsert the lock for `id`, stamping `created_at = now`.
    pub fn put(&self, id: &FileId, lock: &str, now: DateTime<Utc>) {
        self.entries().insert(id.clone(), LockInfo::new(lock, now));
    }

    /// Remove any lock for `id`.
    pub fn remove(&self, id: &FileId) {
        self.entries().remove(id);
    }

    /// The current (non-expired) lock string for `id`.
    pub fn current(&self, id: &FileId) -> Option<String> {
        self.try_get(id, Utc::now()).map(|info| info.lock)
    }

    /// Take a lock: succeeds on an unlocked file and refreshes a matching
    /// lock; a different held lock is a mismatch.
    pub fn lock(&self, id: &FileId, new_lock: &str) -> LockOutcome {
        let now = Utc::now();
        let mut entries = self.entries();
        Self::reclaim(&mut entries, id, now);

        match entries.get_mut(id) {
            None => {
                entries.insert(id.clone(), LockInfo::new(new_lock, now));
                LockOutcome::Ok
            }
            Some(info) if info.lock == new_lock => {
                info.refresh(now);
                LockOutcome::Ok
            }
            Some(info) => LockOutcome::Mismatch {
                current: info.lock.clone(),
            },
        }
    }

    /// Release a lock when the presented string matches the held one.
    pub fn unlock(&self, id: &FileId, presented: &str) -> LockOutcome {
        let now = Utc::now();
        let mut entries = self.entries();
        Self::reclaim(&mut entries, id, now);

        match entries.get(id) {
            None => LockOutcome::NotLocked,
            Some(info) if info.lock == presented => {
                entries.remove(id);
                LockOutcome::Ok
            }
            Some(info) => LockOutcome::Mismatch {
                current: info.lock.clone(),
            },
        }
    }

    /// Extend a matching lock's lifetime.
    pub fn refresh(&self, id: &FileId, presented: &str) -> LockOutcome {
        let now = Utc::now();
        let mut entries = self.entries();
        Self::reclaim(&mut entries, id, now);

        match entries.get_mut(id) {
            None => LockOutcome::NotLocked,
            Some(info) if info.lock == presented => {
                info.refresh(now);
                LockOutcome::Ok
            }
            Some(info) => LockOutcome::Mismatch {
                current: info.lock.clone(),
            },
        }
    }

    /// Atomically replace `old_lock` with `new_lock`.
    pub fn unlock_and_relock(&self, id: &FileId, old_lock: &str, new_lock: &str) -> LockOutcome {
        let now = Utc::now();
        let mut entries = self.entries();
        Self::reclaim(&mut entries, id, now);

        match entries.get(id) {
            None => LockOutcome::NotLocked,
            Some(info) if info.lock == old_lock => {
                entries.insert(id.clone(), LockInfo::new(new_lock, now));
                LockOutcome::Ok
            }
            Some(info) => LockOutcome::Mismatch {
                current: info.lock.clone(),
            },
        }
    }

    /// The shared write guard for PutFile and RenameFile: an unlocked file
    /// accepts any presented lock, a locked file only its own.
    pub fn check_write(&self, id: &FileId, presented: Option<&str>) -> LockOutcome {
        let now = Utc::now();
        let mut entries = self.entries();
        Self::reclaim(&mut entries, id, now);

        match entries.get(id) {
            None => LockOutcome::Ok,
            Some(info) if Some(info.lock.as_str()) == presented => LockOutcome::Ok,
            Some(info) => LockOutcome::Mismatch {
                current: info.lock.clone(),
            },
        }
    }
}
