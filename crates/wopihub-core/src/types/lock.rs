//! WOPI lock state held per file.

use chrono::{DateTime, Duration, Utc};

/// Lifetime of a lock in minutes. A lock older than this is treated as
/// absent on the next touch and lazily removed.
pub const LOCK_TTL_MINUTES: i64 = 30;

/// A lock issued to an editing session.
///
/// The lock string is chosen by the client and stored verbatim; it may
/// exceed 1,024 bytes (the host advertises `SupportsExtendedLockLength`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockInfo {
    /// Opaque client-supplied lock string.
    pub lock: String,
    /// UTC timestamp of last issue or refresh.
    pub created_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create a lock issued at `now`.
    pub fn new(lock: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            lock: lock.into(),
            created_at: now,
        }
    }

    /// Whether the lock has outlived [`LOCK_TTL_MINUTES`] as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::minutes(LOCK_TTL_MINUTES)
    }

    /// Reset the issue timestamp, extending the lock's lifetime.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
    }
}
