//! Keyed critical sections
//!
//! Admission, arrival, and reconciliation for the same location must
//! not interleave, and two create calls for the same vehicle must not
//! race each other. Each key gets its own async mutex; different keys
//! proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of named async mutexes
pub struct LockRegistry {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

/// Shared lock registry handle
pub type SharedLockRegistry = Arc<LockRegistry>;

impl LockRegistry {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Create a shareable registry handle
    pub fn shared() -> SharedLockRegistry {
        Arc::new(Self::new())
    }

    /// Acquire the critical section for `key`, waiting if it is held.
    /// The section is released when the returned guard drops.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        // The map guard is dropped before this await
        lock.lock_owned().await
    }

    /// Number of keys seen so far
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────────
