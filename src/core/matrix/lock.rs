//! Keyed table of in-flight cell writes
//!
//! A cell is locked for exactly as long as its [`PendingLock`] guard lives,
//! so a completion path that returns early (or panics) can never leave a
//! cell stuck in the locked state.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::auth::rbac::CellKey;

/// At-most-one in-flight write per cell
#[derive(Debug, Clone, Default)]
pub struct PendingLocks {
    cells: Arc<DashMap<CellKey, Instant>>,
}

impl PendingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock `key`, or return `None` when a write for it is already in flight
    pub fn try_acquire(&self, key: CellKey) -> Option<PendingLock> {
        let acquired_at = Instant::now();
        match self.cells.entry(key.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(acquired_at);
                debug!(cell = %key, "Cell locked");
                Some(PendingLock {
                    cells: Arc::clone(&self.cells),
                    key,
                    acquired_at,
                })
            }
        }
    }

    pub fn is_pending(&self, key: &CellKey) -> bool {
        self.cells.contains_key(key)
    }

    /// Copy of the currently locked cells
    pub fn snapshot(&self) -> HashSet<CellKey> {
        self.cells.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Guard for one locked cell; unlocks on drop
#[derive(Debug)]
pub struct PendingLock {
    cells: Arc<DashMap<CellKey, Instant>>,
    key: CellKey,
    acquired_at: Instant,
}

impl PendingLock {
    pub fn key(&self) -> &CellKey {
        &self.key
    }

    pub fn elapsed(&self) -> Duration {
        self.acquired_at.elapsed()
    }
}

impl Drop for PendingLock {
    fn drop(&mut self) {
        self.cells.remove(&self.key);
        debug!(cell = %self.key, "Cell unlocked");
    }
}
