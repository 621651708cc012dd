use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-organizer mutual exclusion for check-then-write sequences.
///
/// Entries are created on demand and dropped once nobody holds or waits on them.
#[derive(Debug, Default)]
pub struct OrganizerLocks {
    entries: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl OrganizerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other task holds the lock for `organizer_id`.
    pub async fn acquire(&self, organizer_id: &str) -> OrganizerGuard<'_> {
        let lock = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            entries.entry(organizer_id.to_string()).or_default().clone()
        };
        // Built before waiting so a cancelled acquire still runs the cleanup in `Drop`.
        let mut pending = OrganizerGuard {
            locks: self,
            organizer_id: organizer_id.to_string(),
            lock: lock.clone(),
            guard: None,
        };
        pending.guard = Some(lock.lock_owned().await);
        pending
    }

    /// Number of organizers currently tracked.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct OrganizerGuard<'a> {
    locks: &'a OrganizerLocks,
    organizer_id: String,
    lock: Arc<AsyncMutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for OrganizerGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();

        let mut entries = self
            .locks
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // one reference in the map, one here: nobody else holds or waits
        if Arc::strong_count(&self.lock) == 2 {
            entries.remove(&self.organizer_id);
        }
    }
}
