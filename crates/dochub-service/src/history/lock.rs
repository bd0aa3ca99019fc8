//! Per-document commit serialisation.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = DashMap<String, Arc<Mutex<()>>>;

/// Async mutexes keyed by tenant and filename.
///
/// Holding the guard serialises the scan-then-claim of the next version
/// slot and the roll that follows it for one document. Entries only live
/// while someone holds or waits on them.
#[derive(Debug, Clone, Default)]
pub struct CommitLocks {
    locks: Arc<LockTable>,
}

/// Exclusive access to one document's history until dropped.
#[derive(Debug)]
pub struct CommitGuard {
    guard: Option<OwnedMutexGuard<()>>,
    key: String,
    locks: Arc<LockTable>,
}

impl CommitLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to one document's history.
    pub async fn acquire(&self, tenant: &str, filename: &str) -> CommitGuard {
        let key = format!("{tenant}/{filename}");
        let lock = self.locks.entry(key.clone()).or_default().value().clone();
        CommitGuard {
            guard: Some(lock.lock_owned().await),
            key,
            locks: Arc::clone(&self.locks),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.len()
    }
}

impl Drop for CommitGuard {
    fn drop(&mut self) {
        // Release first so the guard's own reference is not counted.
        self.guard.take();
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}
