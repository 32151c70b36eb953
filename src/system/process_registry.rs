// src/system/process_registry.rs

//! Tracking of live children for the signal relay.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

lazy_static! {
    static ref GLOBAL_REGISTRY: ChildRegistry = ChildRegistry::default();
}

/// The process-wide registry consulted by the signal relay.
pub fn global() -> &'static ChildRegistry {
    &GLOBAL_REGISTRY
}

/// A live child as seen by the signal relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedChild {
    /// OS process id.
    pub pid: u32,
    /// The shell line the child runs.
    pub command: String,
}

/// Table of currently running children, keyed by OS process id.
///
/// Every insert, remove and enumeration happens under one lock. Cloning shares the
/// same table.
#[derive(Debug, Clone, Default)]
pub struct ChildRegistry {
    inner: Arc<Mutex<HashMap<u32, TrackedChild>>>,
}

impl ChildRegistry {
    /// An empty registry, not shared with [`global`].
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u32, TrackedChild>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a freshly spawned child.
    pub fn register(&self, pid: u32, command: &str) {
        log::debug!("Registering child [PID:{}] {}", pid, command);
        self.lock().insert(
            pid,
            TrackedChild {
                pid,
                command: command.to_string(),
            },
        );
    }

    /// Forgets a reaped child.
    pub fn deregister(&self, pid: u32) -> Option<TrackedChild> {
        log::debug!("Deregistering child [PID:{}]", pid);
        self.lock().remove(&pid)
    }

    /// Whether `pid` is currently registered.
    pub fn contains(&self, pid: u32) -> bool {
        self.lock().contains_key(&pid)
    }

    /// Number of live children.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no child is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Runs `f` on every registered child while holding the lock, so no child can be
    /// added or reaped mid-iteration. Returns how many children were visited.
    pub fn for_each_child<F>(&self, mut f: F) -> usize
    where
        F: FnMut(&TrackedChild),
    {
        let guard = self.lock();
        let mut pids: Vec<&u32> = guard.keys().collect();
        pids.sort_unstable();
        let mut visited = 0;
        for pid in pids {
            if let Some(child) = guard.get(pid) {
                f(child);
                visited += 1;
            }
        }
        visited
    }

    /// A sorted snapshot of the registered process ids.
    pub fn pids(&self) -> Vec<u32> {
        let mut pids: Vec<u32> = self.lock().keys().copied().collect();
        pids.sort_unstable();
        pids
    }
}
