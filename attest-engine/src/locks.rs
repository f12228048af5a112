//! Per-scope write serialization.
//!
//! Each projection replay is atomic on its own, but two concurrent
//! append-then-recompute sequences for the same component could still race
//! and lose the later writer's view. The engine therefore holds the scope's
//! lock across append → enqueue → project. Writers to disjoint scopes never
//! contend. This is the documented serialization boundary; the store itself
//! stays lock-free.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;

#[derive(Default)]
pub struct ScopeLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ScopeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for a scope key.
    pub fn lock_for(&self, scope_key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(scope_key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Acquire, tolerating a poisoned mutex: the protected state lives in the
/// store and is transactional, so a panicked writer leaves nothing torn.
pub fn acquire(lock: &Arc<Mutex<()>>) -> MutexGuard<'_, ()> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
