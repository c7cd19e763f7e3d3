//! Mutex-guarded arena harness that rspec environments can clone.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use test_utils::ArenaHarness;

/// Wrapper that forwards `Send` and `Sync` because access is mutex-guarded.
#[derive(Debug)]
pub struct GuardedArena(pub ArenaHarness);

// SAFETY: rspec environments must be `Clone + Send + Sync`, but suites run
// serially through `run_serial`. Every access to the harness goes through the
// mutex in `SharedArena`, so no two threads touch the `App` at once.
unsafe impl Send for GuardedArena {}
unsafe impl Sync for GuardedArena {}

/// Cloneable handle to one arena shared by every step of a suite.
#[derive(Debug, Clone)]
pub struct SharedArena(Arc<Mutex<GuardedArena>>);

impl SharedArena {
    /// Shares `harness` between suite steps.
    pub fn new(harness: ArenaHarness) -> Self {
        Self(Arc::new(Mutex::new(GuardedArena(harness))))
    }

    /// Locks the harness, recovering from a poisoned mutex.
    pub fn lock(&self) -> MutexGuard<'_, GuardedArena> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
