//! Poison recovery for the cache's std locks.
//!
//! A panic while a cache lock is held must not take every later request down
//! with it, so poisoned guards are taken back and the event is logged.

use std::sync::LockResult;

use tracing::warn;

/// Unwraps a lock acquisition, recovering the guard when the lock is poisoned.
pub(crate) trait RecoverPoison<G> {
    /// `structure` names the guarded map or set, `op` the cache operation.
    fn recover(self, op: &'static str, structure: &'static str) -> G;
}

impl<G> RecoverPoison<G> for LockResult<G> {
    fn recover(self, op: &'static str, structure: &'static str) -> G {
        self.unwrap_or_else(|poisoned| {
            warn!(
                op,
                structure,
                "Recovered poisoned cache lock; entries may predate the panicking write"
            );
            poisoned.into_inner()
        })
    }
}
