//! Process-local reentrancy counter
//!
//! Never persisted. Only the 0→1 and 1→0 transitions touch the remote key.

use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Default)]
pub struct ReentrancyCounter {
    count: AtomicU32,
}

impl ReentrancyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new depth. `1` means outermost acquire.
    pub fn enter(&self) -> u32 {
        self.count.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Decrement and return the new depth, or `None` if already at zero.
    /// `Some(0)` means outermost release.
    pub fn leave(&self) -> Option<u32> {
        self.count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .ok()
            .map(|previous| previous - 1)
    }

    pub fn depth(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }
}
