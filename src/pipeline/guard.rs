//! Single-slot in-flight flag for runs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Holds the run slot until dropped
#[derive(Debug)]
pub struct RunGuard {
    slot: Arc<AtomicBool>,
}

impl RunGuard {
    /// Take the slot, or `None` if another run holds it
    pub fn try_acquire(slot: &Arc<AtomicBool>) -> Option<Self> {
        if slot.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Self {
            slot: Arc::clone(slot),
        })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.slot.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_until_drop() {
        let slot = Arc::new(AtomicBool::new(false));

        let guard = RunGuard::try_acquire(&slot);
        assert!(guard.is_some());
        assert!(RunGuard::try_acquire(&slot).is_none());
        assert!(slot.load(Ordering::Acquire));

        drop(guard);
        assert!(!slot.load(Ordering::Acquire));
        assert!(RunGuard::try_acquire(&slot).is_some());
    }
}
