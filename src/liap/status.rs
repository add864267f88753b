//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared cancellation flag.
///
/// Clones share the same flag, so a controller can keep one handle and pass
/// another down the solver call chain. The search driver polls the flag
/// between restarts and the minimizer polls it between sweeps. When the
/// driver sees a cancellation it consumes it with [`take`](Self::take), so
/// one request stops one search and later searches on the same handle start
/// clean.
#[derive(Debug, Clone, Default)]
pub struct Status {
    cancelled: Arc<AtomicBool>,
}

impl Status {
    /// A fresh, uncancelled flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested and not yet consumed.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Clear any pending request.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }

    /// Consume a pending request: returns whether one was set and clears it.
    pub fn take(&self) -> bool {
        self.cancelled.swap(false, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let status = Status::new();
        let handle = status.clone();
        assert!(!status.is_cancelled());

        handle.cancel();
        assert!(status.is_cancelled());
        assert!(status.take());
        assert!(!handle.is_cancelled());
        assert!(!status.take());
    }

    #[test]
    fn test_reset() {
        let status = Status::new();
        status.cancel();
        status.reset();
        assert!(!status.is_cancelled());
    }
}
