// typea/src/cancel.rs

//! Cooperative cancellation token.
//!
//! Replaces the usual process-wide `shouldQuit` flag: a `Cancel` handle is
//! cloned into each engine at construction and set from a signal handler
//! or another thread. Engines poll it at suspension points (after each
//! blocking read/write and at the top of each loop iteration) and wind
//! down cleanly instead of sending further frames.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clonable cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct Cancel {
    flag: Arc<AtomicBool>,
}

impl Cancel {
    /// Fresh, unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from another thread or a signal
    /// handler context.
    pub fn set(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// True once any clone has requested cancellation.
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
