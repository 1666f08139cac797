//! Mount tracking for async work started by a component.
//!
//! A task spawned from a page outlives the page if the user navigates away.
//! Holding a [`MountGuard`] lets the task check, after every await, whether its
//! view is still there before it writes any shared state.

#[cfg(test)]
#[path = "mount_test.rs"]
mod mount_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct MountGuard {
    mounted: Arc<AtomicBool>,
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl MountGuard {
    /// A guard that starts out mounted.
    pub fn new() -> Self {
        Self { mounted: Arc::new(AtomicBool::new(true)) }
    }

    /// Create a guard tied to the current reactive owner; it is released when
    /// the owning component is cleaned up.
    pub fn install() -> Self {
        let guard = Self::new();
        let handle = guard.clone();
        leptos::prelude::on_cleanup(move || handle.release());
        guard
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn release(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}
