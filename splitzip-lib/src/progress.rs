//! Progress reporting module

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Simple progress callback for operations
///
/// Invoked synchronously after each unit of work (one file written or
/// extracted) with the updated counters. The operation stalls while the
/// callback runs, so implementations must not block.
pub trait ProgressCallback: Send + Sync {
    /// Called when progress is made
    fn progress(&self, completed: u64, total: u64);
}

impl<F: Fn(u64, u64) + Send + Sync> ProgressCallback for F {
    fn progress(&self, completed: u64, total: u64) {
        self(completed, total)
    }
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn progress(&self, _completed: u64, _total: u64) {}
}

/// Progress counters for the single in-flight operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressState {
    pub completed: u64,
    pub total: u64,
}

/// Tracks progress for one operation and forwards every update to the
/// supplied callback. Counters are owned by the operation alone; they are
/// set to (0, total) at start and back to (0, 0) when the operation ends.
pub struct ProgressReporter<'a> {
    state: ProgressState,
    callback: &'a dyn ProgressCallback,
}

impl<'a> ProgressReporter<'a> {
    /// Create a reporter with zeroed counters
    pub fn new(callback: &'a dyn ProgressCallback) -> Self {
        Self {
            state: ProgressState::default(),
            callback,
        }
    }

    /// Arm the counters for an operation over `total` units
    pub fn start(&mut self, total: u64) {
        self.state = ProgressState { completed: 0, total };
    }

    /// Record one completed unit and notify the callback
    pub fn tick(&mut self) {
        self.state.completed += 1;
        self.callback.progress(self.state.completed, self.state.total);
    }

    /// Clear the counters at the end of an operation
    pub fn finish(&mut self) {
        self.state = ProgressState::default();
    }

    /// Current counters
    pub fn state(&self) -> ProgressState {
        self.state
    }
}

/// Cooperative cancellation flag, checked between entries.
///
/// Cloning shares the underlying flag, so a caller can keep one handle and
/// hand another to the running operation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the operation holding the other handle
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
