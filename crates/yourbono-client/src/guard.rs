//! Single-flight guard for bond submissions.

use std::sync::atomic::{AtomicBool, Ordering};

/// Allows at most one bond submission in flight.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    busy: AtomicBool,
}

impl SubmissionGuard {
    /// Creates an idle guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a submission holds the guard.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Claims the guard, or `None` if a submission is already in flight.
    ///
    /// The guard is released when the returned permit is dropped, whether
    /// the submission succeeded, failed or was abandoned.
    pub fn try_acquire(&self) -> Option<SubmissionPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SubmissionPermit { guard: self })
    }
}

/// Proof that the holder owns the in-flight slot.
#[derive(Debug)]
pub struct SubmissionPermit<'a> {
    guard: &'a SubmissionGuard,
}

impl Drop for SubmissionPermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::SeqCst);
    }
}
