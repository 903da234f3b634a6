//! Pattern processing tracker.
//!
//! A counter, not a boolean: cascades nest, and one cascade finishing must
//! not flip the engine to idle while a sibling is still in flight. The
//! tracker signals when it is safe for a turn-advance or auto-spawn
//! controller to proceed; it never serializes the cascade path itself.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::Notify;

/// Default timeout for `wait_for_processing_complete`.
///
/// Bounds the damage of mismatched begin/end bookkeeping: a defect can make
/// a wait fail, never hang the caller forever.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Result of a cancellable quiescence wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The count reached zero within the timeout.
    Quiescent,
    /// The timeout elapsed first; grid stability is unconfirmed.
    TimedOut,
    /// The cancellation signal fired first; the counter is untouched.
    Cancelled,
}

/// Tracks how many pattern-processing passes are in flight.
///
/// `begin_processing` / `end_processing` are called from the trigger path
/// and recursively from cascade notification handlers, so the counter is
/// atomic. Waiters suspend cooperatively; nothing polls.
#[derive(Debug, Default)]
pub struct ProcessingTracker {
    active: AtomicUsize,
    quiescent: Notify,
}

impl ProcessingTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks one processing pass as started.
    ///
    /// Call on entering any resolution pass, including each nested cascade
    /// pass; every call needs a matching `end_processing`.
    pub fn begin_processing(&self) {
        self.active.fetch_add(1, Ordering::SeqCst);
    }

    /// Marks one processing pass as finished.
    ///
    /// Driving the counter below zero is a defect: the count is clamped at
    /// zero and a diagnostic is emitted, since a negative count would
    /// corrupt `is_processing` for every future caller.
    pub fn end_processing(&self) {
        let previous = self
            .active
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                count.checked_sub(1)
            });
        match previous {
            Ok(1) => self.quiescent.notify_waiters(),
            Ok(_) => {}
            Err(_) => {
                tracing::error!(
                    "end_processing called without a matching begin_processing; \
                     count clamped at zero"
                );
            }
        }
    }

    /// Number of passes currently in flight.
    #[must_use]
    pub fn active_processing_count(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// True while any pass is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.active_processing_count() > 0
    }

    /// Begins a pass and returns a guard that ends it on drop, pairing the
    /// calls across early returns.
    #[must_use]
    pub fn guard(&self) -> ProcessingGuard<'_> {
        self.begin_processing();
        ProcessingGuard { tracker: self }
    }

    async fn quiescent(&self) {
        loop {
            // Register before checking so a decrement between the check and
            // the await cannot be missed.
            let notified = self.quiescent.notified();
            if !self.is_processing() {
                return;
            }
            notified.await;
        }
    }

    /// Suspends until the count reaches zero or `timeout` elapses.
    ///
    /// Returns true on quiescence, false on timeout. A false return means
    /// grid stability is unconfirmed; callers retry or surface a
    /// diagnostic, never proceed as if stable.
    pub async fn wait_for_processing_complete(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.quiescent()).await.is_ok()
    }

    /// Like `wait_for_processing_complete`, but also returns promptly when
    /// `cancel` completes. Cancelling a wait does not cancel processing and
    /// never alters the counter.
    pub async fn wait_with_cancellation(
        &self,
        timeout: Duration,
        cancel: impl Future<Output = ()>,
    ) -> WaitOutcome {
        tokio::select! {
            result = tokio::time::timeout(timeout, self.quiescent()) => {
                if result.is_ok() {
                    WaitOutcome::Quiescent
                } else {
                    WaitOutcome::TimedOut
                }
            }
            () = cancel => WaitOutcome::Cancelled,
        }
    }
}

/// RAII pairing of `begin_processing` / `end_processing`.
#[derive(Debug)]
pub struct ProcessingGuard<'a> {
    tracker: &'a ProcessingTracker,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.tracker.end_processing();
    }
}
