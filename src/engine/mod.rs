//! Pattern engine pipeline.
//!
//! Wires the recognizer, resolver, executors, and processing tracker into
//! the flow the host game loop drives: a block lands at a position, the
//! engine finds patterns through it, picks an executor per pattern, and
//! dispatches the resulting mutation intents. Cascade re-triggering
//! (gravity, refill) is host-owned; each host-driven pass independently
//! increments the tracker, so a turn-advance controller waiting on the
//! tracker never observes a mid-cascade grid.

use std::sync::Arc;

use crate::error::GridResult;
use crate::executor::ExecutionContext;
use crate::outcome::PatternOutcome;
use crate::position::Position;
use crate::recognizer::MatchRecognizer;
use crate::resolver::ExecutorResolver;
use crate::tracker::ProcessingTracker;

/// One recognize-resolve-execute pass over a trigger position.
#[derive(Debug)]
pub struct PatternEngine {
    recognizer: MatchRecognizer,
    resolver: ExecutorResolver,
    tracker: Arc<ProcessingTracker>,
}

impl PatternEngine {
    /// Creates an engine with default recognition settings and a fresh
    /// tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tracker(Arc::new(ProcessingTracker::new()))
    }

    /// Creates an engine sharing an existing tracker, so several engines or
    /// host collaborators can gate on the same quiescence state.
    #[must_use]
    pub fn with_tracker(tracker: Arc<ProcessingTracker>) -> Self {
        Self {
            recognizer: MatchRecognizer::new(),
            resolver: ExecutorResolver::new(),
            tracker,
        }
    }

    /// Replaces the recognizer (custom minimum match size).
    #[must_use]
    pub fn with_recognizer(mut self, recognizer: MatchRecognizer) -> Self {
        self.recognizer = recognizer;
        self
    }

    /// The recognizer in use.
    #[must_use]
    pub const fn recognizer(&self) -> &MatchRecognizer {
        &self.recognizer
    }

    /// The shared processing tracker. Turn-advance controllers wait on this
    /// before mutating the grid further.
    #[must_use]
    pub fn tracker(&self) -> &Arc<ProcessingTracker> {
        &self.tracker
    }

    /// Runs one full pass for `trigger`.
    ///
    /// The whole pass is bracketed by the tracker, including the zero-pattern
    /// case. A pattern whose execution fails is logged and skipped; it never
    /// halts independent sibling patterns (its grid mutations were not
    /// dispatched). Resolution failures are configuration defects and do
    /// abort the pass.
    pub fn process_trigger(
        &self,
        trigger: Position,
        context: &ExecutionContext,
    ) -> GridResult<Vec<PatternOutcome>> {
        let _guard = self.tracker.guard();

        let patterns = self.recognizer.recognize(trigger, context.grid.as_ref());
        let mut outcomes = Vec::with_capacity(patterns.len());

        for pattern in &patterns {
            let executor = self.resolver.resolve(pattern, context)?;
            if !executor.is_enabled() {
                tracing::debug!(executor = executor.id(), "executor disabled, skipping");
                continue;
            }
            match executor.can_execute(pattern, context) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(
                        executor = executor.id(),
                        %pattern,
                        "pattern no longer executable, skipping"
                    );
                    continue;
                }
                Err(err) => {
                    tracing::warn!(executor = executor.id(), %pattern, %err, "can_execute failed");
                    continue;
                }
            }
            match executor.execute(pattern, context) {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    tracing::warn!(
                        executor = executor.id(),
                        %pattern,
                        %err,
                        "pattern execution failed, grid left unchanged for this pattern"
                    );
                }
            }
        }

        Ok(outcomes)
    }
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self::new()
    }
}
