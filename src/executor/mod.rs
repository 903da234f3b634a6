//! Pattern execution strategies.
//!
//! Executors are stateless strategy objects: they turn a `Pattern` into
//! mutation intents plus a `PatternOutcome`, using only the capabilities
//! carried by the `ExecutionContext`. A single instance of each executor is
//! shared across resolutions.

mod match_clear;
mod merge;

pub use match_clear::{MatchExecutor, MATCH_REWARD_PER_BLOCK, MATCH_SCORE_PER_BLOCK};
pub use merge::MergeExecutor;

use std::sync::Arc;

use crate::dispatch::CommandDispatcher;
use crate::error::{ExecutionError, GridResult};
use crate::grid::GridReader;
use crate::outcome::PatternOutcome;
use crate::pattern::{Pattern, PatternType};
use crate::position::Position;
use crate::progression::UnlockReader;

/// Capabilities an executor needs beyond the pattern itself.
///
/// Built once per resolution pass; the trigger position is only required for
/// merge-mode execution and its absence there is a recoverable error, not a
/// crash.
#[derive(Clone)]
pub struct ExecutionContext {
    /// Read access to the grid.
    pub grid: Arc<dyn GridReader>,
    /// Outlet for mutation intents.
    pub dispatcher: Arc<dyn CommandDispatcher>,
    /// Merge unlock queries.
    pub unlocks: Arc<dyn UnlockReader>,
    /// Position of the user action that caused detection; where a merge
    /// result lands.
    pub trigger_position: Option<Position>,
}

impl ExecutionContext {
    /// Creates a context with no trigger position.
    #[must_use]
    pub fn new(
        grid: Arc<dyn GridReader>,
        dispatcher: Arc<dyn CommandDispatcher>,
        unlocks: Arc<dyn UnlockReader>,
    ) -> Self {
        Self {
            grid,
            dispatcher,
            unlocks,
            trigger_position: None,
        }
    }

    /// Sets the trigger position.
    #[must_use]
    pub fn with_trigger(mut self, trigger_position: Position) -> Self {
        self.trigger_position = Some(trigger_position);
        self
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("trigger_position", &self.trigger_position)
            .finish_non_exhaustive()
    }
}

/// A pattern-handling strategy.
///
/// Implementations hold no per-instance mutable state; execution is
/// side-effect-free except through the context's dispatcher.
pub trait PatternExecutor: Send + Sync {
    /// Stable identifier, for logs and telemetry.
    fn id(&self) -> &'static str;

    /// The pattern type this executor handles.
    fn pattern_type(&self) -> PatternType;

    /// Whether this executor is currently available.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Returns true if `execute` would currently succeed.
    ///
    /// This is a query, so mismatched pattern types and stale positions
    /// answer `Ok(false)`; only infrastructure failures are errors.
    fn can_execute(&self, pattern: &Pattern, context: &ExecutionContext) -> GridResult<bool>;

    /// Cost model for scheduling/telemetry, in milliseconds. Not a
    /// correctness input.
    fn estimate_execution_time_ms(&self, pattern: &Pattern) -> f32;

    /// Executes the pattern: dispatches mutation intents and returns the
    /// predicted outcome.
    fn execute(&self, pattern: &Pattern, context: &ExecutionContext) -> GridResult<PatternOutcome>;
}

/// Re-validates that every matched position still holds a block of the
/// pattern's type, returning the first stale position as an error.
///
/// Patterns detected earlier in a cascade can be invalidated by the
/// mutations of a sibling pattern; executors call this immediately before
/// dispatching.
pub(crate) fn validate_occupancy(
    pattern: &Pattern,
    grid: &dyn GridReader,
) -> Result<(), ExecutionError> {
    for &position in pattern.positions() {
        let holds_type = grid
            .try_get_block_at(position)
            .is_some_and(|b| b.block_type == pattern.block_type());
        if !holds_type {
            return Err(ExecutionError::StalePattern {
                position,
                block_type: pattern.block_type(),
            });
        }
    }
    Ok(())
}
