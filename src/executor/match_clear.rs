//! Plain match execution: remove matched blocks, grant flat rewards.

use crate::dispatch::MutationIntent;
use crate::error::{GridResult, ValidationError};
use crate::outcome::{rewards_for, PatternOutcome};
use crate::pattern::{Pattern, PatternType};

use super::{validate_occupancy, ExecutionContext, PatternExecutor};

/// Score granted per matched block.
pub const MATCH_SCORE_PER_BLOCK: u32 = 10;

/// Resource/attribute amount granted per matched block.
pub const MATCH_REWARD_PER_BLOCK: u32 = 5;

/// Estimated cost per matched block, in milliseconds.
const ESTIMATE_MS_PER_BLOCK: f32 = 5.0;

/// Removes every matched block and grants rewards proportional to pattern
/// size, with no tier change and a multiplier of 1.0.
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchExecutor;

impl MatchExecutor {
    /// Creates the executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PatternExecutor for MatchExecutor {
    fn id(&self) -> &'static str {
        "match-clear"
    }

    fn pattern_type(&self) -> PatternType {
        PatternType::Match
    }

    fn can_execute(&self, pattern: &Pattern, context: &ExecutionContext) -> GridResult<bool> {
        if pattern.pattern_type() != PatternType::Match || pattern.is_empty() {
            return Ok(false);
        }
        Ok(validate_occupancy(pattern, context.grid.as_ref()).is_ok())
    }

    fn estimate_execution_time_ms(&self, pattern: &Pattern) -> f32 {
        ESTIMATE_MS_PER_BLOCK * pattern.len() as f32
    }

    fn execute(&self, pattern: &Pattern, context: &ExecutionContext) -> GridResult<PatternOutcome> {
        if pattern.pattern_type() != PatternType::Match {
            return Err(ValidationError::WrongPatternType {
                expected: PatternType::Match,
                actual: pattern.pattern_type(),
            }
            .into());
        }
        if pattern.is_empty() {
            return Err(ValidationError::EmptyPattern.into());
        }
        validate_occupancy(pattern, context.grid.as_ref())?;

        for &position in pattern.positions() {
            context.dispatcher.dispatch(MutationIntent::remove(position))?;
        }

        let count = u32::try_from(pattern.len()).unwrap_or(u32::MAX);
        let (resource_rewards, attribute_rewards) =
            rewards_for(pattern.block_type(), MATCH_REWARD_PER_BLOCK * count);

        // Removing blocks can expose new adjacencies, so the host should
        // re-evaluate after applying this outcome.
        Ok(PatternOutcome::removal(
            pattern.positions().iter().copied().collect(),
            resource_rewards,
            attribute_rewards,
            MATCH_SCORE_PER_BLOCK * count,
        ))
    }
}
