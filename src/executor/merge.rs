//! Merge execution: consume N same-type blocks, produce one block of the
//! next tier at the trigger position, with exponentially scaled rewards.

use crate::block::MAX_TIER;
use crate::dispatch::MutationIntent;
use crate::error::{ExecutionError, GridResult, ValidationError};
use crate::outcome::{rewards_for, CreatedBlock, PatternOutcome};
use crate::pattern::{Pattern, PatternType};

use super::match_clear::{MATCH_REWARD_PER_BLOCK, MATCH_SCORE_PER_BLOCK};
use super::{validate_occupancy, ExecutionContext, PatternExecutor};

/// Estimated cost per matched block, in milliseconds.
const ESTIMATE_MS_PER_BLOCK: f32 = 10.0;

/// Merges a matched group into a single next-tier block.
///
/// Uses the same base-score formula as the match executor, scaled by
/// `3^(result_tier - 1)`: a T2 result triples the base, T3 gives ×9, T4
/// gives ×27. The source tier is read from the grid at execution time, not
/// taken from the resolver's selection.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeExecutor;

impl MergeExecutor {
    /// Creates the executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Exponential reward multiplier for a merge producing `result_tier`.
    #[must_use]
    pub fn tier_multiplier(result_tier: u8) -> f32 {
        3_u32.pow(u32::from(result_tier.saturating_sub(1))) as f32
    }

    /// Highest tier among the matched blocks, read from the grid.
    ///
    /// Assumes occupancy was already validated; vacant cells count as tier
    /// zero and cannot raise the maximum.
    fn source_tier(pattern: &Pattern, context: &ExecutionContext) -> u8 {
        pattern
            .positions()
            .iter()
            .filter_map(|&p| context.grid.try_get_block_at(p))
            .map(|b| b.tier)
            .max()
            .unwrap_or(0)
    }
}

impl PatternExecutor for MergeExecutor {
    fn id(&self) -> &'static str {
        "merge-tier-up"
    }

    fn pattern_type(&self) -> PatternType {
        PatternType::Match
    }

    fn can_execute(&self, pattern: &Pattern, context: &ExecutionContext) -> GridResult<bool> {
        if pattern.pattern_type() != PatternType::Match || pattern.is_empty() {
            return Ok(false);
        }
        if validate_occupancy(pattern, context.grid.as_ref()).is_err() {
            return Ok(false);
        }
        Ok(Self::source_tier(pattern, context) < MAX_TIER)
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
        let Some(trigger) = context.trigger_position else {
            return Err(ValidationError::MissingTriggerPosition.into());
        };
        validate_occupancy(pattern, context.grid.as_ref())?;

        let source_tier = Self::source_tier(pattern, context);
        if source_tier >= MAX_TIER {
            return Err(ExecutionError::TierCeiling { max_tier: MAX_TIER }.into());
        }
        let result_tier = source_tier + 1;

        for &position in pattern.positions() {
            context.dispatcher.dispatch(MutationIntent::remove(position))?;
        }
        context.dispatcher.dispatch(MutationIntent::create(
            trigger,
            pattern.block_type(),
            result_tier,
        ))?;

        let count = u32::try_from(pattern.len()).unwrap_or(u32::MAX);
        let (resource_rewards, attribute_rewards) =
            rewards_for(pattern.block_type(), MATCH_REWARD_PER_BLOCK * count);

        Ok(PatternOutcome::removal(
            pattern.positions().iter().copied().collect(),
            resource_rewards,
            attribute_rewards,
            MATCH_SCORE_PER_BLOCK * count,
        )
        .with_bonus_multiplier(Self::tier_multiplier(result_tier))
        .with_created_block(CreatedBlock {
            position: trigger,
            block_type: pattern.block_type(),
            tier: result_tier,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use super::*;
    use crate::block::BlockType;
    use crate::dispatch::{CommandDispatcher, MutationOp, RecordingDispatcher};
    use crate::grid::InMemoryGrid;
    use crate::position::Position;
    use crate::progression::UnlockTable;

    fn grid_with_row(block_type: BlockType, tier: u8, count: i32) -> (Arc<InMemoryGrid>, Pattern) {
        let grid = Arc::new(InMemoryGrid::new(10, 10));
        let mut positions = BTreeSet::new();
        for x in 0..count {
            let p = Position::new(x, 0);
            grid.place(p, block_type, tier).unwrap();
            positions.insert(p);
        }
        let pattern = Pattern::create(positions, block_type, grid.as_ref()).unwrap();
        (grid, pattern)
    }

    fn context_with(grid: Arc<InMemoryGrid>) -> (ExecutionContext, Arc<RecordingDispatcher>) {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let context = ExecutionContext::new(
            grid,
            Arc::clone(&dispatcher) as Arc<dyn CommandDispatcher>,
            Arc::new(UnlockTable::new()),
        );
        (context, dispatcher)
    }

    #[test]
    fn test_merge_three_t1_into_one_t2() {
        let (grid, pattern) = grid_with_row(BlockType::Work, 1, 3);
        let trigger = Position::new(1, 0);
        let (context, dispatcher) = context_with(grid);
        let context = context.with_trigger(trigger);

        let outcome = MergeExecutor::new().execute(&pattern, &context).unwrap();

        assert_eq!(outcome.removed_positions.len(), 3);
        assert_eq!(outcome.created_blocks.len(), 1);
        let created = outcome.created_blocks[0];
        assert_eq!(created.position, trigger);
        assert_eq!(created.block_type, BlockType::Work);
        assert_eq!(created.tier, 2);

        // base 30, T2 result => x3
        assert_eq!(outcome.score_reward, 30);
        assert_eq!(outcome.final_score(), 90);

        let intents = dispatcher.take();
        assert_eq!(intents.len(), 4);
        assert!(matches!(
            intents[3].op,
            MutationOp::CreateBlock { tier: 2, .. }
        ));
    }

    #[test]
    fn test_reward_scaling_law() {
        for (source_tier, expected_score) in [(1, 90), (2, 270), (3, 810)] {
            let (grid, pattern) = grid_with_row(BlockType::Study, source_tier, 3);
            let (context, _) = context_with(grid);
            let context = context.with_trigger(Position::new(0, 0));

            let outcome = MergeExecutor::new().execute(&pattern, &context).unwrap();
            assert_eq!(outcome.created_blocks[0].tier, source_tier + 1);
            assert_eq!(outcome.final_score(), expected_score);
        }
    }

    #[test]
    fn test_max_tier_rejected_not_clamped() {
        let (grid, pattern) = grid_with_row(BlockType::Work, MAX_TIER, 3);
        let (context, dispatcher) = context_with(grid);
        let context = context.with_trigger(Position::new(0, 0));
        let executor = MergeExecutor::new();

        assert!(!executor.can_execute(&pattern, &context).unwrap());
        let err = executor.execute(&pattern, &context).unwrap_err();
        assert_eq!(format!("{err}"), "Execution error: Cannot merge blocks beyond T4");
        assert!(dispatcher.take().is_empty());
    }

    #[test]
    fn test_mixed_tiers_merge_from_max() {
        let grid = Arc::new(InMemoryGrid::new(10, 10));
        let mut positions = BTreeSet::new();
        for (x, tier) in [(0, 1), (1, 2), (2, 1)] {
            let p = Position::new(x, 0);
            grid.place(p, BlockType::Fun, tier).unwrap();
            positions.insert(p);
        }
        let pattern = Pattern::create(positions, BlockType::Fun, grid.as_ref()).unwrap();
        let (context, _) = context_with(grid);
        let context = context.with_trigger(Position::new(1, 0));

        let outcome = MergeExecutor::new().execute(&pattern, &context).unwrap();
        assert_eq!(outcome.created_blocks[0].tier, 3);
        assert_eq!(outcome.final_score(), 270);
    }

    #[test]
    fn test_missing_trigger_is_recoverable_error() {
        let (grid, pattern) = grid_with_row(BlockType::Work, 1, 3);
        let (context, dispatcher) = context_with(grid);

        let err = MergeExecutor::new().execute(&pattern, &context).unwrap_err();
        assert!(err.is_validation());
        assert!(format!("{err}").contains("Merge patterns require a trigger position"));
        assert!(dispatcher.take().is_empty());
    }

    #[test]
    fn test_stale_pattern_rejected() {
        let (grid, pattern) = grid_with_row(BlockType::Work, 1, 3);
        grid.remove(Position::new(2, 0)).unwrap();
        let (context, _) = context_with(grid);
        let context = context.with_trigger(Position::new(1, 0));
        let executor = MergeExecutor::new();

        assert!(!executor.can_execute(&pattern, &context).unwrap());
        assert!(executor.execute(&pattern, &context).is_err());
    }

    #[test]
    fn test_tier_multiplier_table() {
        assert!((MergeExecutor::tier_multiplier(2) - 3.0).abs() < f32::EPSILON);
        assert!((MergeExecutor::tier_multiplier(3) - 9.0).abs() < f32::EPSILON);
        assert!((MergeExecutor::tier_multiplier(4) - 27.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_estimate_ten_ms_per_block() {
        let (_, pattern) = grid_with_row(BlockType::Work, 1, 4);
        let estimate = MergeExecutor::new().estimate_execution_time_ms(&pattern);
        assert!((estimate - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_executor_metadata() {
        let executor = MergeExecutor::new();
        assert_eq!(executor.id(), "merge-tier-up");
        assert_eq!(executor.pattern_type(), PatternType::Match);
        assert!(executor.is_enabled());
    }
}
