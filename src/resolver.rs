//! Pattern-to-executor resolution.
//!
//! A single, auditable decision point for match-vs-merge selection. The
//! executor set is small and closed, so the policy is a plain `match` over
//! the pattern type plus one unlock query, not a plugin registry.

use std::sync::Arc;

use crate::error::{ExecutionError, GridResult};
use crate::executor::{ExecutionContext, MatchExecutor, MergeExecutor, PatternExecutor};
use crate::pattern::{Pattern, PatternType};

/// Selects exactly one executor for a detected pattern.
///
/// Policy for Match-type patterns: if merging the pattern's block type to
/// tier 2 or tier 3 is unlocked, select the merge executor, otherwise the
/// match executor. The resolver deliberately does not read block tiers from
/// the grid; the merge executor re-validates actual tiers at execution time.
pub struct ExecutorResolver {
    match_executor: Arc<MatchExecutor>,
    merge_executor: Arc<MergeExecutor>,
}

/// Merge unlock tiers the resolver consults.
const RESOLVED_MERGE_TIERS: [u8; 2] = [2, 3];

impl ExecutorResolver {
    /// Creates a resolver with one shared instance of each executor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            match_executor: Arc::new(MatchExecutor::new()),
            merge_executor: Arc::new(MergeExecutor::new()),
        }
    }

    /// Resolves the executor for `pattern`.
    ///
    /// Pattern types with no registered executor are a configuration error,
    /// surfaced rather than silently swallowed.
    pub fn resolve(
        &self,
        pattern: &Pattern,
        context: &ExecutionContext,
    ) -> GridResult<Arc<dyn PatternExecutor>> {
        match pattern.pattern_type() {
            PatternType::Match => {
                let merge_unlocked = RESOLVED_MERGE_TIERS
                    .iter()
                    .any(|&tier| context.unlocks.is_merge_unlocked(pattern.block_type(), tier));
                if merge_unlocked {
                    Ok(Arc::clone(&self.merge_executor) as Arc<dyn PatternExecutor>)
                } else {
                    Ok(Arc::clone(&self.match_executor) as Arc<dyn PatternExecutor>)
                }
            }
            other => Err(ExecutionError::UnsupportedPatternType {
                pattern_type: other,
            }
            .into()),
        }
    }
}

impl Default for ExecutorResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExecutorResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use super::*;
    use crate::block::BlockType;
    use crate::dispatch::{CommandDispatcher, RecordingDispatcher};
    use crate::grid::InMemoryGrid;
    use crate::position::Position;
    use crate::progression::UnlockTable;

    fn fixture(block_type: BlockType) -> (Pattern, ExecutionContext, Arc<UnlockTable>) {
        let grid = Arc::new(InMemoryGrid::new(10, 10));
        let mut positions = BTreeSet::new();
        for x in 0..3 {
            let p = Position::new(x, 0);
            grid.place(p, block_type, 1).unwrap();
            positions.insert(p);
        }
        let pattern = Pattern::create(positions, block_type, grid.as_ref()).unwrap();

        let unlocks = Arc::new(UnlockTable::new());
        let context = ExecutionContext::new(
            grid,
            Arc::new(RecordingDispatcher::new()) as Arc<dyn CommandDispatcher>,
            Arc::clone(&unlocks) as Arc<dyn crate::progression::UnlockReader>,
        );
        (pattern, context, unlocks)
    }

    #[test]
    fn test_no_unlock_selects_match() {
        let (pattern, context, _) = fixture(BlockType::Work);
        let executor = ExecutorResolver::new().resolve(&pattern, &context).unwrap();
        assert_eq!(executor.id(), "match-clear");
    }

    #[test]
    fn test_tier2_unlock_selects_merge() {
        let (pattern, context, unlocks) = fixture(BlockType::Work);
        unlocks.unlock(BlockType::Work, 2);

        let executor = ExecutorResolver::new().resolve(&pattern, &context).unwrap();
        assert_eq!(executor.id(), "merge-tier-up");
    }

    #[test]
    fn test_tier3_unlock_alone_selects_merge() {
        let (pattern, context, unlocks) = fixture(BlockType::Study);
        unlocks.unlock(BlockType::Study, 3);

        let executor = ExecutorResolver::new().resolve(&pattern, &context).unwrap();
        assert_eq!(executor.id(), "merge-tier-up");
    }

    #[test]
    fn test_unlock_for_other_type_does_not_leak() {
        let (pattern, context, unlocks) = fixture(BlockType::Work);
        unlocks.unlock(BlockType::Fun, 2);

        let executor = ExecutorResolver::new().resolve(&pattern, &context).unwrap();
        assert_eq!(executor.id(), "match-clear");
    }

    #[test]
    fn test_tier4_unlock_not_consulted() {
        // The resolver only checks tiers 2 and 3; the merge executor reads
        // actual tiers at execution time.
        let (pattern, context, unlocks) = fixture(BlockType::Work);
        unlocks.unlock(BlockType::Work, 4);

        let executor = ExecutorResolver::new().resolve(&pattern, &context).unwrap();
        assert_eq!(executor.id(), "match-clear");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let (pattern, context, unlocks) = fixture(BlockType::Health);
        let resolver = ExecutorResolver::new();

        let first = resolver.resolve(&pattern, &context).unwrap().id();
        let second = resolver.resolve(&pattern, &context).unwrap().id();
        assert_eq!(first, second);

        unlocks.unlock(BlockType::Health, 2);
        let third = resolver.resolve(&pattern, &context).unwrap().id();
        let fourth = resolver.resolve(&pattern, &context).unwrap().id();
        assert_eq!(third, "merge-tier-up");
        assert_eq!(third, fourth);
    }
}
