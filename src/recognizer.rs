//! Match pattern recognition.
//!
//! Pure connected-component search over a grid snapshot. Same snapshot,
//! same trigger, same minimum size always yield the same set of patterns;
//! internal iteration order never leaks into the result because positions
//! are collected into an ordered set.

use std::collections::{BTreeSet, VecDeque};

use crate::grid::GridReader;
use crate::pattern::Pattern;
use crate::position::Position;

/// Default minimum component size for a match.
pub const DEFAULT_MIN_MATCH_SIZE: usize = 3;

/// Finds maximal 4-connected groups of same-type blocks through a trigger
/// position.
#[derive(Debug, Clone, Copy)]
pub struct MatchRecognizer {
    min_match_size: usize,
}

impl MatchRecognizer {
    /// Creates a recognizer with the default minimum match size (3).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_match_size: DEFAULT_MIN_MATCH_SIZE,
        }
    }

    /// Creates a recognizer with a custom minimum match size.
    ///
    /// Sizes below 1 are treated as 1.
    #[must_use]
    pub const fn with_min_match_size(min_match_size: usize) -> Self {
        Self {
            min_match_size: if min_match_size == 0 { 1 } else { min_match_size },
        }
    }

    /// Configured minimum component size.
    #[must_use]
    pub const fn min_match_size(&self) -> usize {
        self.min_match_size
    }

    /// Recognizes patterns through `trigger`.
    ///
    /// Flood-fills 4-directionally from the trigger through occupied cells
    /// of the trigger block's type. Emits one `Match` pattern when the
    /// component reaches the minimum size; otherwise returns an empty
    /// vector. Never fails: an invalid or vacant trigger simply yields no
    /// patterns.
    #[must_use]
    pub fn recognize(&self, trigger: Position, grid: &dyn GridReader) -> Vec<Pattern> {
        if !grid.is_valid_position(trigger) {
            return Vec::new();
        }
        let Some(seed) = grid.try_get_block_at(trigger) else {
            return Vec::new();
        };
        let block_type = seed.block_type;

        let mut component = BTreeSet::new();
        let mut queue = VecDeque::new();
        component.insert(trigger);
        queue.push_back(trigger);

        while let Some(current) = queue.pop_front() {
            for neighbor in current.neighbors4() {
                if component.contains(&neighbor) || !grid.is_valid_position(neighbor) {
                    continue;
                }
                let same_type = grid
                    .try_get_block_at(neighbor)
                    .is_some_and(|b| b.block_type == block_type);
                if same_type {
                    component.insert(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        if component.len() < self.min_match_size {
            return Vec::new();
        }

        Pattern::create(component, block_type, grid)
            .into_iter()
            .collect()
    }
}

impl Default for MatchRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::grid::InMemoryGrid;
    use crate::pattern::PatternType;

    fn place_row(grid: &InMemoryGrid, y: i32, xs: std::ops::Range<i32>, block_type: BlockType) {
        for x in xs {
            grid.place(Position::new(x, y), block_type, 1).unwrap();
        }
    }

    #[test]
    fn test_horizontal_row_of_three() {
        let grid = InMemoryGrid::new(10, 10);
        place_row(&grid, 0, 0..3, BlockType::Work);

        let patterns = MatchRecognizer::new().recognize(Position::new(1, 0), &grid);
        assert_eq!(patterns.len(), 1);

        let pattern = &patterns[0];
        assert_eq!(pattern.pattern_type(), PatternType::Match);
        assert_eq!(pattern.block_type(), BlockType::Work);
        assert_eq!(pattern.len(), 3);
        for x in 0..3 {
            assert!(pattern.contains(Position::new(x, 0)));
        }
    }

    #[test]
    fn test_two_blocks_below_minimum() {
        let grid = InMemoryGrid::new(10, 10);
        place_row(&grid, 0, 0..2, BlockType::Work);

        let patterns = MatchRecognizer::new().recognize(Position::new(0, 0), &grid);
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_vacant_trigger_yields_nothing() {
        let grid = InMemoryGrid::new(10, 10);
        place_row(&grid, 0, 0..3, BlockType::Work);

        let patterns = MatchRecognizer::new().recognize(Position::new(5, 5), &grid);
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_out_of_bounds_trigger_yields_nothing() {
        let grid = InMemoryGrid::new(5, 5);
        let patterns = MatchRecognizer::new().recognize(Position::new(-1, 0), &grid);
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_different_types_break_connectivity() {
        let grid = InMemoryGrid::new(10, 10);
        grid.place(Position::new(0, 0), BlockType::Work, 1).unwrap();
        grid.place(Position::new(1, 0), BlockType::Study, 1).unwrap();
        grid.place(Position::new(2, 0), BlockType::Work, 1).unwrap();

        let patterns = MatchRecognizer::new().recognize(Position::new(0, 0), &grid);
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_l_shaped_component() {
        let grid = InMemoryGrid::new(10, 10);
        grid.place(Position::new(0, 0), BlockType::Fun, 1).unwrap();
        grid.place(Position::new(0, 1), BlockType::Fun, 1).unwrap();
        grid.place(Position::new(0, 2), BlockType::Fun, 1).unwrap();
        grid.place(Position::new(1, 2), BlockType::Fun, 1).unwrap();

        let patterns = MatchRecognizer::new().recognize(Position::new(0, 1), &grid);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].len(), 4);
    }

    #[test]
    fn test_diagonal_not_connected() {
        let grid = InMemoryGrid::new(10, 10);
        grid.place(Position::new(0, 0), BlockType::Work, 1).unwrap();
        grid.place(Position::new(1, 1), BlockType::Work, 1).unwrap();
        grid.place(Position::new(2, 2), BlockType::Work, 1).unwrap();

        let patterns = MatchRecognizer::new().recognize(Position::new(1, 1), &grid);
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_deterministic_across_triggers_in_same_component() {
        let grid = InMemoryGrid::new(10, 10);
        place_row(&grid, 3, 2..6, BlockType::Health);

        let recognizer = MatchRecognizer::new();
        let from_left = recognizer.recognize(Position::new(2, 3), &grid);
        let from_right = recognizer.recognize(Position::new(5, 3), &grid);
        assert_eq!(from_left, from_right);
    }

    #[test]
    fn test_mixed_tiers_still_connect() {
        // Connectivity is by type; tier differences are the merge executor's
        // concern at execution time.
        let grid = InMemoryGrid::new(10, 10);
        grid.place(Position::new(0, 0), BlockType::Work, 1).unwrap();
        grid.place(Position::new(1, 0), BlockType::Work, 2).unwrap();
        grid.place(Position::new(2, 0), BlockType::Work, 1).unwrap();

        let patterns = MatchRecognizer::new().recognize(Position::new(1, 0), &grid);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].len(), 3);
    }

    #[test]
    fn test_custom_min_match_size() {
        let grid = InMemoryGrid::new(10, 10);
        place_row(&grid, 0, 0..4, BlockType::Work);

        let strict = MatchRecognizer::with_min_match_size(5);
        assert!(strict.recognize(Position::new(0, 0), &grid).is_empty());

        let lenient = MatchRecognizer::with_min_match_size(4);
        assert_eq!(lenient.recognize(Position::new(0, 0), &grid).len(), 1);
    }
}
