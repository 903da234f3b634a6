//! Detected-pattern value types.
//!
//! A `Pattern` is an immutable description of a group of same-type,
//! connected blocks found by a recognizer. It is constructed once per
//! detection, consumed once by a resolver/executor pair, and never mutated
//! or persisted beyond that single resolution pass.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::BlockType;
use crate::grid::GridReader;
use crate::position::Position;

/// The closed set of pattern categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Connected same-type group; handled by the match or merge executor.
    Match,
    /// Type-changing pattern; reserved for a future recognizer.
    Transmute,
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => write!(f, "Match"),
            Self::Transmute => write!(f, "Transmute"),
        }
    }
}

/// An immutable detected pattern.
///
/// Invariants, enforced at construction:
/// - `positions` is non-empty (distinctness comes from the set type)
/// - every position holds a block of `block_type` on the grid the pattern
///   was detected against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pattern_type: PatternType,
    positions: BTreeSet<Position>,
    block_type: BlockType,
}

impl Pattern {
    /// Creates a match pattern, re-checking the grid for every claimed
    /// position.
    ///
    /// Returns `None` if `positions` is empty or any position does not hold
    /// a block of `block_type`. This is a defensive invariant check, not a
    /// normal-path branch; recognizers only hand in positions they just read
    /// from the same grid.
    #[must_use]
    pub fn create(
        positions: BTreeSet<Position>,
        block_type: BlockType,
        grid: &dyn GridReader,
    ) -> Option<Self> {
        if positions.is_empty() {
            return None;
        }
        let all_match = positions.iter().all(|&p| {
            grid.try_get_block_at(p)
                .is_some_and(|b| b.block_type == block_type)
        });
        if !all_match {
            return None;
        }
        Some(Self {
            pattern_type: PatternType::Match,
            positions,
            block_type,
        })
    }

    /// Pattern category.
    #[must_use]
    pub const fn pattern_type(&self) -> PatternType {
        self.pattern_type
    }

    /// The matched positions.
    #[must_use]
    pub const fn positions(&self) -> &BTreeSet<Position> {
        &self.positions
    }

    /// The block type shared by every matched position.
    #[must_use]
    pub const fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// Number of matched positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if the pattern has no positions. Cannot occur for patterns built
    /// through `create`; present for completeness on deserialized values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true if `position` is part of this pattern.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pattern: {} {} block(s)",
            self.pattern_type,
            self.positions.len(),
            self.block_type
        )
    }
}
