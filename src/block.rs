//! Block types, tiers, and the read-only block view.
//!
//! Blocks are created and destroyed entirely by the host grid service. The
//! pattern core never constructs or owns live blocks; it reads `BlockInfo`
//! snapshots through the `GridReader` port.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GridResult, ValidationError};
use crate::position::Position;

/// Highest tier a block can reach. Merges producing a tier above this are
/// rejected, never clamped.
pub const MAX_TIER: u8 = 4;

/// Lowest (starting) tier.
pub const MIN_TIER: u8 = 1;

/// The closed set of block categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Career blocks; reward money.
    Work,
    /// Education blocks; reward knowledge.
    Study,
    /// Wellness blocks; reward health.
    Health,
    /// Social blocks; reward social capital.
    Relationship,
    /// Creative blocks; reward creativity.
    Creativity,
    /// Leisure blocks; reward happiness.
    Fun,
}

impl BlockType {
    /// All block types, for iteration in tests and unlock tables.
    pub const ALL: [Self; 6] = [
        Self::Work,
        Self::Study,
        Self::Health,
        Self::Relationship,
        Self::Creativity,
        Self::Fun,
    ];
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Work => "Work",
            Self::Study => "Study",
            Self::Health => "Health",
            Self::Relationship => "Relationship",
            Self::Creativity => "Creativity",
            Self::Fun => "Fun",
        };
        write!(f, "{name}")
    }
}

/// Unique identifier for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    /// Creates a new random block ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only snapshot of a block on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Opaque block identity.
    pub id: BlockId,
    /// Where the block sits on the grid.
    pub position: Position,
    /// Category of the block.
    pub block_type: BlockType,
    /// Progression tier, `1..=MAX_TIER`.
    pub tier: u8,
}

impl BlockInfo {
    /// Creates a snapshot, validating the tier range.
    pub fn new(position: Position, block_type: BlockType, tier: u8) -> GridResult<Self> {
        if !(MIN_TIER..=MAX_TIER).contains(&tier) {
            return Err(ValidationError::TierOutOfRange {
                tier,
                max_tier: MAX_TIER,
            }
            .into());
        }
        Ok(Self {
            id: BlockId::new(),
            position,
            block_type,
            tier,
        })
    }

    /// Returns true if this block can still tier up.
    #[must_use]
    pub const fn is_below_max_tier(&self) -> bool {
        self.tier < MAX_TIER
    }
}
