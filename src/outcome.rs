//! Predicted execution outcomes.
//!
//! A `PatternOutcome` describes what executing a pattern would change,
//! without the change having happened: positions removed, blocks created or
//! modified, rewards granted. The same value backs both real execution and
//! speculative UI previews, so it is immutable after construction; a new
//! instance is built per query.

use serde::{Deserialize, Serialize};

use crate::block::BlockType;
use crate::position::Position;

/// Spendable resource categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Currency earned from Work blocks.
    Money,
    /// Standing earned from Relationship blocks.
    SocialCapital,
}

/// Permanent character attribute categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Earned from Study blocks.
    Knowledge,
    /// Earned from Health blocks.
    Health,
    /// Earned from Fun blocks.
    Happiness,
    /// Earned from Creativity blocks.
    Creativity,
}

/// A resource grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReward {
    /// What is granted.
    pub kind: ResourceKind,
    /// How much.
    pub amount: u32,
}

/// An attribute grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeReward {
    /// What is granted.
    pub kind: AttributeKind,
    /// How much.
    pub amount: u32,
}

/// A block the outcome would create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBlock {
    /// Where it lands.
    pub position: Position,
    /// Its category.
    pub block_type: BlockType,
    /// Its tier.
    pub tier: u8,
}

/// A block the outcome would re-type in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedBlock {
    /// Which block.
    pub position: Position,
    /// Its new category.
    pub new_type: BlockType,
}

/// Maps a block type to a reward grant of the given amount.
///
/// Work and Relationship pay out resources; the rest raise attributes.
#[must_use]
pub fn rewards_for(
    block_type: BlockType,
    amount: u32,
) -> (Vec<ResourceReward>, Vec<AttributeReward>) {
    match block_type {
        BlockType::Work => (
            vec![ResourceReward {
                kind: ResourceKind::Money,
                amount,
            }],
            Vec::new(),
        ),
        BlockType::Relationship => (
            vec![ResourceReward {
                kind: ResourceKind::SocialCapital,
                amount,
            }],
            Vec::new(),
        ),
        BlockType::Study => (
            Vec::new(),
            vec![AttributeReward {
                kind: AttributeKind::Knowledge,
                amount,
            }],
        ),
        BlockType::Health => (
            Vec::new(),
            vec![AttributeReward {
                kind: AttributeKind::Health,
                amount,
            }],
        ),
        BlockType::Fun => (
            Vec::new(),
            vec![AttributeReward {
                kind: AttributeKind::Happiness,
                amount,
            }],
        ),
        BlockType::Creativity => (
            Vec::new(),
            vec![AttributeReward {
                kind: AttributeKind::Creativity,
                amount,
            }],
        ),
    }
}

/// Predicted effect of executing a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternOutcome {
    /// Positions whose blocks would be removed.
    pub removed_positions: Vec<Position>,
    /// Blocks that would be created.
    pub created_blocks: Vec<CreatedBlock>,
    /// Blocks that would be re-typed in place.
    pub modified_blocks: Vec<ModifiedBlock>,
    /// Resource grants.
    pub resource_rewards: Vec<ResourceReward>,
    /// Attribute grants.
    pub attribute_rewards: Vec<AttributeReward>,
    /// Base score before the bonus multiplier.
    pub score_reward: u32,
    /// Multiplier applied to `score_reward`; 1.0 unless the executor scales.
    pub bonus_multiplier: f32,
    /// True if applying this outcome can expose new patterns upstream.
    pub can_trigger_chains: bool,
}

impl PatternOutcome {
    /// Builds a plain removal outcome (match execution) with multiplier 1.0.
    #[must_use]
    pub fn removal(
        removed_positions: Vec<Position>,
        resource_rewards: Vec<ResourceReward>,
        attribute_rewards: Vec<AttributeReward>,
        score_reward: u32,
    ) -> Self {
        Self {
            removed_positions,
            created_blocks: Vec::new(),
            modified_blocks: Vec::new(),
            resource_rewards,
            attribute_rewards,
            score_reward,
            bonus_multiplier: 1.0,
            can_trigger_chains: true,
        }
    }

    /// Sets the bonus multiplier.
    #[must_use]
    pub fn with_bonus_multiplier(mut self, bonus_multiplier: f32) -> Self {
        self.bonus_multiplier = bonus_multiplier;
        self
    }

    /// Adds a created block.
    #[must_use]
    pub fn with_created_block(mut self, created: CreatedBlock) -> Self {
        self.created_blocks.push(created);
        self
    }

    /// Adds a modified block.
    #[must_use]
    pub fn with_modified_block(mut self, modified: ModifiedBlock) -> Self {
        self.modified_blocks.push(modified);
        self
    }

    /// Final score: `round(score_reward × bonus_multiplier)`.
    #[must_use]
    pub fn final_score(&self) -> u32 {
        let scaled = f64::from(self.score_reward) * f64::from(self.bonus_multiplier);
        if scaled <= 0.0 {
            return 0;
        }
        // Scores stay far below u32::MAX in practice; saturate on overflow.
        if scaled >= f64::from(u32::MAX) {
            return u32::MAX;
        }
        scaled.round() as u32
    }
}
