//! Player progression port: merge unlock queries.
//!
//! Unlock state is owned by the host; the resolver and executors query it
//! through `UnlockReader` so the engine stays testable with arbitrary unlock
//! configurations and no global mutable state.

use std::collections::HashSet;
use std::sync::RwLock;

use crate::block::BlockType;

/// Query capability over the player's merge unlocks.
pub trait UnlockReader: Send + Sync {
    /// Returns true if merging `block_type` up to `tier` has been unlocked.
    fn is_merge_unlocked(&self, block_type: BlockType, tier: u8) -> bool;
}

/// In-memory unlock table keyed by `(block_type, tier)`.
#[derive(Debug, Default)]
pub struct UnlockTable {
    unlocked: RwLock<HashSet<(BlockType, u8)>>,
}

impl UnlockTable {
    /// Creates a table with nothing unlocked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlocks merging `block_type` up to `tier`.
    pub fn unlock(&self, block_type: BlockType, tier: u8) {
        if let Ok(mut unlocked) = self.unlocked.write() {
            unlocked.insert((block_type, tier));
        }
    }

    /// Revokes an unlock (used by tests and sandbox modes).
    pub fn lock(&self, block_type: BlockType, tier: u8) {
        if let Ok(mut unlocked) = self.unlocked.write() {
            unlocked.remove(&(block_type, tier));
        }
    }
}

impl UnlockReader for UnlockTable {
    fn is_merge_unlocked(&self, block_type: BlockType, tier: u8) -> bool {
        self.unlocked
            .read()
            .map(|u| u.contains(&(block_type, tier)))
            .unwrap_or(false)
    }
}
