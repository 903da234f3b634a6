//! Grid query port and an in-memory implementation.
//!
//! The pattern core never owns the grid; it reads occupancy through the
//! `GridReader` trait. By using a trait, we enable:
//! - In-memory grids for testing and embedded use
//! - The host game's live grid service in production

use std::collections::HashMap;
use std::sync::RwLock;

use crate::block::{BlockId, BlockInfo, BlockType};
use crate::error::{GridMatchError, GridResult};
use crate::position::Position;

/// Read capability over the grid.
///
/// All recognizers and executors see the grid exclusively through this
/// trait; they never mutate it directly.
pub trait GridReader: Send + Sync {
    /// Returns the block at `position`, if the position is valid and occupied.
    fn try_get_block_at(&self, position: Position) -> Option<BlockInfo>;

    /// Returns true if `position` lies inside the grid bounds.
    fn is_valid_position(&self, position: Position) -> bool;
}

/// A rectangular in-memory grid.
///
/// Interior mutability lets hosts and tests mutate the grid behind the same
/// `Arc` that executors read through.
#[derive(Debug)]
pub struct InMemoryGrid {
    width: i32,
    height: i32,
    cells: RwLock<HashMap<Position, BlockInfo>>,
}

impl InMemoryGrid {
    /// Creates an empty `width × height` grid.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            cells: RwLock::new(HashMap::new()),
        }
    }

    /// Places a new block, replacing any block already at `position`.
    ///
    /// Returns the id of the placed block.
    pub fn place(&self, position: Position, block_type: BlockType, tier: u8) -> GridResult<BlockId> {
        if !self.is_valid_position(position) {
            return Err(GridMatchError::internal(format!(
                "position {position} is outside the {}x{} grid",
                self.width, self.height
            )));
        }
        let block = BlockInfo::new(position, block_type, tier)?;
        let id = block.id;
        let mut cells = self
            .cells
            .write()
            .map_err(|_| GridMatchError::internal("grid lock poisoned"))?;
        cells.insert(position, block);
        Ok(id)
    }

    /// Removes and returns the block at `position`, if any.
    pub fn remove(&self, position: Position) -> GridResult<Option<BlockInfo>> {
        let mut cells = self
            .cells
            .write()
            .map_err(|_| GridMatchError::internal("grid lock poisoned"))?;
        Ok(cells.remove(&position))
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.read().map(|c| c.len()).unwrap_or(0)
    }
}

impl GridReader for InMemoryGrid {
    fn try_get_block_at(&self, position: Position) -> Option<BlockInfo> {
        self.cells.read().ok()?.get(&position).copied()
    }

    fn is_valid_position(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }
}
