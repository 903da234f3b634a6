//! Grid coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D grid coordinate.
///
/// Ordering is lexicographic on `(x, y)` so positions can live in ordered
/// sets with stable iteration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Position {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the four orthogonal neighbors (up, down, left, right).
    ///
    /// Neighbors may fall outside the grid; callers filter through
    /// `GridReader::is_valid_position`.
    #[must_use]
    pub const fn neighbors4(self) -> [Self; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
            Self::new(self.x + 1, self.y),
        ]
    }

    /// Returns true if `other` is orthogonally adjacent to this position.
    #[must_use]
    pub const fn is_adjacent_to(self, other: Self) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx + dy == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
