//! Error types for gridmatch.
//!
//! All errors are strongly typed using thiserror. This enables pattern
//! matching on specific error conditions and provides clear error messages.
//! Expected failures are always returned as values; nothing in this crate
//! panics on malformed input.

use thiserror::Error;

use crate::block::BlockType;
use crate::pattern::PatternType;
use crate::position::Position;

/// Validation errors that occur before an executor touches the grid.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The pattern handed to an executor carries no positions.
    #[error("Pattern has no positions")]
    EmptyPattern,

    /// A merge execution was attempted without a trigger position.
    #[error("Merge patterns require a trigger position")]
    MissingTriggerPosition,

    /// An executor received a pattern variant it does not handle.
    #[error("Pattern is not a {expected} pattern (got {actual})")]
    WrongPatternType {
        /// Pattern type the executor supports.
        expected: PatternType,
        /// Pattern type it was given.
        actual: PatternType,
    },

    /// A tier outside `1..=MAX_TIER` was supplied.
    #[error("Tier {tier} is out of range [1, {max_tier}]")]
    TierOutOfRange {
        /// The offending tier.
        tier: u8,
        /// The configured ceiling.
        max_tier: u8,
    },
}

/// Execution errors that occur while an executor inspects or mutates state.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// A matched position no longer holds a block of the pattern's type.
    ///
    /// Patterns can go stale mid-cascade; executors re-validate at execution
    /// time and surface this instead of acting on outdated positions.
    #[error("Position {position} no longer holds a {block_type} block")]
    StalePattern {
        /// Position that failed re-validation.
        position: Position,
        /// Block type the pattern claimed.
        block_type: BlockType,
    },

    /// A merge would push a block past the tier ceiling.
    #[error("Cannot merge blocks beyond T{max_tier}")]
    TierCeiling {
        /// The configured maximum tier.
        max_tier: u8,
    },

    /// No executor is registered for this pattern type.
    ///
    /// The executor set is closed, so this is a configuration defect rather
    /// than a normal runtime branch.
    #[error("No executor registered for pattern type {pattern_type}")]
    UnsupportedPatternType {
        /// The unhandled pattern type.
        pattern_type: PatternType,
    },

    /// The command dispatch queue is full.
    #[error("Dispatch queue full (capacity: {capacity})")]
    DispatchQueueFull {
        /// Configured queue capacity.
        capacity: usize,
    },

    /// The command dispatch channel has no live consumer.
    #[error("Dispatch channel disconnected")]
    DispatchDisconnected,
}

/// Top-level error type for gridmatch.
///
/// This enum encompasses all possible errors that can occur when driving
/// the pattern engine.
#[derive(Debug, Error)]
pub enum GridMatchError {
    /// Input failed validation; retrying the same input cannot succeed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Execution against the current grid/dispatch state failed.
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// A "should never happen" internal defect.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable description.
        message: String,
    },
}

impl GridMatchError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an execution error.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Returns true if retrying the failed operation could succeed.
    ///
    /// Stale patterns and full dispatch queues are transient; validation
    /// failures and configuration defects are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Execution(e) => matches!(
                e,
                ExecutionError::StalePattern { .. } | ExecutionError::DispatchQueueFull { .. }
            ),
            Self::Internal { .. } => false,
        }
    }
}

/// Result type alias for gridmatch operations.
pub type GridResult<T> = Result<T, GridMatchError>;
