//! # gridmatch - Pattern recognition and execution for tiered block grids
//!
//! gridmatch detects spatial patterns of blocks on a 2D grid, decides which
//! executor should act on each detection (plain match-clear vs. tier-up
//! merge, gated on progression unlocks), and computes the resulting state
//! transition as mutation intents plus a predicted outcome. A concurrency
//! tracker lets a turn-advance controller wait until all in-flight pattern
//! cascades settle before mutating the grid further.
//!
//! The crate is a library consumed by a host game loop. The host owns the
//! grid, the command pipeline that applies mutations, and the unlock state;
//! gridmatch sees them only through the `GridReader`, `CommandDispatcher`,
//! and `UnlockReader` ports.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gridmatch::{BlockType, ExecutionContext, InMemoryGrid, PatternEngine, Position,
//!     RecordingDispatcher, UnlockTable};
//!
//! let grid = Arc::new(InMemoryGrid::new(10, 10));
//! for x in 0..3 {
//!     grid.place(Position::new(x, 0), BlockType::Work, 1)?;
//! }
//!
//! let engine = PatternEngine::new();
//! let context = ExecutionContext::new(
//!     grid,
//!     Arc::new(RecordingDispatcher::new()),
//!     Arc::new(UnlockTable::new()),
//! )
//! .with_trigger(Position::new(1, 0));
//!
//! let outcomes = engine.process_trigger(Position::new(1, 0), &context)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

// Core value types and ports
pub mod block;
pub mod dispatch;
pub mod error;
pub mod grid;
pub mod outcome;
pub mod pattern;
pub mod position;
pub mod progression;

// Recognition, resolution, and execution
pub mod engine;
pub mod executor;
pub mod recognizer;
pub mod resolver;
pub mod tracker;

// Re-export primary types at crate root for convenience
pub use block::{BlockId, BlockInfo, BlockType, MAX_TIER, MIN_TIER};
pub use dispatch::{
    ChannelDispatcher, CommandDispatcher, MutationIntent, MutationOp, RecordingDispatcher,
};
pub use engine::PatternEngine;
pub use error::{ExecutionError, GridMatchError, GridResult, ValidationError};
pub use executor::{ExecutionContext, MatchExecutor, MergeExecutor, PatternExecutor};
pub use grid::{GridReader, InMemoryGrid};
pub use outcome::{
    AttributeKind, AttributeReward, CreatedBlock, ModifiedBlock, PatternOutcome, ResourceKind,
    ResourceReward,
};
pub use pattern::{Pattern, PatternType};
pub use position::Position;
pub use progression::{UnlockReader, UnlockTable};
pub use recognizer::{MatchRecognizer, DEFAULT_MIN_MATCH_SIZE};
pub use resolver::ExecutorResolver;
pub use tracker::{ProcessingGuard, ProcessingTracker, WaitOutcome, DEFAULT_WAIT_TIMEOUT};
