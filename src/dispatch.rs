//! Mutation command dispatch port.
//!
//! Executors never mutate the grid. They propose mutations as
//! `MutationIntent` values and hand them to a `CommandDispatcher`; the host's
//! single-writer command pipeline performs the actual mutation. Dispatch only
//! confirms issuance, it does not await the mutation's effect.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};

use crate::block::BlockType;
use crate::error::{ExecutionError, GridResult};
use crate::position::Position;

/// A proposed grid mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MutationOp {
    /// Remove the block at a position.
    RemoveBlock {
        /// Position to clear.
        position: Position,
    },

    /// Create a block at a position.
    CreateBlock {
        /// Position to fill.
        position: Position,
        /// Category of the new block.
        block_type: BlockType,
        /// Tier of the new block.
        tier: u8,
    },
}

/// A mutation proposal with its issuance timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationIntent {
    /// The proposed mutation.
    pub op: MutationOp,
    /// When the executor issued this intent.
    pub issued_at: DateTime<Utc>,
}

impl MutationIntent {
    /// Creates a remove-block intent stamped now.
    #[must_use]
    pub fn remove(position: Position) -> Self {
        Self {
            op: MutationOp::RemoveBlock { position },
            issued_at: Utc::now(),
        }
    }

    /// Creates a create-block intent stamped now.
    #[must_use]
    pub fn create(position: Position, block_type: BlockType, tier: u8) -> Self {
        Self {
            op: MutationOp::CreateBlock {
                position,
                block_type,
                tier,
            },
            issued_at: Utc::now(),
        }
    }
}

/// Capability to issue mutation intents toward the host command pipeline.
pub trait CommandDispatcher: Send + Sync {
    /// Issues one intent. Success means "enqueued", not "applied".
    fn dispatch(&self, intent: MutationIntent) -> GridResult<()>;
}

/// Dispatcher backed by a bounded channel.
///
/// Uses non-blocking `try_send` so a stalled consumer surfaces as a named
/// queue-full error instead of blocking the cascade thread.
#[derive(Debug)]
pub struct ChannelDispatcher {
    tx: Sender<MutationIntent>,
    capacity: usize,
}

impl ChannelDispatcher {
    /// Creates a dispatcher with the given queue capacity, returning the
    /// consumer end for the host to drain.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, Receiver<MutationIntent>) {
        let capacity = capacity.max(1);
        let (tx, rx) = bounded(capacity);
        (Self { tx, capacity }, rx)
    }
}

impl CommandDispatcher for ChannelDispatcher {
    fn dispatch(&self, intent: MutationIntent) -> GridResult<()> {
        match self.tx.try_send(intent) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(ExecutionError::DispatchQueueFull {
                capacity: self.capacity,
            }
            .into()),
            Err(TrySendError::Disconnected(_)) => {
                Err(ExecutionError::DispatchDisconnected.into())
            }
        }
    }
}

/// Dispatcher that records every intent, for assertions in tests and for
/// speculative previews that want to inspect the would-be mutations.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    intents: Mutex<Vec<MutationIntent>>,
}

impl RecordingDispatcher {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every intent dispatched so far.
    #[must_use]
    pub fn intents(&self) -> Vec<MutationIntent> {
        self.intents.lock().map(|i| i.clone()).unwrap_or_default()
    }

    /// Drains and returns the recorded intents.
    #[must_use]
    pub fn take(&self) -> Vec<MutationIntent> {
        self.intents
            .lock()
            .map(|mut i| std::mem::take(&mut *i))
            .unwrap_or_default()
    }
}

impl CommandDispatcher for RecordingDispatcher {
    fn dispatch(&self, intent: MutationIntent) -> GridResult<()> {
        if let Ok(mut intents) = self.intents.lock() {
            intents.push(intent);
        }
        Ok(())
    }
}
