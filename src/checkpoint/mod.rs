//! Session checkpoints for in-memory navigation stacks.
//!
//! A browser keeps its history entries, payloads included, across a page
//! reload. This module gives [`MemoryHistory`] the same ability: a session
//! can be captured, written out as JSON, and restored later with every
//! funnel on it intact.
//!
//! # Example
//!
//! ```rust
//! use funnel::checkpoint::SessionCheckpoint;
//! use funnel::navigation::MemoryHistory;
//!
//! let host = MemoryHistory::with_query("?tab=1").unwrap();
//! let json = host.checkpoint().to_json().unwrap();
//!
//! let restored = MemoryHistory::restore(SessionCheckpoint::from_json(&json).unwrap()).unwrap();
//! assert_eq!(restored.entries(), host.entries());
//! ```

use crate::navigation::{MemoryHistory, NavigationEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a navigation session.
///
/// Captures entries and position only. Listeners and queued navigations
/// belong to the running process and are not saved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub taken_at: DateTime<Utc>,

    /// Every entry of the stack, oldest first
    pub entries: Vec<NavigationEntry>,

    /// Position of the present entry
    pub index: usize,
}

impl SessionCheckpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(CheckpointError::Serialize)
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(CheckpointError::Deserialize)
    }

    /// Check version and shape before the checkpoint is restored.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if self.entries.is_empty() {
            return Err(CheckpointError::EmptyStack);
        }
        if self.index >= self.entries.len() {
            return Err(CheckpointError::IndexOutOfRange {
                index: self.index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

impl MemoryHistory {
    /// Capture the committed state of the stack.
    ///
    /// Navigations still waiting for `settle` are not included.
    pub fn checkpoint(&self) -> SessionCheckpoint {
        SessionCheckpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            entries: self.entries(),
            index: self.index(),
        }
    }

    /// Rebuild a stack from a checkpoint, as a reloaded page would.
    ///
    /// The restored stack commits immediately and has no listeners.
    pub fn restore(checkpoint: SessionCheckpoint) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;
        tracing::debug!(
            checkpoint = %checkpoint.id,
            entries = checkpoint.entries.len(),
            index = checkpoint.index,
            "Restoring navigation session"
        );
        Ok(Self::from_entries(checkpoint.entries, checkpoint.index))
    }
}
