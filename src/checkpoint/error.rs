//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring a session
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The session could not be written as JSON
    #[error("Failed to serialize session: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The checkpoint is not valid JSON for this format
    #[error("Failed to parse session checkpoint: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A navigation stack always holds at least one entry
    #[error("Checkpoint holds no navigation entries")]
    EmptyStack,

    /// The recorded position does not address an entry
    #[error("Checkpoint index {index} is outside a stack of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}
