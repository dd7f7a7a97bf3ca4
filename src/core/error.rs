//! Errors surfaced by funnel operations.

use crate::navigation::HostError;
use thiserror::Error;

/// Errors that can occur while issuing a funnel navigation.
///
/// Reconstructing a funnel from a navigation entry never fails; missing or
/// corrupted state falls back to the initial state instead.
#[derive(Debug, Error)]
pub enum FunnelError {
    /// A context or history could not be encoded into the entry payload
    #[error("Failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The navigation host rejected the request
    #[error("Navigation host error: {0}")]
    Host(#[from] HostError),
}
