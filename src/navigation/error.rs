//! Navigation host error types.

use thiserror::Error;

/// Errors a navigation host can report
#[derive(Debug, Error)]
pub enum HostError {
    /// A query string could not be parsed
    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] serde_urlencoded::de::Error),

    /// Query parameters could not be encoded
    #[error("Failed to encode query string: {0}")]
    EncodeQuery(#[from] serde_urlencoded::ser::Error),
}
