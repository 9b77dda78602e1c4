//! Error types for the subnet partitioner.

use thiserror::Error;

/// Error returned by [`crate::processing::partition`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// The text is not a usable IPv6 block, the message is shown to the user as is.
    #[error("{0}")]
    InvalidRange(String),
}

impl SplitError {
    pub fn invalid_range(message: impl Into<String>) -> Self {
        SplitError::InvalidRange(message.into())
    }
}
