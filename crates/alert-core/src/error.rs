//! Error types shared across the pipeline seams.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by an [`AlertSource`](crate::AlertSource) implementation.
///
/// Source errors are never fatal to a running pipeline: the poll cycle that
/// hit one ends without side effects and the next cycle retries.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The feed endpoint could not be reached or answered with an error.
    #[error("alert source request failed: {0}")]
    Request(String),

    /// The feed answered, but the payload could not be understood.
    #[error("malformed alert payload: {0}")]
    Malformed(String),

    /// The feed did not answer within the bounded call window.
    #[error("alert source timed out after {0:?}")]
    Timeout(Duration),
}
