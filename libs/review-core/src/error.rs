//! Error types for review-core.

use thiserror::Error;

/// Result type alias using StreamError.
pub type Result<T> = std::result::Result<T, StreamError>;

/// Errors from the event stream reader.
///
/// The comparator, sequencer, and schedulers are total functions and
/// have no error type of their own.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("stream read failed: {0}")]
    Read(#[from] std::io::Error),
}
