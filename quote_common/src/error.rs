//! Error types shared between the store and the client.
//!
//! The `QuoteError` enum unifies the failure cases of every quote operation:
//! rejected user input, malformed import payloads, remote sync failures, and
//! the I/O and channel errors underneath them.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the store and the client.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// I/O error originating from files or the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// User input was rejected (for example an empty quote text or category).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Payload has the wrong shape (for example an import that is not a JSON array).
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The remote source could not be reached or answered with something unusable.
    #[error("Remote error: {0}")]
    Remote(String),

    /// The key-value store refused a read or write.
    #[error("Store error: {0}")]
    Store(String),

    /// Crossbeam/channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Crossbeam/channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for QuoteError {
    fn from(err: PoisonError<T>) -> Self {
        QuoteError::MutexLock(err.to_string())
    }
}

impl QuoteError {
    /// Returns `true` for errors caused by the remote source, which are retried
    /// implicitly on the next scheduled sync.
    pub fn is_transient(&self) -> bool {
        matches!(self, QuoteError::Remote(_))
    }
}
