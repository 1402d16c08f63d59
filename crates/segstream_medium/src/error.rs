//! Error types for medium operations.

use std::io;
use thiserror::Error;

/// Result type for medium operations.
pub type MediumResult<T> = Result<T, MediumError>;

/// Errors that can occur while accessing a medium.
#[derive(Debug, Error)]
pub enum MediumError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An exact read ran past the end of the medium.
    #[error("read beyond end of medium: offset {offset}, len {len}, size {size}")]
    ReadPastEnd {
        /// The requested read offset.
        offset: u64,
        /// The requested read length.
        len: usize,
        /// The size of the medium at the time of the read.
        size: u64,
    },

    /// The medium refused to take the requested size.
    #[error("cannot resize medium to {requested} bytes: {reason}")]
    Truncation {
        /// The size that was asked for.
        requested: u64,
        /// Why the medium refused.
        reason: String,
    },

    /// A filter failed to transform the data passing through it.
    #[error("filter error: {0}")]
    Filter(String),

    /// Encryption or decryption failed.
    #[error("encryption error: {0}")]
    Encryption(String),
}

impl MediumError {
    /// Creates a truncation error.
    pub fn truncation(requested: u64, reason: impl Into<String>) -> Self {
        Self::Truncation {
            requested,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error reports a refused resize.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::Truncation { .. })
    }
}
