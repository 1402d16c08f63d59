//! Error types for segmented streams.

use segstream_medium::MediumError;
use std::io;
use thiserror::Error;

/// Result type for segmented stream operations.
pub type SegResult<T> = Result<T, SegError>;

/// Errors that can occur while editing or committing a segmented stream.
///
/// Nothing is retried internally. A failed commit leaves the destination in
/// an undefined state and the stream should be discarded.
#[derive(Debug, Error)]
pub enum SegError {
    /// The underlying medium failed, or refused a resize during commit.
    #[error("medium error: {0}")]
    Medium(#[from] MediumError),

    /// A seek target is outside `[0, len]`.
    #[error("seek error: {message}")]
    Seek {
        /// Description of the rejected seek.
        message: String,
    },

    /// A strict read reached the end of the stream early.
    #[error("end of stream: requested {requested} bytes, read {read}")]
    EndOfStream {
        /// Number of bytes asked for.
        requested: usize,
        /// Number of bytes actually produced.
        read: usize,
    },

    /// An edit was given a length or offset it cannot honour.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the argument problem.
        message: String,
    },
}

impl SegError {
    /// Creates a seek error for a target before the start of the stream.
    pub fn seek_before_start(target: i128) -> Self {
        Self::Seek {
            message: format!("cannot seek to {target}, before the start of the stream"),
        }
    }

    /// Creates a seek error for a target past the end of the stream.
    pub fn seek_past_end(target: i128, len: u64) -> Self {
        Self::Seek {
            message: format!("cannot seek to {target}, past the end of the stream ({len} bytes)"),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns `true` if a destination refused to be resized.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::Medium(e) if e.is_truncation())
    }
}

impl From<SegError> for io::Error {
    fn from(err: SegError) -> Self {
        match err {
            SegError::Medium(MediumError::Io(e)) => e,
            SegError::EndOfStream { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, err),
            SegError::Seek { .. } | SegError::InvalidArgument { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
            SegError::Medium(_) => io::Error::new(io::ErrorKind::Other, err),
        }
    }
}

impl From<SegError> for MediumError {
    fn from(err: SegError) -> Self {
        match err {
            SegError::Medium(inner) => inner,
            other => MediumError::Io(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_conversion_keeps_kinds() {
        let eof: io::Error = SegError::EndOfStream {
            requested: 4,
            read: 1,
        }
        .into();
        assert_eq!(eof.kind(), io::ErrorKind::UnexpectedEof);

        let seek: io::Error = SegError::seek_before_start(-3).into();
        assert_eq!(seek.kind(), io::ErrorKind::InvalidInput);

        let raw = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let passed: io::Error = SegError::Medium(MediumError::Io(raw)).into();
        assert_eq!(passed.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn medium_conversion_unwraps_medium_errors() {
        let err: MediumError = SegError::Medium(MediumError::truncation(9, "full")).into();
        assert!(err.is_truncation());

        let err: MediumError = SegError::invalid_argument("zero").into();
        assert!(matches!(err, MediumError::Io(_)));
    }

    #[test]
    fn truncation_is_detected() {
        assert!(SegError::Medium(MediumError::truncation(1, "x")).is_truncation());
        assert!(!SegError::invalid_argument("x").is_truncation());
    }

    #[test]
    fn messages_are_descriptive() {
        let err = SegError::seek_past_end(40, 26);
        assert_eq!(
            err.to_string(),
            "seek error: cannot seek to 40, past the end of the stream (26 bytes)"
        );
    }
}
