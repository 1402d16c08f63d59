//! CLI error type.

use segstream_core::SegError;
use segstream_medium::MediumError;
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither or both of `--text` and `--hex` were given.
    #[error("exactly one of --text or --hex is required")]
    MissingPayload,

    /// A hex payload could not be decoded.
    #[error("invalid hex payload: {0}")]
    InvalidHex(String),

    /// A script step is malformed.
    #[error("step {index}: {message}")]
    InvalidStep {
        /// Zero-based position of the step in the script.
        index: usize,
        /// What is wrong with it.
        message: String,
    },

    /// An edit was rejected by the stream.
    #[error(transparent)]
    Stream(#[from] SegError),

    /// The file could not be opened or read.
    #[error(transparent)]
    Medium(#[from] MediumError),

    /// The script could not be read.
    #[error("cannot read script: {0}")]
    Io(#[from] std::io::Error),

    /// The script is not valid JSON.
    #[error("cannot parse script: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
