//! Insert, remove and write commands.

use crate::error::{CliError, CliResult};
use segstream_core::SegmentedStream;
use segstream_medium::{shared, FileMedium};
use std::io::SeekFrom;
use std::path::Path;
use tracing::info;

/// Bytes given on the command line or in a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// UTF-8 text, used as is.
    Text(String),
    /// Hex digits, optionally separated by whitespace.
    Hex(String),
}

impl Payload {
    /// Picks the payload from a `--text`/`--hex` pair.
    pub fn from_args(text: Option<String>, hex: Option<String>) -> CliResult<Self> {
        match (text, hex) {
            (Some(text), None) => Ok(Self::Text(text)),
            (None, Some(hex)) => Ok(Self::Hex(hex)),
            _ => Err(CliError::MissingPayload),
        }
    }

    /// Returns the raw bytes.
    pub fn into_bytes(self) -> CliResult<Vec<u8>> {
        match self {
            Self::Text(text) => Ok(text.into_bytes()),
            Self::Hex(hex) => hex_decode(&hex),
        }
    }
}

/// One edit, in the coordinates of the stream as edited so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Insert `bytes` at `offset`.
    Insert {
        /// Insertion point.
        offset: u64,
        /// Bytes to insert.
        bytes: Vec<u8>,
    },
    /// Remove `length` bytes at `offset`.
    Remove {
        /// First byte removed.
        offset: u64,
        /// Number of bytes removed.
        length: u64,
    },
    /// Overwrite from `offset` with `bytes`.
    Write {
        /// First byte overwritten.
        offset: u64,
        /// Replacement bytes.
        bytes: Vec<u8>,
    },
}

impl Edit {
    /// Applies the edit to `stream`.
    pub fn apply(&self, stream: &mut SegmentedStream) -> CliResult<()> {
        match self {
            Self::Insert { offset, bytes } => {
                stream.seek(SeekFrom::Start(*offset))?;
                stream.insert(bytes.len() as u64)?;
                stream.write(bytes)?;
            }
            Self::Remove { offset, length } => {
                stream.seek(SeekFrom::Start(*offset))?;
                stream.remove(*length)?;
            }
            Self::Write { offset, bytes } => {
                stream.seek(SeekFrom::Start(*offset))?;
                stream.write(bytes)?;
            }
        }
        Ok(())
    }
}

/// Opens `path` for editing.
pub fn open_stream(path: &Path) -> CliResult<SegmentedStream> {
    let file = shared(FileMedium::open(path)?);
    Ok(SegmentedStream::new(file)?)
}

/// Runs the insert, remove and write commands.
pub fn run(path: &Path, edits: &[Edit]) -> Result<(), Box<dyn std::error::Error>> {
    info!("Editing {:?}", path);

    let mut stream = open_stream(path)?;
    let size_before = stream.len();
    for edit in edits {
        edit.apply(&mut stream)?;
    }
    let size_after = stream.len();
    stream.commit()?;

    println!("{:?}: {} -> {} bytes", path, size_before, size_after);
    Ok(())
}

/// Decodes hex digits, ignoring whitespace.
pub fn hex_decode(text: &str) -> CliResult<Vec<u8>> {
    let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(CliError::InvalidHex("odd number of digits".to_string()));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair)
                .map_err(|_| CliError::InvalidHex("non-ASCII input".to_string()))?;
            u8::from_str_radix(pair, 16).map_err(|_| CliError::InvalidHex(format!("bad digits {pair:?}")))
        })
        .collect()
}
