//! Media fixtures.
//!
//! Provides ready-made media for tests that need a known starting
//! content, in memory or on disk.

use segstream_core::{SegmentedStream, StreamConfig};
use segstream_medium::{shared, FileMedium, MemoryMedium};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// The 26 upper-case ASCII letters.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Deterministic bytes `0, 1, ..., 250, 0, 1, ...` of the given length.
///
/// The period is prime, so shifted copies never line up by accident.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// A shared in-memory medium holding `data`.
pub fn memory_medium(data: &[u8]) -> Rc<RefCell<MemoryMedium>> {
    shared(MemoryMedium::with_data(data.to_vec()))
}

/// A shared in-memory medium holding [`ALPHABET`].
pub fn alphabet_medium() -> Rc<RefCell<MemoryMedium>> {
    memory_medium(ALPHABET)
}

/// A stream over a fresh [`alphabet_medium`], with the medium handle kept
/// for inspecting what a commit wrote.
pub fn alphabet_stream() -> (Rc<RefCell<MemoryMedium>>, SegmentedStream) {
    stream_over(ALPHABET, StreamConfig::default())
}

/// A stream with `config` over a fresh in-memory medium holding `data`.
pub fn stream_over(
    data: &[u8],
    config: StreamConfig,
) -> (Rc<RefCell<MemoryMedium>>, SegmentedStream) {
    let medium = memory_medium(data);
    let stream = SegmentedStream::with_config(medium.clone(), config)
        .expect("Failed to open stream over memory medium");
    (medium, stream)
}

/// A file medium in a temporary directory, removed on drop.
pub struct TempFile {
    /// The open medium.
    pub medium: Rc<RefCell<FileMedium>>,
    path: PathBuf,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TempFile {
    /// Creates a file holding `data` and opens it as a medium.
    pub fn with_data(data: &[u8]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("medium.bin");
        std::fs::write(&path, data).expect("Failed to write fixture file");
        let medium = FileMedium::open(&path).expect("Failed to open file medium");

        Self {
            medium: shared(medium),
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Creates an empty file medium.
    pub fn empty() -> Self {
        Self::with_data(&[])
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file back from disk, bypassing the medium.
    pub fn contents(&self) -> Vec<u8> {
        std::fs::read(&self.path).expect("Failed to read fixture file")
    }

    /// Opens a stream over the file.
    pub fn stream(&self, config: StreamConfig) -> SegmentedStream {
        SegmentedStream::with_config(self.medium.clone(), config)
            .expect("Failed to open stream over file medium")
    }
}
