//! # segstream core
//!
//! Editable segmented streams.
//!
//! A [`SegmentedStream`] wraps a medium and lets callers insert, remove and
//! overwrite bytes anywhere in it. Edits are kept in an in-memory segment
//! tree; the medium itself is only written when the stream is committed,
//! in a single pass that moves every untouched byte at most once.
//!
//! This is what file-format encoders need when a record in the middle of a
//! file grows or shrinks: edit the record in place, commit once, and let
//! the stream shift everything after it.
//!
//! ## Nesting
//!
//! A stream is itself a medium. [`nested_window`] opens a bounded window
//! onto a stream, and a second stream over that window can edit one record
//! of an uncommitted container; committing the inner stream resizes its
//! window by inserting into or removing from the outer stream.
//!
//! ## Example
//!
//! ```rust
//! use segstream_core::SegmentedStream;
//! use segstream_medium::{shared, MemoryMedium};
//! use std::io::SeekFrom;
//!
//! let medium = shared(MemoryMedium::with_data(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ".to_vec()));
//! let mut stream = SegmentedStream::new(medium.clone()).unwrap();
//!
//! stream.seek(SeekFrom::Start(5)).unwrap();
//! stream.insert(10).unwrap();
//! stream.write(b"0123456789").unwrap();
//! stream.commit().unwrap();
//!
//! assert_eq!(medium.borrow().data(), b"ABCDE0123456789FGHIJKLMNOPQRSTUVWXYZ");
//! assert_eq!(stream.position(), 15);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;
mod segment;
mod stream;
mod window;

pub use config::{StreamConfig, DEFAULT_BUFFER_SIZE};
pub use error::{SegError, SegResult};
pub use stream::SegmentedStream;
pub use window::{nested_window, SharedStream};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
