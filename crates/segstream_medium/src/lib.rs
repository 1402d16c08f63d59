//! # segstream medium
//!
//! Byte media for segmented streams.
//!
//! A medium is an **opaque, random-access byte store**. A segmented stream
//! reads through it lazily while edits are pending and writes back through
//! it once, on commit. Media never interpret the bytes they hold.
//!
//! ## Design Principles
//!
//! - Positional access only (`read_at`, `write_at`); cursors live above
//! - Single-threaded: media are shared through `Rc<RefCell<_>>`
//! - Resizing is part of the contract, so a window can grow its parent
//!
//! ## Available Media
//!
//! - [`MemoryMedium`] - growable in-memory buffer
//! - [`FileMedium`] - OS file
//! - [`SubMedium`] - bounded window into a parent medium
//! - [`FilteredMedium`] - decoded view through a [`Filter`], such as
//!   [`AesGcmFilter`]
//!
//! ## Example
//!
//! ```rust
//! use segstream_medium::{move_within, Medium, MemoryMedium};
//!
//! let mut medium = MemoryMedium::with_data(b"ABCDEFGHIJ".to_vec());
//! move_within(&mut medium, 2, 4, 4).unwrap();
//! assert_eq!(medium.data(), b"ABCDCDEFIJ");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod encrypted;
mod error;
mod file;
mod filtered;
mod medium;
mod memory;
mod transfer;
mod window;

pub use encrypted::{AesGcmFilter, EncryptionKey, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use error::{MediumError, MediumResult};
pub use file::FileMedium;
pub use filtered::{Filter, FilteredMedium};
pub use medium::{same_medium, shared, Medium, SharedMedium};
pub use memory::MemoryMedium;
pub use transfer::{copy_range, move_within, TRANSFER_CHUNK};
pub use window::{ResizeFn, SubMedium};
