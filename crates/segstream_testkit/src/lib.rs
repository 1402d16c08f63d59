//! # segstream testkit
//!
//! Test utilities for segstream.
//!
//! This crate provides:
//! - Media fixtures (alphabet buffers, temp files)
//! - Property-based edit generators using proptest
//! - A reference model to check segmented streams against
//!
//! ## Usage
//!
//! ```rust
//! use segstream_testkit::prelude::*;
//!
//! let (medium, mut stream) = alphabet_stream();
//! let mut model = ModelStream::new(ALPHABET.to_vec());
//!
//! let edit = Edit::Insert(b"0123".to_vec());
//! apply_to_stream(&mut stream, &edit).unwrap();
//! model.apply(&edit);
//! stream.commit().unwrap();
//!
//! assert_eq!(medium.borrow().data(), model.data());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
