//! Property-based test generators using proptest.
//!
//! Edit operations are generated without knowing the stream they will run
//! against. Positions and lengths are drawn as [`Index`] values and only
//! resolved into concrete numbers, via [`EditOp::resolve`], once the
//! current cursor and length are known, so every generated sequence is
//! valid at every step.

use proptest::prelude::*;
use proptest::sample::Index;

/// Largest payload a generated insert or write carries.
pub const MAX_PAYLOAD: usize = 64;

/// An unresolved edit operation.
#[derive(Debug, Clone)]
pub enum EditOp {
    /// Move the cursor somewhere in `[0, len]`.
    Seek(Index),
    /// Open a gap and fill it with the payload.
    Insert(Vec<u8>),
    /// Open a zero-filled gap of `1..=n` bytes.
    Gap(u16),
    /// Remove some of the bytes after the cursor.
    Remove(Index),
    /// Overwrite at the cursor, possibly running past the end.
    Write(Vec<u8>),
    /// Read up to this many bytes.
    Read(u16),
    /// Commit to the origin.
    Commit,
}

/// A resolved edit, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Seek to an absolute offset.
    Seek(u64),
    /// Insert these bytes at the cursor.
    Insert(Vec<u8>),
    /// Insert this many zero bytes at the cursor.
    Gap(u64),
    /// Remove this many bytes at the cursor.
    Remove(u64),
    /// Overwrite with these bytes.
    Write(Vec<u8>),
    /// Read this many bytes.
    Read(usize),
    /// Commit.
    Commit,
}

impl EditOp {
    /// Resolves the operation for a stream whose cursor is at `position`
    /// and whose length is `len`.
    pub fn resolve(&self, position: u64, len: u64) -> Edit {
        match self {
            Self::Seek(index) => Edit::Seek(index.index(len as usize + 1) as u64),
            Self::Insert(data) => Edit::Insert(data.clone()),
            Self::Gap(n) => Edit::Gap(u64::from(*n).max(1)),
            Self::Remove(index) => {
                Edit::Remove(index.index((len - position) as usize + 1) as u64)
            }
            Self::Write(data) => Edit::Write(data.clone()),
            Self::Read(n) => Edit::Read(usize::from(*n)),
            Self::Commit => Edit::Commit,
        }
    }
}

/// Strategy for generating a non-empty payload.
pub fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=MAX_PAYLOAD)
}

/// Strategy for generating a starting content.
pub fn content_strategy(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Strategy for generating one edit operation.
///
/// Commits are rare so that most sequences build up a deep segment tree
/// before it is flattened.
pub fn edit_op_strategy() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        4 => any::<Index>().prop_map(EditOp::Seek),
        3 => payload_strategy().prop_map(EditOp::Insert),
        1 => (1..=256u16).prop_map(EditOp::Gap),
        3 => any::<Index>().prop_map(EditOp::Remove),
        3 => payload_strategy().prop_map(EditOp::Write),
        2 => (0..=MAX_PAYLOAD as u16).prop_map(EditOp::Read),
        1 => Just(EditOp::Commit),
    ]
}

/// Strategy for generating a sequence of edit operations.
pub fn edit_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<EditOp>> {
    prop::collection::vec(edit_op_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
