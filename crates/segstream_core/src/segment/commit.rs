//! Linearizing the tree onto a destination medium.
//!
//! The destination may be the very medium the extents point into, so bytes
//! have to be moved in an order that never overwrites a range some node
//! still needs to read:
//!
//! - a node whose extent sits on the destination at or after its target
//!   offset moves towards the start; it is copied first, then the rest of
//!   the chain is committed
//! - a node whose extent moves towards the end, or lives on another
//!   medium, commits the rest of the chain first and is copied afterwards
//! - `second` is written last, once everything after it is in place

use super::{Extent, Segment};
use segstream_medium::{copy_range, same_medium, Medium, MediumResult, SharedMedium};

/// A node whose bytes still have to be written once the rest of the chain
/// is in place.
struct Deferred<'a> {
    node: &'a Segment,
    at: u64,
    first_copied: bool,
}

impl Segment {
    /// Writes the content of this node and the rest of the chain to `dest`
    /// starting at `at`, then turns the node into a flat view of what was
    /// written.
    ///
    /// The chain is walked front to back once, copying the extents that
    /// move towards the start, and then back to front, copying the
    /// remaining extents and every `second`.
    ///
    /// Does not resize `dest`. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns the first medium error hit. The destination is then in an
    /// undefined state.
    pub(crate) fn commit(&mut self, dest: &SharedMedium, at: u64) -> MediumResult<u64> {
        let mut deferred = Vec::with_capacity(self.segment_count());
        let mut offset = at;
        let mut node = Some(&*self);
        while let Some(n) = node {
            let moves_back = same_medium(&n.first.medium, dest) && n.first.start >= offset;
            if moves_back {
                n.copy_first(dest, offset)?;
            }
            deferred.push(Deferred {
                node: n,
                at: offset,
                first_copied: moves_back,
            });
            offset += n.edge();
            node = n.third.as_deref();
        }

        while let Some(Deferred {
            node,
            at: target,
            first_copied,
        }) = deferred.pop()
        {
            if !first_copied {
                node.copy_first(dest, target)?;
            }
            if !node.second.is_empty() {
                dest.borrow_mut()
                    .write_at(target + node.first.len(), &node.second)?;
            }
        }

        let total = offset - at;
        self.first = Extent::new(dest.clone(), at, at + total);
        self.second = Vec::new();
        self.third = None;
        Ok(total)
    }

    fn copy_first(&self, dest: &SharedMedium, at: u64) -> MediumResult<()> {
        if self.first.is_empty() {
            return Ok(());
        }
        copy_range(&self.first.medium, self.first.start, dest, at, self.first.len())
    }
}
