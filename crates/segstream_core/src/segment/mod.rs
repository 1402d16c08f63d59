//! The segment tree.
//!
//! A segment is one node of a singly linked chain. Each node describes a
//! piece of the logical stream as three consecutive regions:
//!
//! ```text
//! | first: [start, end) of some medium | second: owned bytes | third: next node ... |
//! ```
//!
//! - `first` is a lazy reference; it is only read on demand or at commit
//! - `second` holds bytes that exist nowhere else yet
//! - `third` holds everything logically after `second`
//!
//! Structural edits only ever cut and re-link nodes, so an edit costs time
//! proportional to the chain depth, never to the amount of data behind it.
//!
//! ## Invariants
//!
//! - The content of a node is `bytes(first) ++ second ++ content(third)`
//! - Extents that live on the same medium appear in ascending medium order
//!   along the chain; commit relies on this to rewrite a medium in place
//! - Offsets passed to node operations are relative to the node and never
//!   exceed its length

mod commit;
mod edit;

use segstream_medium::{same_medium, Medium, MediumResult, SharedMedium};
use std::mem;

/// A byte range `[start, end)` of a medium.
#[derive(Clone)]
pub(crate) struct Extent {
    pub(crate) medium: SharedMedium,
    pub(crate) start: u64,
    pub(crate) end: u64,
}

impl Extent {
    pub(crate) fn new(medium: SharedMedium, start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self { medium, start, end }
    }

    pub(crate) fn len(&self) -> u64 {
        self.end - self.start
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shortens this extent to `at` bytes and returns the cut-off tail.
    fn split_off(&mut self, at: u64) -> Extent {
        let cut = self.start + at;
        let tail = Extent::new(self.medium.clone(), cut, self.end);
        self.end = cut;
        tail
    }

    /// An empty extent positioned at the end of this one.
    fn empty_after(&self) -> Extent {
        Extent::new(self.medium.clone(), self.end, self.end)
    }
}

impl std::fmt::Debug for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Extent({}..{})", self.start, self.end)
    }
}

/// One node of the segment tree.
pub(crate) struct Segment {
    first: Extent,
    second: Vec<u8>,
    third: Option<Box<Segment>>,
}

impl Segment {
    /// Creates a flat node covering all of `medium`.
    pub(crate) fn wrap(medium: SharedMedium) -> MediumResult<Self> {
        let size = medium.borrow().size()?;
        Ok(Self::flat(medium, 0, size))
    }

    /// Creates a node covering `[start, end)` of `medium` with no edits.
    pub(crate) fn flat(medium: SharedMedium, start: u64, end: u64) -> Self {
        Self {
            first: Extent::new(medium, start, end),
            second: Vec::new(),
            third: None,
        }
    }

    fn with_parts(first: Extent, second: Vec<u8>, third: Option<Box<Segment>>) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    /// Logical length of this node and everything after it.
    pub(crate) fn len(&self) -> u64 {
        let mut total = 0;
        let mut node = Some(self);
        while let Some(n) = node {
            total += n.edge();
            node = n.third.as_deref();
        }
        total
    }

    /// Length of `first` plus `second`, where `third` begins.
    pub(crate) fn edge(&self) -> u64 {
        self.first.len() + self.second.len() as u64
    }

    /// Number of nodes in the chain.
    pub(crate) fn segment_count(&self) -> usize {
        let mut count = 0;
        let mut node = Some(self);
        while let Some(n) = node {
            count += 1;
            node = n.third.as_deref();
        }
        count
    }

    /// Returns `true` if the node is an unedited view of all of `medium`
    /// as it currently stands.
    pub(crate) fn is_pristine(&self, medium: &SharedMedium) -> bool {
        self.second.is_empty()
            && self.third.is_none()
            && self.first.start == 0
            && same_medium(&self.first.medium, medium)
            && medium
                .try_borrow()
                .ok()
                .and_then(|m| m.size().ok())
                .is_some_and(|size| size == self.first.end)
    }

    /// Copies bytes starting at logical offset `at` into `buf`.
    ///
    /// Returns the number of bytes produced, which is short only at the end
    /// of the chain.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced medium fails, or no longer holds
    /// the bytes an extent points at.
    pub(crate) fn read_at(&self, mut at: u64, buf: &mut [u8]) -> MediumResult<usize> {
        let mut done = 0;
        let mut node = self;
        while done < buf.len() {
            let first = node.first.len();
            if at < first {
                let n = (first - at).min((buf.len() - done) as u64) as usize;
                node.first
                    .medium
                    .borrow_mut()
                    .read_exact_at(node.first.start + at, &mut buf[done..done + n])?;
                done += n;
                at += n as u64;
                continue;
            }

            let rel = (at - first) as usize;
            if rel < node.second.len() {
                let n = (node.second.len() - rel).min(buf.len() - done);
                buf[done..done + n].copy_from_slice(&node.second[rel..rel + n]);
                done += n;
                at += n as u64;
                continue;
            }

            match node.third.as_deref() {
                Some(next) => {
                    at -= node.edge();
                    node = next;
                }
                None => break,
            }
        }
        Ok(done)
    }

    /// Walks down the chain to the node whose own content reaches `at`.
    ///
    /// Returns that node and `at` relative to it. The offset is then at most
    /// the node's [`edge`](Self::edge), unless the chain ends first.
    fn locate_mut(&mut self, mut at: u64) -> (&mut Segment, u64) {
        let mut node = self;
        loop {
            let edge = node.edge();
            if at <= edge {
                break;
            }
            match node.third {
                Some(ref mut next) => {
                    at -= edge;
                    node = &mut **next;
                }
                None => break,
            }
        }
        (node, at)
    }

    /// Restructures the chain so that the content of the node holding `at`
    /// ends exactly there.
    ///
    /// Whatever followed `at` moves into that node's `third`. Cutting at the
    /// end of a node's `second` leaves the chain alone. No medium is touched.
    pub(crate) fn split(&mut self, at: u64) {
        let (node, at) = self.locate_mut(at);
        node.split_here(at);
    }

    /// Cuts this node at `at`, which must not exceed its edge.
    fn split_here(&mut self, at: u64) {
        let first = self.first.len();
        if at < first {
            let tail = self.first.split_off(at);
            let child = Segment::with_parts(tail, mem::take(&mut self.second), self.third.take());
            self.third = Some(Box::new(child));
            return;
        }

        let rel = (at - first) as usize;
        if rel < self.second.len() {
            let tail = self.second.split_off(rel);
            let child = Segment::with_parts(self.first.empty_after(), tail, self.third.take());
            self.third = Some(Box::new(child));
        }
    }

    /// Splices out directly following nodes that hold no bytes.
    fn prune_third(&mut self) {
        while self
            .third
            .as_ref()
            .is_some_and(|t| t.first.is_empty() && t.second.is_empty())
        {
            if let Some(mut empty) = self.third.take() {
                self.third = empty.third.take();
            }
        }
    }
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        let mut node = Some(self);
        while let Some(n) = node {
            list.entry(&format_args!("{:?} + {} bytes", n.first, n.second.len()));
            node = n.third.as_deref();
        }
        list.finish()
    }
}

impl Drop for Segment {
    // Unlink the chain iteratively so a long edit history cannot overflow
    // the stack on drop.
    fn drop(&mut self) {
        let mut next = self.third.take();
        while let Some(mut node) = next {
            next = node.third.take();
        }
    }
}
