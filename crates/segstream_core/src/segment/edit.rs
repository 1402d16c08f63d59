//! Structural edits: insert, remove and overwrite.
//!
//! Callers guarantee that every offset lies within `[0, len]` and that a
//! removal does not run past the end; the facade checks both before
//! dispatching here.

use super::Segment;

impl Segment {
    /// Opens a gap of `n` zero bytes at `at`.
    pub(crate) fn insert(&mut self, at: u64, n: usize) {
        let (node, at) = self.locate_mut(at);
        node.split_here(at);
        let filled = node.second.len() + n;
        node.second.resize(filled, 0);
    }

    /// Deletes `n` bytes starting at `at`.
    pub(crate) fn remove(&mut self, mut at: u64, mut n: u64) {
        if n == 0 {
            return;
        }

        let mut node = &mut *self;
        let mut visited = 0usize;
        loop {
            n = node.remove_here(at, n);
            if n == 0 {
                break;
            }
            let edge = node.edge();
            match node.third {
                Some(ref mut next) => {
                    at -= edge;
                    node = &mut **next;
                    visited += 1;
                }
                None => break,
            }
        }

        // Splice out the nodes the removal emptied.
        let mut node = self;
        for _ in 0..=visited {
            node.prune_third();
            match node.third {
                Some(ref mut next) => node = &mut **next,
                None => break,
            }
        }
    }

    /// Removes whatever part of `[at, at + n)` lies in this node's `first`
    /// and `second`. Returns how many bytes are left for `third`.
    fn remove_here(&mut self, at: u64, mut n: u64) -> u64 {
        let first = self.first.len();
        if at < first {
            if at + n < first {
                // Strictly inside the extent: skip over the removed bytes.
                if at == 0 {
                    self.first.start += n;
                } else {
                    self.split_here(at);
                    if let Some(child) = self.third.as_mut() {
                        child.first.start += n;
                    }
                }
                return 0;
            }

            n -= first - at;
            self.first.end = self.first.start + at;
            if n == 0 {
                return 0;
            }
        }

        let first = self.first.len();
        let rel = (at - first) as usize;
        if rel < self.second.len() {
            let take = (self.second.len() - rel).min(usize::try_from(n).unwrap_or(usize::MAX));
            self.second.drain(rel..rel + take);
            n -= take as u64;
        }
        n
    }

    /// Overwrites bytes from `at` with `data`, growing the chain if the
    /// write runs past its end.
    pub(crate) fn write(&mut self, at: u64, data: &[u8]) {
        let (node, at) = self.locate_mut(at);
        if at < node.first.len() {
            node.split_here(at);
        }

        let rel = (at - node.first.len()) as usize;
        debug_assert!(rel <= node.second.len());
        let overlap = (node.second.len() - rel).min(data.len());
        node.second[rel..rel + overlap].copy_from_slice(&data[..overlap]);

        let rest = &data[overlap..];
        if rest.is_empty() {
            return;
        }
        node.second.extend_from_slice(rest);
        if let Some(third) = node.third.as_mut() {
            let replaced = (rest.len() as u64).min(third.len());
            third.remove(0, replaced);
        }
        node.prune_third();
    }
}
