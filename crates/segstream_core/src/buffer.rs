//! Read-ahead and write-behind buffers for the stream facade.
//!
//! Both buffers remember absolute stream offsets. Any structural edit
//! shifts the meaning of those offsets, so the facade drains the write
//! buffer and drops the read cache before every insert, remove or commit.

/// Contiguous run of writes not yet applied to the segment tree.
#[derive(Debug, Default)]
pub(crate) struct WriteBehind {
    at: u64,
    data: Vec<u8>,
}

impl WriteBehind {
    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Offset one past the last buffered byte.
    pub(crate) fn end(&self) -> u64 {
        self.at + self.data.len() as u64
    }

    /// Buffers `data` for offset `at` if it continues the current run and
    /// the run stays within `capacity`. Returns `false` if the caller must
    /// apply the write itself.
    pub(crate) fn try_append(&mut self, at: u64, data: &[u8], capacity: usize) -> bool {
        if self.data.len() + data.len() > capacity {
            return false;
        }
        if self.data.is_empty() {
            self.at = at;
        } else if at != self.end() {
            return false;
        }
        self.data.extend_from_slice(data);
        true
    }

    /// Removes and returns the buffered run.
    pub(crate) fn take(&mut self) -> Option<(u64, Vec<u8>)> {
        if self.data.is_empty() {
            return None;
        }
        Some((self.at, std::mem::take(&mut self.data)))
    }
}

/// Bytes read ahead of the caller.
#[derive(Debug, Default)]
pub(crate) struct ReadAhead {
    at: u64,
    data: Vec<u8>,
}

impl ReadAhead {
    /// Copies cached bytes starting at `at` into `buf`; returns how many.
    pub(crate) fn copy_out(&self, at: u64, buf: &mut [u8]) -> usize {
        if at < self.at || at >= self.at + self.data.len() as u64 {
            return 0;
        }
        let from = (at - self.at) as usize;
        let n = (self.data.len() - from).min(buf.len());
        buf[..n].copy_from_slice(&self.data[from..from + n]);
        n
    }

    pub(crate) fn fill(&mut self, at: u64, data: Vec<u8>) {
        self.at = at;
        self.data = data;
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }
}
