//! Reference model.
//!
//! [`ModelStream`] implements the editing operations directly on a
//! `Vec<u8>`. It is slow and obviously correct; property tests apply the
//! same [`Edit`]s to it and to a [`SegmentedStream`] and compare.

use crate::generators::{Edit, EditOp};
use segstream_core::{SegResult, SegmentedStream};
use std::io::SeekFrom;

/// A byte vector with a cursor and the same editing semantics as a
/// segmented stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelStream {
    data: Vec<u8>,
    position: usize,
}

impl ModelStream {
    /// Creates a model holding `data` with the cursor at 0.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, position: 0 }
    }

    /// Current content.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Cursor position.
    pub fn position(&self) -> u64 {
        self.position as u64
    }

    /// Content length.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Returns `true` if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resolves `op` against the model's current cursor and length.
    pub fn resolve(&self, op: &EditOp) -> Edit {
        op.resolve(self.position(), self.len())
    }

    /// Applies `edit`, returning the bytes read for [`Edit::Read`].
    ///
    /// # Panics
    ///
    /// Panics if the edit is out of bounds; resolved edits never are.
    pub fn apply(&mut self, edit: &Edit) -> Option<Vec<u8>> {
        match edit {
            Edit::Seek(to) => {
                assert!(*to <= self.len(), "seek past end");
                self.position = *to as usize;
            }
            Edit::Insert(bytes) => {
                let at = self.position;
                self.data.splice(at..at, bytes.iter().copied());
                self.position += bytes.len();
            }
            Edit::Gap(n) => {
                let at = self.position;
                self.data.splice(at..at, std::iter::repeat_n(0, *n as usize));
            }
            Edit::Remove(n) => {
                let at = self.position;
                self.data.drain(at..at + *n as usize);
            }
            Edit::Write(bytes) => {
                let end = self.position + bytes.len();
                if end > self.data.len() {
                    self.data.resize(end, 0);
                }
                self.data[self.position..end].copy_from_slice(bytes);
                self.position = end;
            }
            Edit::Read(n) => {
                let end = (self.position + n).min(self.data.len());
                let out = self.data[self.position..end].to_vec();
                self.position = end;
                return Some(out);
            }
            Edit::Commit => {}
        }
        None
    }
}

/// Applies `edit` to a segmented stream, returning the bytes read for
/// [`Edit::Read`].
///
/// [`Edit::Insert`] is an insert followed by a write of the payload, so the
/// cursor ends up after it, matching [`ModelStream::apply`].
///
/// # Errors
///
/// Returns any error from the stream.
pub fn apply_to_stream(stream: &mut SegmentedStream, edit: &Edit) -> SegResult<Option<Vec<u8>>> {
    match edit {
        Edit::Seek(to) => {
            stream.seek(SeekFrom::Start(*to))?;
        }
        Edit::Insert(bytes) => {
            stream.insert(bytes.len() as u64)?;
            stream.write(bytes)?;
        }
        Edit::Gap(n) => stream.insert(*n)?,
        Edit::Remove(n) => stream.remove(*n)?,
        Edit::Write(bytes) => stream.write(bytes)?,
        Edit::Read(n) => return stream.read_vec(*n).map(Some),
        Edit::Commit => stream.commit()?,
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ALPHABET;

    #[test]
    fn model_insert_then_remove() {
        let mut model = ModelStream::new(ALPHABET.to_vec());
        model.apply(&Edit::Seek(5));
        model.apply(&Edit::Insert(b"0123456789".to_vec()));
        assert_eq!(model.position(), 15);
        assert_eq!(model.data(), b"ABCDE0123456789FGHIJKLMNOPQRSTUVWXYZ");

        model.apply(&Edit::Seek(0));
        model.apply(&Edit::Remove(5));
        assert_eq!(model.data(), b"0123456789FGHIJKLMNOPQRSTUVWXYZ");
    }

    #[test]
    fn model_write_extends_and_read_clamps() {
        let mut model = ModelStream::new(b"abc".to_vec());
        model.apply(&Edit::Seek(2));
        model.apply(&Edit::Write(b"XYZ".to_vec()));
        assert_eq!(model.data(), b"abXYZ");

        model.apply(&Edit::Seek(3));
        assert_eq!(model.apply(&Edit::Read(10)), Some(b"YZ".to_vec()));
        assert_eq!(model.position(), 5);
    }

    #[test]
    fn model_gap_keeps_cursor() {
        let mut model = ModelStream::new(b"ab".to_vec());
        model.apply(&Edit::Seek(1));
        model.apply(&Edit::Gap(3));
        assert_eq!(model.position(), 1);
        assert_eq!(model.data(), b"a\0\0\0b");
    }
}
