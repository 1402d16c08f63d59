//! Media that decode their parent through a filter.

use crate::error::MediumResult;
use crate::medium::{Medium, SharedMedium};
use crate::memory::MemoryMedium;
use tracing::debug;

/// A reversible byte transformation (compression, encryption, ...).
pub trait Filter {
    /// Turns stored bytes into the bytes callers see.
    ///
    /// # Errors
    ///
    /// Returns an error if `stored` is not valid input for this filter.
    fn decode(&self, stored: &[u8]) -> MediumResult<Vec<u8>>;

    /// Turns caller bytes back into stored bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be encoded.
    fn encode(&self, plain: &[u8]) -> MediumResult<Vec<u8>>;
}

/// A medium presenting the decoded contents of a parent medium.
///
/// The whole parent is decoded into memory when the medium is opened. All
/// reads and writes then work on that copy; nothing reaches the parent until
/// [`Medium::flush`] encodes the copy, writes it over the parent from offset
/// zero and truncates the parent to the encoded length.
///
/// Wrapping a `FilteredMedium` in a segmented stream lets a caller splice
/// bytes in and out of, say, a compressed blob and write it back once.
pub struct FilteredMedium {
    parent: SharedMedium,
    filter: Box<dyn Filter>,
    plain: MemoryMedium,
    dirty: bool,
}

impl FilteredMedium {
    /// Opens a filtered view by decoding the entire parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent cannot be read or does not decode.
    pub fn open(parent: SharedMedium, filter: Box<dyn Filter>) -> MediumResult<Self> {
        let stored = {
            let mut p = parent.borrow_mut();
            let mut stored = vec![0u8; p.size()? as usize];
            p.read_exact_at(0, &mut stored)?;
            stored
        };
        let plain = filter.decode(&stored)?;
        debug!(stored = stored.len(), plain = plain.len(), "opened filtered medium");

        Ok(Self {
            parent,
            filter,
            plain: MemoryMedium::with_data(plain),
            dirty: false,
        })
    }

    /// Returns the decoded bytes.
    #[must_use]
    pub fn plain(&self) -> &[u8] {
        self.plain.data()
    }

    /// Returns `true` if there are changes not yet written to the parent.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl std::fmt::Debug for FilteredMedium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredMedium")
            .field("plain_len", &self.plain.data().len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Medium for FilteredMedium {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> MediumResult<usize> {
        self.plain.read_at(offset, buf)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> MediumResult<()> {
        self.dirty = true;
        self.plain.write_at(offset, data)
    }

    fn size(&self) -> MediumResult<u64> {
        self.plain.size()
    }

    fn truncate(&mut self, new_size: u64) -> MediumResult<()> {
        self.dirty = true;
        self.plain.truncate(new_size)
    }

    fn flush(&mut self) -> MediumResult<()> {
        if !self.dirty {
            return Ok(());
        }

        let stored = self.filter.encode(self.plain.data())?;
        {
            let mut parent = self.parent.borrow_mut();
            parent.write_at(0, &stored)?;
            parent.truncate(stored.len() as u64)?;
            parent.flush()?;
        }
        debug!(stored = stored.len(), "flushed filtered medium");
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{shared, MediumError};

    /// Stores every byte twice.
    struct Doubling;

    impl Filter for Doubling {
        fn decode(&self, stored: &[u8]) -> MediumResult<Vec<u8>> {
            if stored.len() % 2 != 0 {
                return Err(MediumError::Filter("odd length".to_string()));
            }
            Ok(stored.chunks(2).map(|pair| pair[0]).collect())
        }

        fn encode(&self, plain: &[u8]) -> MediumResult<Vec<u8>> {
            Ok(plain.iter().flat_map(|&b| [b, b]).collect())
        }
    }

    #[test]
    fn open_decodes_parent() {
        let parent = shared(MemoryMedium::with_data(b"aabbcc".to_vec()));
        let mut medium = FilteredMedium::open(parent.clone(), Box::new(Doubling)).unwrap();

        assert_eq!(medium.size().unwrap(), 3);
        let mut buf = [0u8; 3];
        medium.read_exact_at(0, &mut buf).unwrap();
        assert_eq!(&buf, b"abc");
    }

    #[test]
    fn open_rejects_undecodable_parent() {
        let parent = shared(MemoryMedium::with_data(b"aab".to_vec()));
        let result = FilteredMedium::open(parent, Box::new(Doubling));
        assert!(matches!(result, Err(MediumError::Filter(_))));
    }

    #[test]
    fn writes_stay_in_memory_until_flush() {
        let parent = shared(MemoryMedium::with_data(b"aabbcc".to_vec()));
        let mut medium = FilteredMedium::open(parent.clone(), Box::new(Doubling)).unwrap();

        medium.write_at(1, b"XY").unwrap();
        assert!(medium.is_dirty());
        assert_eq!(medium.plain(), b"aXY");
        assert_eq!(parent.borrow().data(), b"aabbcc");

        medium.flush().unwrap();
        assert!(!medium.is_dirty());
        assert_eq!(parent.borrow().data(), b"aaXXYY");
    }

    #[test]
    fn flush_shrinks_parent() {
        let parent = shared(MemoryMedium::with_data(b"aabbccdd".to_vec()));
        let mut medium = FilteredMedium::open(parent.clone(), Box::new(Doubling)).unwrap();

        medium.truncate(1).unwrap();
        medium.flush().unwrap();
        assert_eq!(parent.borrow().data(), b"aa");
    }

    #[test]
    fn clean_flush_does_not_touch_parent() {
        let parent = shared(MemoryMedium::with_data(b"aabb".to_vec()));
        let mut medium = FilteredMedium::open(parent.clone(), Box::new(Doubling)).unwrap();

        parent.borrow_mut().write_at(0, b"zz").unwrap();
        medium.flush().unwrap();
        assert_eq!(parent.borrow().data(), b"zzbb");
    }
}
