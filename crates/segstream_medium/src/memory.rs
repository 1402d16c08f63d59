//! In-memory medium.

use crate::error::MediumResult;
use crate::medium::Medium;

/// An in-memory medium backed by a growable buffer.
///
/// This medium is suitable for:
/// - Unit tests
/// - Editing data that is already loaded in memory
/// - Scratch destinations for a commit
///
/// # Example
///
/// ```rust
/// use segstream_medium::{Medium, MemoryMedium};
///
/// let mut medium = MemoryMedium::with_data(b"hello".to_vec());
/// medium.write_at(5, b" world").unwrap();
/// assert_eq!(medium.size().unwrap(), 11);
/// assert_eq!(medium.data(), b"hello world");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryMedium {
    data: Vec<u8>,
}

impl MemoryMedium {
    /// Creates a new empty in-memory medium.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory medium holding `data`.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Returns the current contents.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the medium and returns its contents.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Clears all data from the medium.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl From<Vec<u8>> for MemoryMedium {
    fn from(data: Vec<u8>) -> Self {
        Self::with_data(data)
    }
}

impl From<&[u8]> for MemoryMedium {
    fn from(data: &[u8]) -> Self {
        Self::with_data(data.to_vec())
    }
}

impl Medium for MemoryMedium {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> MediumResult<usize> {
        let size = self.data.len() as u64;
        if offset >= size {
            return Ok(0);
        }

        let start = offset as usize;
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }

    fn write_at(&mut self, offset: u64, new_data: &[u8]) -> MediumResult<()> {
        let start = offset as usize;
        let end = start + new_data.len();
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(new_data);
        Ok(())
    }

    fn size(&self) -> MediumResult<u64> {
        Ok(self.data.len() as u64)
    }

    fn truncate(&mut self, new_size: u64) -> MediumResult<()> {
        self.data.resize(new_size as usize, 0);
        Ok(())
    }

    fn flush(&mut self) -> MediumResult<()> {
        // Nothing is buffered
        Ok(())
    }
}
