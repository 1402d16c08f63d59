//! Medium trait definition.

use crate::error::{MediumError, MediumResult};
use std::cell::RefCell;
use std::rc::Rc;

/// A random-access byte store.
///
/// Media are **opaque byte stores** addressed by absolute offset. They do not
/// interpret the data they hold; a segmented stream layers its edits on top
/// and only writes back through this trait when it is committed.
///
/// # Invariants
///
/// - `read_at` never fails just because the end was reached; it returns a
///   short count instead (zero at or past the end)
/// - `write_at` writes everything it is given, growing the medium if the
///   write runs past the current end
/// - after `truncate(n)` succeeds, `size()` is exactly `n`
///
/// # Implementors
///
/// - [`super::MemoryMedium`] - growable in-memory buffer
/// - [`super::FileMedium`] - OS file
/// - [`super::SubMedium`] - bounded window into another medium
/// - [`super::FilteredMedium`] - decoded view of another medium
pub trait Medium {
    /// Reads up to `buf.len()` bytes starting at `offset`.
    ///
    /// Returns the number of bytes copied into `buf`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> MediumResult<usize>;

    /// Writes all of `data` starting at `offset`.
    ///
    /// If `offset` lies past the current end, the gap is zero filled.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be stored in full.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> MediumResult<()>;

    /// Returns the current size of the medium in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> MediumResult<u64>;

    /// Resizes the medium to exactly `new_size` bytes.
    ///
    /// Growing zero fills the new tail.
    ///
    /// # Errors
    ///
    /// Returns [`MediumError::Truncation`] if the medium refuses the size,
    /// or an I/O error.
    fn truncate(&mut self, new_size: u64) -> MediumResult<()>;

    /// Pushes any buffered data down to the next layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    fn flush(&mut self) -> MediumResult<()>;

    /// Reads exactly `buf.len()` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`MediumError::ReadPastEnd`] if fewer bytes are available.
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> MediumResult<()> {
        let mut done = 0;
        while done < buf.len() {
            let n = self.read_at(offset + done as u64, &mut buf[done..])?;
            if n == 0 {
                return Err(MediumError::ReadPastEnd {
                    offset,
                    len: buf.len(),
                    size: self.size()?,
                });
            }
            done += n;
        }
        Ok(())
    }
}

/// A medium shared between a stream and the segments that reference it.
pub type SharedMedium = Rc<RefCell<dyn Medium>>;

/// Wraps a medium in a shared handle.
///
/// The concrete handle coerces to [`SharedMedium`] while the caller keeps
/// typed access to it.
pub fn shared<M: Medium + 'static>(medium: M) -> Rc<RefCell<M>> {
    Rc::new(RefCell::new(medium))
}

/// Returns `true` if both handles refer to the same medium.
///
/// Only the data address is compared; two handles to one medium may carry
/// different vtable pointers.
#[must_use]
pub fn same_medium(a: &SharedMedium, b: &SharedMedium) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

impl<M: Medium + ?Sized> Medium for Box<M> {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> MediumResult<usize> {
        (**self).read_at(offset, buf)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> MediumResult<()> {
        (**self).write_at(offset, data)
    }

    fn size(&self) -> MediumResult<u64> {
        (**self).size()
    }

    fn truncate(&mut self, new_size: u64) -> MediumResult<()> {
        (**self).truncate(new_size)
    }

    fn flush(&mut self) -> MediumResult<()> {
        (**self).flush()
    }
}
