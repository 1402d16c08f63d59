//! Bounded window into a parent medium.

use crate::error::{MediumError, MediumResult};
use crate::medium::{Medium, SharedMedium};
use tracing::debug;

/// Callback that resizes the region a window occupies in its parent.
///
/// Arguments are the window start, its current length and the requested
/// length, all in parent coordinates. When it returns `Ok`, the parent must
/// hold `new_len` bytes for the window at `start`.
pub type ResizeFn = Box<dyn FnMut(u64, u64, u64) -> MediumResult<()>>;

/// A medium restricted to `[start, start + len)` of a parent medium.
///
/// Offsets are relative to the window. Reads stop at the window end.
/// Resizing is delegated to a [`ResizeFn`] so the parent decides what
/// growing the window means: a segmented parent inserts bytes after the
/// window instead of resizing a file, which lets an edit inside a nested
/// record enlarge the still-uncommitted container around it.
///
/// # Example
///
/// ```rust
/// use segstream_medium::{shared, Medium, MemoryMedium, SharedMedium, SubMedium};
///
/// let parent = shared(MemoryMedium::with_data(b"headerBODYtrailer".to_vec()));
/// let handle: SharedMedium = parent.clone();
/// let mut body = SubMedium::new(handle, 6, 4);
///
/// let mut buf = [0u8; 8];
/// assert_eq!(body.read_at(0, &mut buf).unwrap(), 4);
/// assert_eq!(&buf[..4], b"BODY");
///
/// body.write_at(0, b"body").unwrap();
/// assert_eq!(parent.borrow().data(), b"headerbodytrailer");
/// ```
pub struct SubMedium {
    parent: SharedMedium,
    start: u64,
    len: u64,
    resize: Option<ResizeFn>,
}

impl SubMedium {
    /// Creates a fixed-size window. Resizing it fails.
    #[must_use]
    pub fn new(parent: SharedMedium, start: u64, len: u64) -> Self {
        Self {
            parent,
            start,
            len,
            resize: None,
        }
    }

    /// Creates a window whose size changes are carried out by `resize`.
    #[must_use]
    pub fn with_resize(parent: SharedMedium, start: u64, len: u64, resize: ResizeFn) -> Self {
        Self {
            parent,
            start,
            len,
            resize: Some(resize),
        }
    }

    /// Returns the window start in parent coordinates.
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the window length.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the window covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the parent medium.
    #[must_use]
    pub fn parent(&self) -> &SharedMedium {
        &self.parent
    }

    /// Shifts the window start by `delta` bytes.
    ///
    /// Used when a sibling region earlier in the parent grew or shrank.
    ///
    /// # Errors
    ///
    /// Returns [`MediumError::Truncation`] if the start would move before
    /// the beginning of the parent.
    pub fn relocate(&mut self, delta: i64) -> MediumResult<()> {
        self.start = self.start.checked_add_signed(delta).ok_or_else(|| {
            MediumError::truncation(
                self.len,
                format!("cannot move window at {} by {delta}", self.start),
            )
        })?;
        Ok(())
    }

    fn resize_to(&mut self, new_len: u64) -> MediumResult<()> {
        if new_len == self.len {
            return Ok(());
        }
        let resize = self
            .resize
            .as_mut()
            .ok_or_else(|| MediumError::truncation(new_len, "window has a fixed size"))?;

        debug!(start = self.start, old = self.len, new = new_len, "resizing window");
        resize(self.start, self.len, new_len)?;
        self.len = new_len;
        Ok(())
    }
}

impl std::fmt::Debug for SubMedium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubMedium")
            .field("start", &self.start)
            .field("len", &self.len)
            .field("resizable", &self.resize.is_some())
            .finish()
    }
}

impl Medium for SubMedium {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> MediumResult<usize> {
        if offset >= self.len {
            return Ok(0);
        }
        let n = buf.len().min((self.len - offset) as usize);
        self.parent
            .borrow_mut()
            .read_at(self.start + offset, &mut buf[..n])
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> MediumResult<()> {
        let end = offset + data.len() as u64;
        if end > self.len {
            self.resize_to(end)?;
        }
        self.parent.borrow_mut().write_at(self.start + offset, data)
    }

    fn size(&self) -> MediumResult<u64> {
        Ok(self.len)
    }

    fn truncate(&mut self, new_size: u64) -> MediumResult<()> {
        self.resize_to(new_size)
    }

    fn flush(&mut self) -> MediumResult<()> {
        self.parent.borrow_mut().flush()
    }
}
