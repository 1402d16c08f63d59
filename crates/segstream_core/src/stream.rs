//! The cursor facade over a segment tree.

use crate::buffer::{ReadAhead, WriteBehind};
use crate::config::StreamConfig;
use crate::error::{SegError, SegResult};
use crate::segment::Segment;
use segstream_medium::{Medium, MediumError, MediumResult, SharedMedium};
use std::io::{self, SeekFrom};
use tracing::{debug, trace};

/// An editable view over a medium.
///
/// `SegmentedStream` keeps a cursor and applies reads, overwrites,
/// insertions and removals to an in-memory segment tree. The wrapped
/// medium (the *origin*) is not modified until [`commit`](Self::commit)
/// writes the edited content back in one pass.
///
/// # Example
///
/// ```rust
/// use segstream_core::SegmentedStream;
/// use segstream_medium::{shared, MemoryMedium};
/// use std::io::SeekFrom;
///
/// let medium = shared(MemoryMedium::with_data(b"ABCDEFGHIJ".to_vec()));
/// let mut stream = SegmentedStream::new(medium.clone()).unwrap();
///
/// stream.seek(SeekFrom::Start(2)).unwrap();
/// stream.remove(3).unwrap();
/// stream.insert(2).unwrap();
/// stream.write(b"--").unwrap();
/// assert_eq!(medium.borrow().data(), b"ABCDEFGHIJ");
///
/// stream.commit().unwrap();
/// assert_eq!(medium.borrow().data(), b"AB--FGHIJ");
/// assert_eq!(stream.position(), 4);
/// ```
///
/// # Sharing
///
/// Extents are read lazily, so nothing else may modify the origin while the
/// stream has uncommitted edits.
pub struct SegmentedStream {
    origin: SharedMedium,
    root: Segment,
    position: u64,
    config: StreamConfig,
    pending: WriteBehind,
    cache: ReadAhead,
}

impl SegmentedStream {
    /// Wraps `medium` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the size of the medium cannot be determined.
    pub fn new(medium: SharedMedium) -> SegResult<Self> {
        Self::with_config(medium, StreamConfig::default())
    }

    /// Wraps `medium` with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the size of the medium cannot be determined.
    pub fn with_config(medium: SharedMedium, config: StreamConfig) -> SegResult<Self> {
        let root = Segment::wrap(medium.clone())?;
        Ok(Self {
            origin: medium,
            root,
            position: 0,
            config,
            pending: WriteBehind::default(),
            cache: ReadAhead::default(),
        })
    }

    /// Returns the stream configuration.
    #[must_use]
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Returns the medium that [`commit`](Self::commit) writes to.
    #[must_use]
    pub fn origin(&self) -> &SharedMedium {
        &self.origin
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the logical length, including uncommitted edits.
    #[must_use]
    pub fn len(&self) -> u64 {
        let tree = self.root.len();
        if self.pending.is_empty() {
            tree
        } else {
            tree.max(self.pending.end())
        }
    }

    /// Returns `true` if the logical content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of segments in the tree.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.root.segment_count()
    }

    /// Returns `true` if the stream holds edits the origin does not have.
    #[must_use]
    pub fn has_uncommitted_changes(&self) -> bool {
        !self.pending.is_empty() || !self.root.is_pristine(&self.origin)
    }

    /// Moves the cursor.
    ///
    /// Returns the new position.
    ///
    /// # Errors
    ///
    /// Returns [`SegError::Seek`] if the target lies before the start or
    /// past the end of the stream. The cursor is left where it was.
    pub fn seek(&mut self, pos: SeekFrom) -> SegResult<u64> {
        let len = self.len();
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::Current(delta) => i128::from(self.position) + i128::from(delta),
            SeekFrom::End(delta) => i128::from(len) + i128::from(delta),
        };
        if target < 0 {
            return Err(SegError::seek_before_start(target));
        }
        if target > i128::from(len) {
            return Err(SegError::seek_past_end(target, len));
        }
        self.position = target as u64;
        Ok(self.position)
    }

    /// Reads up to `buf.len()` bytes at the cursor and advances past them.
    ///
    /// Returns fewer bytes only at the end of the stream.
    ///
    /// # Errors
    ///
    /// In strict mode a short read fails with [`SegError::EndOfStream`]; the
    /// cursor still advances by the bytes produced. Medium failures are
    /// returned as [`SegError::Medium`].
    pub fn read(&mut self, buf: &mut [u8]) -> SegResult<usize> {
        let n = self.read_forward(buf)?;
        if self.config.strict && n < buf.len() {
            return Err(SegError::EndOfStream {
                requested: buf.len(),
                read: n,
            });
        }
        Ok(n)
    }

    /// Reads exactly `buf.len()` bytes, regardless of strict mode.
    ///
    /// # Errors
    ///
    /// Returns [`SegError::EndOfStream`] if the stream ends first.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> SegResult<()> {
        let n = self.read_forward(buf)?;
        if n < buf.len() {
            return Err(SegError::EndOfStream {
                requested: buf.len(),
                read: n,
            });
        }
        Ok(())
    }

    /// Reads up to `len` bytes into a new vector.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn read_vec(&mut self, len: usize) -> SegResult<Vec<u8>> {
        let mut buf = vec![0u8; len];
        let n = self.read(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }

    /// Overwrites bytes at the cursor and advances past them.
    ///
    /// Writing past the end extends the stream.
    ///
    /// # Errors
    ///
    /// Returns [`SegError::InvalidArgument`] if `data` is empty.
    pub fn write(&mut self, data: &[u8]) -> SegResult<()> {
        if data.is_empty() {
            return Err(SegError::invalid_argument("cannot write zero bytes"));
        }

        self.cache.clear();
        let capacity = self.config.buffer_size;
        if !self.pending.try_append(self.position, data, capacity) {
            self.flush_buffers();
            if !self.pending.try_append(self.position, data, capacity) {
                self.root.write(self.position, data);
            }
        }
        self.position += data.len() as u64;
        Ok(())
    }

    /// Opens a gap of `len` zero bytes at the cursor.
    ///
    /// The cursor stays at the start of the gap, ready for a
    /// [`write`](Self::write) to fill it.
    ///
    /// # Errors
    ///
    /// Returns [`SegError::InvalidArgument`] if `len` is zero or does not
    /// fit in memory.
    pub fn insert(&mut self, len: u64) -> SegResult<()> {
        if len == 0 {
            return Err(SegError::invalid_argument("cannot insert zero bytes"));
        }
        let n = usize::try_from(len)
            .map_err(|_| SegError::invalid_argument(format!("cannot insert {len} bytes")))?;

        self.flush_buffers();
        trace!(at = self.position, len, "insert");
        self.root.insert(self.position, n);
        Ok(())
    }

    /// Deletes `len` bytes at the cursor. The cursor does not move.
    ///
    /// # Errors
    ///
    /// Returns [`SegError::InvalidArgument`] if fewer than `len` bytes
    /// follow the cursor; nothing is removed in that case.
    pub fn remove(&mut self, len: u64) -> SegResult<()> {
        if len == 0 {
            return Ok(());
        }

        self.flush_buffers();
        let available = self.root.len() - self.position;
        if len > available {
            return Err(SegError::invalid_argument(format!(
                "cannot remove {len} bytes at {}, only {available} remain",
                self.position
            )));
        }
        trace!(at = self.position, len, "remove");
        self.root.remove(self.position, len);
        Ok(())
    }

    /// Writes the edited content back to the origin and resizes it.
    ///
    /// Afterwards the tree is flat again. The cursor is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the origin cannot be written or resized. The
    /// origin is then in an undefined state and the stream should be
    /// dropped.
    pub fn commit(&mut self) -> SegResult<()> {
        let dest = self.origin.clone();
        let target = dest.clone();
        self.linearize(dest, move |size| target.borrow_mut().truncate(size))
    }

    /// Like [`commit`](Self::commit), but resizes the origin by calling
    /// `truncate` with the final size instead of the origin's own
    /// [`Medium::truncate`].
    ///
    /// `truncate` is called exactly once: before any byte is written if the
    /// origin has to grow, after the last byte otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error from `truncate` or from the origin.
    pub fn commit_with<F>(&mut self, truncate: F) -> SegResult<()>
    where
        F: FnOnce(u64) -> MediumResult<()>,
    {
        let dest = self.origin.clone();
        self.linearize(dest, truncate)
    }

    /// Writes the edited content to `dest`, which becomes the new origin.
    ///
    /// The previous origin is only read.
    ///
    /// # Errors
    ///
    /// Returns an error if `dest` cannot be written or resized, or if the
    /// previous origin cannot be read.
    pub fn commit_into(&mut self, dest: SharedMedium) -> SegResult<()> {
        let target = dest.clone();
        self.linearize(dest, move |size| target.borrow_mut().truncate(size))
    }

    /// Applies buffered writes to the tree and drops the read cache.
    pub fn flush_buffers(&mut self) {
        self.cache.clear();
        if let Some((at, data)) = self.pending.take() {
            trace!(at, len = data.len(), "applying buffered write");
            self.root.write(at, &data);
        }
    }

    /// Grows or shrinks the region `[start, start + old_len)` to `new_len`
    /// bytes by inserting or removing at its end. The cursor is restored
    /// afterwards, clamped to the new length.
    ///
    /// This is how a window over this stream changes size.
    ///
    /// # Errors
    ///
    /// Returns an error if the region lies outside the stream.
    pub fn resize_region(&mut self, start: u64, old_len: u64, new_len: u64) -> SegResult<()> {
        if new_len == old_len {
            return Ok(());
        }

        let saved = self.position;
        let result = if new_len > old_len {
            self.seek(SeekFrom::Start(start + old_len))
                .and_then(|_| self.insert(new_len - old_len))
        } else {
            self.seek(SeekFrom::Start(start + new_len))
                .and_then(|_| self.remove(old_len - new_len))
        };
        self.position = saved.min(self.len());
        result
    }

    fn linearize<F>(&mut self, dest: SharedMedium, truncate: F) -> SegResult<()>
    where
        F: FnOnce(u64) -> MediumResult<()>,
    {
        self.flush_buffers();
        let total = self.root.len();
        let current = dest.borrow().size()?;

        // The destination must be large enough before bytes land in it,
        // and may only shrink once nothing else needs to be read from it.
        let written = if total > current {
            truncate(total)?;
            self.root.commit(&dest, 0)?
        } else {
            let written = self.root.commit(&dest, 0)?;
            truncate(total)?;
            written
        };
        debug_assert_eq!(written, total);

        dest.borrow_mut().flush()?;
        debug!(previous = current, size = total, "committed stream");
        self.origin = dest;
        Ok(())
    }

    /// Reads at the cursor without the strict check and advances.
    fn read_forward(&mut self, buf: &mut [u8]) -> SegResult<usize> {
        self.flush_pending();
        let n = self.read_cached(self.position, buf)?;
        self.position += n as u64;
        Ok(n)
    }

    fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            self.flush_buffers();
        }
    }

    /// Reads at `at` through the read-ahead cache. Small reads refill the
    /// cache with a whole buffer; large ones go straight to the tree.
    fn read_cached(&mut self, at: u64, buf: &mut [u8]) -> SegResult<usize> {
        let capacity = self.config.buffer_size;
        if buf.len() >= capacity {
            return Ok(self.root.read_at(at, buf)?);
        }

        let mut done = self.cache.copy_out(at, buf);
        if done < buf.len() {
            let from = at + done as u64;
            let mut chunk = vec![0u8; capacity];
            let n = self.root.read_at(from, &mut chunk)?;
            chunk.truncate(n);
            self.cache.fill(from, chunk);
            done += self.cache.copy_out(from, &mut buf[done..]);
        }
        Ok(done)
    }
}

impl std::fmt::Debug for SegmentedStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentedStream")
            .field("position", &self.position)
            .field("len", &self.len())
            .field("segments", &self.root.segment_count())
            .field("config", &self.config)
            .finish()
    }
}

/// Positional access to the logical content. The cursor is not moved.
///
/// `truncate` inserts zero bytes at, or removes bytes from, the end of the
/// stream; the cursor is clamped to the new length.
impl Medium for SegmentedStream {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> MediumResult<usize> {
        self.flush_pending();
        Ok(self.read_cached(offset, buf)?)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> MediumResult<()> {
        if data.is_empty() {
            return Ok(());
        }
        self.flush_buffers();
        let len = self.root.len();
        if offset > len {
            self.root.insert(len, gap_len(offset - len)?);
        }
        self.root.write(offset, data);
        Ok(())
    }

    fn size(&self) -> MediumResult<u64> {
        Ok(self.len())
    }

    fn truncate(&mut self, new_size: u64) -> MediumResult<()> {
        self.flush_buffers();
        let len = self.root.len();
        if new_size > len {
            self.root.insert(len, gap_len(new_size - len)?);
        } else if new_size < len {
            self.root.remove(new_size, len - new_size);
        }
        self.position = self.position.min(new_size);
        Ok(())
    }

    fn flush(&mut self) -> MediumResult<()> {
        self.flush_buffers();
        Ok(())
    }
}

fn gap_len(len: u64) -> MediumResult<usize> {
    usize::try_from(len).map_err(|_| MediumError::truncation(len, "gap too large"))
}

/// Short reads are never errors here, whatever the strict setting, so
/// `read_to_end`, `io::copy` and `BufReader` see the end of the stream as
/// `Ok(0)`. Use [`io::Read::read_exact`] or [`SegmentedStream::read`] for
/// exact-length reads.
impl io::Read for SegmentedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_forward(buf)?)
    }
}

impl io::Write for SegmentedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        SegmentedStream::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_buffers();
        Ok(())
    }
}

impl io::Seek for SegmentedStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(SegmentedStream::seek(self, pos)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segstream_medium::{shared, MemoryMedium};
    use std::cell::RefCell;
    use std::rc::Rc;

    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    fn alphabet_stream(config: StreamConfig) -> (Rc<RefCell<MemoryMedium>>, SegmentedStream) {
        let medium = shared(MemoryMedium::with_data(ALPHABET.to_vec()));
        let stream = SegmentedStream::with_config(medium.clone(), config).unwrap();
        (medium, stream)
    }

    fn read_all(stream: &mut SegmentedStream) -> Vec<u8> {
        let mut buf = vec![0u8; stream.len() as usize];
        let mut offset = 0;
        while offset < buf.len() {
            let n = Medium::read_at(&mut *stream, offset as u64, &mut buf[offset..]).unwrap();
            assert!(n > 0);
            offset += n;
        }
        buf
    }

    #[test]
    fn new_stream_is_clean() {
        let (_, stream) = alphabet_stream(StreamConfig::default());
        assert_eq!(stream.len(), 26);
        assert_eq!(stream.position(), 0);
        assert!(!stream.has_uncommitted_changes());
    }

    #[test]
    fn seek_anchors() {
        let (_, mut stream) = alphabet_stream(StreamConfig::default());
        assert_eq!(stream.seek(SeekFrom::Start(10)).unwrap(), 10);
        assert_eq!(stream.seek(SeekFrom::Current(-4)).unwrap(), 6);
        assert_eq!(stream.seek(SeekFrom::End(-1)).unwrap(), 25);
        assert_eq!(stream.seek(SeekFrom::End(0)).unwrap(), 26);
    }

    #[test]
    fn seek_out_of_range_fails() {
        let (_, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(3)).unwrap();

        assert!(matches!(
            stream.seek(SeekFrom::Current(-4)),
            Err(SegError::Seek { .. })
        ));
        assert!(matches!(
            stream.seek(SeekFrom::End(1)),
            Err(SegError::Seek { .. })
        ));
        assert_eq!(stream.position(), 3);
    }

    #[test]
    fn read_advances_and_stops_at_end() {
        let (_, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(20)).unwrap();

        assert_eq!(stream.read_vec(4).unwrap(), b"UVWX");
        assert_eq!(stream.read_vec(10).unwrap(), b"YZ");
        assert_eq!(stream.read_vec(10).unwrap(), b"");
        assert_eq!(stream.position(), 26);
    }

    #[test]
    fn strict_read_fails_short() {
        let (_, mut stream) = alphabet_stream(StreamConfig::new().strict(true));
        stream.seek(SeekFrom::Start(24)).unwrap();

        let mut buf = [0u8; 4];
        let err = stream.read(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            SegError::EndOfStream {
                requested: 4,
                read: 2
            }
        ));
        assert_eq!(stream.position(), 26);
    }

    #[test]
    fn read_exact_is_always_strict() {
        let (_, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(23)).unwrap();

        let mut buf = [0u8; 5];
        assert!(matches!(
            stream.read_exact(&mut buf),
            Err(SegError::EndOfStream { .. })
        ));
    }

    #[test]
    fn zero_length_edits() {
        let (_, mut stream) = alphabet_stream(StreamConfig::default());

        assert!(matches!(
            stream.write(b""),
            Err(SegError::InvalidArgument { .. })
        ));
        assert!(matches!(
            stream.insert(0),
            Err(SegError::InvalidArgument { .. })
        ));
        stream.remove(0).unwrap();
        assert!(!stream.has_uncommitted_changes());
    }

    #[test]
    fn remove_past_end_fails_without_effect() {
        let (_, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(20)).unwrap();

        assert!(matches!(
            stream.remove(7),
            Err(SegError::InvalidArgument { .. })
        ));
        assert_eq!(stream.len(), 26);
        stream.remove(6).unwrap();
        assert_eq!(stream.len(), 20);
    }

    #[test]
    fn edits_leave_origin_untouched() {
        let (medium, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(5)).unwrap();
        stream.insert(3).unwrap();
        stream.write(b"123").unwrap();
        stream.remove(4).unwrap();

        assert!(stream.has_uncommitted_changes());
        assert_eq!(medium.borrow().data(), ALPHABET);
        assert_eq!(read_all(&mut stream), b"ABCDE123JKLMNOPQRSTUVWXYZ");
    }

    #[test]
    fn buffered_writes_are_visible_to_reads() {
        let (_, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::End(0)).unwrap();
        stream.write(b"12").unwrap();
        stream.write(b"34").unwrap();
        assert_eq!(stream.len(), 30);

        stream.seek(SeekFrom::Start(24)).unwrap();
        assert_eq!(stream.read_vec(6).unwrap(), b"YZ1234");
    }

    #[test]
    fn read_cache_is_dropped_on_write() {
        let (_, mut stream) = alphabet_stream(StreamConfig::default());
        assert_eq!(stream.read_vec(2).unwrap(), b"AB");

        stream.write(b"xy").unwrap();
        stream.seek(SeekFrom::Start(0)).unwrap();
        assert_eq!(stream.read_vec(6).unwrap(), b"ABxyEF");
    }

    #[test]
    fn unbuffered_stream_behaves_the_same() {
        let (medium, mut stream) = alphabet_stream(StreamConfig::new().unbuffered());
        stream.seek(SeekFrom::Start(5)).unwrap();
        stream.write(b"123456").unwrap();
        assert_eq!(stream.read_vec(2).unwrap(), b"LM");

        stream.commit().unwrap();
        assert_eq!(medium.borrow().data(), b"ABCDE123456LMNOPQRSTUVWXYZ");
    }

    #[test]
    fn commit_keeps_cursor_and_flattens() {
        let (medium, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(5)).unwrap();
        stream.insert(10).unwrap();
        stream.write(b"0123456789").unwrap();
        assert!(stream.segment_count() > 1);

        stream.commit().unwrap();
        assert_eq!(stream.position(), 15);
        assert_eq!(stream.segment_count(), 1);
        assert!(!stream.has_uncommitted_changes());
        assert_eq!(
            medium.borrow().data(),
            b"ABCDE0123456789FGHIJKLMNOPQRSTUVWXYZ"
        );
    }

    #[test]
    fn commit_twice_is_noop() {
        let (medium, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(3)).unwrap();
        stream.remove(3).unwrap();

        stream.commit().unwrap();
        let first = medium.borrow().data().to_vec();
        stream.commit().unwrap();
        assert_eq!(medium.borrow().data(), first.as_slice());
        assert_eq!(first, b"ABCGHIJKLMNOPQRSTUVWXYZ");
    }

    #[test]
    fn commit_with_calls_truncate_once() {
        let (medium, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(21)).unwrap();
        stream.remove(5).unwrap();

        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = calls.clone();
        let target = medium.clone();
        stream
            .commit_with(move |size| {
                seen.borrow_mut().push(size);
                target.borrow_mut().truncate(size)
            })
            .unwrap();

        assert_eq!(*calls.borrow(), vec![21]);
        assert_eq!(medium.borrow().data(), b"ABCDEFGHIJKLMNOPQRSTU");
    }

    #[test]
    fn commit_with_grows_before_writing() {
        let (medium, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(2)).unwrap();
        stream.insert(2).unwrap();

        let target = medium.clone();
        stream
            .commit_with(move |size| {
                let mut target = target.borrow_mut();
                assert_eq!(target.data(), ALPHABET);
                target.truncate(size)
            })
            .unwrap();
        assert_eq!(medium.borrow().data().len(), 28);
    }

    #[test]
    fn commit_surfaces_truncation_errors() {
        let (_, mut stream) = alphabet_stream(StreamConfig::default());
        stream.insert(1).unwrap();

        let err = stream
            .commit_with(|size| Err(MediumError::truncation(size, "full")))
            .unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn commit_into_switches_origin() {
        let (medium, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(10)).unwrap();
        stream.remove(16).unwrap();

        let copy = shared(MemoryMedium::new());
        stream.commit_into(copy.clone()).unwrap();

        assert_eq!(copy.borrow().data(), b"ABCDEFGHIJ");
        assert_eq!(medium.borrow().data(), ALPHABET);

        stream.write(b"!").unwrap();
        stream.commit().unwrap();
        assert_eq!(copy.borrow().data(), b"ABCDEFGHIJ!");
        assert_eq!(medium.borrow().data(), ALPHABET);
    }

    #[test]
    fn medium_view_does_not_move_cursor() {
        let (_, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(4)).unwrap();

        stream.write_at(30, b"!").unwrap();
        assert_eq!(stream.len(), 31);
        assert_eq!(stream.position(), 4);

        let mut buf = [0u8; 5];
        assert_eq!(stream.read_at(26, &mut buf).unwrap(), 5);
        assert_eq!(&buf, b"\0\0\0\0!");

        stream.seek(SeekFrom::End(0)).unwrap();
        Medium::truncate(&mut stream, 10).unwrap();
        assert_eq!(stream.len(), 10);
        assert_eq!(stream.position(), 10);
    }

    #[test]
    fn resize_region_restores_cursor() {
        let (_, mut stream) = alphabet_stream(StreamConfig::default());
        stream.seek(SeekFrom::Start(2)).unwrap();

        stream.resize_region(10, 5, 8).unwrap();
        assert_eq!(stream.position(), 2);
        assert_eq!(read_all(&mut stream), b"ABCDEFGHIJKLMNO\0\0\0PQRSTUVWXYZ");

        stream.resize_region(10, 8, 2).unwrap();
        assert_eq!(read_all(&mut stream), b"ABCDEFGHIJKLPQRSTUVWXYZ");
    }

    #[test]
    fn io_read_on_strict_stream_reaches_end_cleanly() {
        use std::io::Read;

        let (_, mut stream) = alphabet_stream(StreamConfig::new().strict(true));
        stream.seek(SeekFrom::Start(20)).unwrap();
        let mut tail = Vec::new();
        assert_eq!(Read::read_to_end(&mut stream, &mut tail).unwrap(), 6);
        assert_eq!(tail, b"UVWXYZ");

        stream.seek(SeekFrom::Start(24)).unwrap();
        let mut buf = [0u8; 4];
        let err = Read::read_exact(&mut stream, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        stream.seek(SeekFrom::Start(24)).unwrap();
        assert!(matches!(
            SegmentedStream::read(&mut stream, &mut buf),
            Err(SegError::EndOfStream { requested: 4, read: 2 })
        ));
    }

    #[test]
    fn io_traits() {
        use std::io::{Read, Seek, Write};

        let (medium, mut stream) = alphabet_stream(StreamConfig::default());
        Seek::seek(&mut stream, SeekFrom::Start(24)).unwrap();
        assert_eq!(Write::write(&mut stream, b"").unwrap(), 0);
        stream.write_all(b"yz!").unwrap();
        Write::flush(&mut stream).unwrap();

        Seek::seek(&mut stream, SeekFrom::Start(20)).unwrap();
        let mut tail = Vec::new();
        Read::read_to_end(&mut stream, &mut tail).unwrap();
        assert_eq!(tail, b"UVWXyz!");

        let err = Seek::seek(&mut stream, SeekFrom::Current(-100)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        stream.commit().unwrap();
        assert_eq!(&medium.borrow().data()[20..], b"UVWXyz!");
    }
}
