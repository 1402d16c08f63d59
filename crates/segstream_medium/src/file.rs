//! File-backed medium.

use crate::error::MediumResult;
use crate::medium::Medium;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A medium backed by an OS file.
///
/// # Durability
///
/// - `flush()` calls `File::flush()` to push data to the OS
/// - `sync()` calls `File::sync_all()` to ensure data is on disk
///
/// # Example
///
/// ```no_run
/// use segstream_medium::{FileMedium, Medium};
/// use std::path::Path;
///
/// let mut medium = FileMedium::open(Path::new("data.bin")).unwrap();
/// medium.write_at(0, b"header").unwrap();
/// medium.sync().unwrap();
/// ```
#[derive(Debug)]
pub struct FileMedium {
    path: PathBuf,
    file: File,
    size: u64,
}

impl FileMedium {
    /// Opens or creates a file medium at the given path.
    ///
    /// Existing contents are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn open(path: &Path) -> MediumResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file,
            size,
        })
    }

    /// Opens or creates a file medium, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or file cannot be opened.
    pub fn open_with_create_dirs(path: &Path) -> MediumResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Syncs all data and metadata to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync fails.
    pub fn sync(&mut self) -> MediumResult<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

impl Medium for FileMedium {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> MediumResult<usize> {
        if offset >= self.size || buf.is_empty() {
            return Ok(0);
        }

        let n = buf.len().min((self.size - offset) as usize);
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(&mut buf[..n])?;
        Ok(n)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> MediumResult<()> {
        if data.is_empty() {
            return Ok(());
        }

        // Seeking past the end and writing leaves a zero-filled hole
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(data)?;
        self.size = self.size.max(offset + data.len() as u64);
        Ok(())
    }

    fn size(&self) -> MediumResult<u64> {
        Ok(self.size)
    }

    fn truncate(&mut self, new_size: u64) -> MediumResult<()> {
        self.file.set_len(new_size)?;
        self.size = new_size;
        Ok(())
    }

    fn flush(&mut self) -> MediumResult<()> {
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_create_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let medium = FileMedium::open(&path).unwrap();
        assert_eq!(medium.size().unwrap(), 0);
        assert!(path.exists());
    }

    #[test]
    fn file_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut medium = FileMedium::open(&path).unwrap();
        medium.write_at(0, b"hello").unwrap();
        medium.write_at(5, b" world").unwrap();
        assert_eq!(medium.size().unwrap(), 11);

        let mut buf = [0u8; 11];
        medium.read_exact_at(0, &mut buf).unwrap();
        assert_eq!(&buf, b"hello world");
    }

    #[test]
    fn file_read_at_end_is_short() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut medium = FileMedium::open(&path).unwrap();
        medium.write_at(0, b"hello").unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(medium.read_at(3, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"lo");
        assert_eq!(medium.read_at(10, &mut buf).unwrap(), 0);
    }

    #[test]
    fn file_write_past_end_leaves_zero_gap() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut medium = FileMedium::open(&path).unwrap();
        medium.write_at(0, b"ab").unwrap();
        medium.write_at(4, b"cd").unwrap();

        let mut buf = [0xffu8; 6];
        medium.read_exact_at(0, &mut buf).unwrap();
        assert_eq!(&buf, b"ab\0\0cd");
    }

    #[test]
    fn file_truncate_both_ways() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut medium = FileMedium::open(&path).unwrap();
        medium.write_at(0, b"hello world").unwrap();

        medium.truncate(5).unwrap();
        assert_eq!(medium.size().unwrap(), 5);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 5);

        medium.truncate(8).unwrap();
        let mut buf = [0xffu8; 8];
        medium.read_exact_at(0, &mut buf).unwrap();
        assert_eq!(&buf, b"hello\0\0\0");
    }

    #[test]
    fn file_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        {
            let mut medium = FileMedium::open(&path).unwrap();
            medium.write_at(0, b"persistent data").unwrap();
            medium.sync().unwrap();
        }

        {
            let mut medium = FileMedium::open(&path).unwrap();
            assert_eq!(medium.size().unwrap(), 15);

            let mut buf = [0u8; 15];
            medium.read_exact_at(0, &mut buf).unwrap();
            assert_eq!(&buf, b"persistent data");
        }
    }

    #[test]
    fn file_create_with_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("path").join("test.bin");

        let medium = FileMedium::open_with_create_dirs(&path).unwrap();
        assert_eq!(medium.size().unwrap(), 0);
        assert!(path.exists());
        assert_eq!(medium.path(), path);
    }
}
