//! The open-file-handle capability.
//!
//! This module provides the [`VfsFile`] trait: an open, stateful cursor
//! over one filesystem entry, created by the open/create operations of
//! [`FsOpen`](crate::FsOpen) and destroyed by an explicit
//! [`close`](VfsFile::close).
//!
//! # Handle States
//!
//! A handle is in exactly one of four states: open-readable,
//! open-writable, open-readable-writable, or closed. It enters an open
//! state only through a successful `open`/`create`/`open_file` call and
//! leaves it only through a successful `close`. Once closed, every
//! operation except [`close`](VfsFile::close) and [`name`](VfsFile::name)
//! fails with [`FsError::Closed`]; there is no way back to an open state.
//!
//! # Ownership
//!
//! A handle belongs exclusively to the caller that obtained it — the
//! contract never shares one handle between callers, and a handle is not
//! required to be safe for simultaneous use from concurrent tasks.
//! Methods therefore take `&mut self`; callers that move a handle across
//! tasks serialize access themselves. Handles are `Send` so moving is
//! always allowed.

use std::io::SeekFrom;
use std::path::Path;

use crate::{FsError, Metadata};

/// A boxed file handle, as returned by the open/create operations.
pub type FileHandle = Box<dyn VfsFile>;

/// An open file or directory handle.
///
/// Supports sequential I/O through an internal cursor, positioned I/O
/// that leaves the cursor alone, directory enumeration, and metadata
/// queries. See the [module docs](self) for the state machine and
/// ownership rules.
///
/// # Directory Handles
///
/// Opening a directory yields a handle usable only for
/// [`read_dir`](Self::read_dir), [`read_dir_names`](Self::read_dir_names),
/// [`stat`](Self::stat), [`name`](Self::name) and [`close`](Self::close);
/// content I/O on it fails with [`FsError::NotAFile`].
pub trait VfsFile: Send {
    /// Sequential read into `buf`, advancing the internal cursor.
    ///
    /// Returns the number of bytes read. `Ok(0)` with a non-empty `buf`
    /// is the end-of-stream signal; `Ok(0)` with an empty `buf` means
    /// nothing and says nothing about the stream.
    ///
    /// # Errors
    ///
    /// - [`FsError::Closed`] if the handle has been closed
    /// - [`FsError::PermissionDenied`] if the handle wasn't opened for reading
    /// - [`FsError::NotAFile`] if the handle refers to a directory
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError>;

    /// Positioned read at `offset`, leaving the sequential cursor alone.
    ///
    /// Returns the number of bytes read; `Ok(0)` past end-of-file.
    ///
    /// # Errors
    ///
    /// - [`FsError::Closed`] if the handle has been closed
    /// - [`FsError::PermissionDenied`] if the handle wasn't opened for reading
    /// - [`FsError::NotAFile`] if the handle refers to a directory
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<usize, FsError>;

    /// Sequential write, advancing the internal cursor.
    ///
    /// On a handle opened with the `append` flag every sequential write
    /// lands at end-of-file regardless of the cursor. Returns the number
    /// of bytes written; a short write is bounded by the returned count.
    ///
    /// # Errors
    ///
    /// - [`FsError::Closed`] if the handle has been closed
    /// - [`FsError::PermissionDenied`] if the handle wasn't opened for writing
    /// - [`FsError::NotAFile`] if the handle refers to a directory
    /// - [`FsError::TooLarge`] if the write would exceed a backend size limit
    fn write(&mut self, data: &[u8]) -> Result<usize, FsError>;

    /// Positioned write at `offset`, leaving the sequential cursor alone.
    ///
    /// # Errors
    ///
    /// - [`FsError::Closed`] if the handle has been closed
    /// - [`FsError::PermissionDenied`] if the handle wasn't opened for writing
    /// - [`FsError::NotAFile`] if the handle refers to a directory
    /// - [`FsError::TooLarge`] if the write would exceed a backend size limit
    fn write_at(&mut self, data: &[u8], offset: u64) -> Result<usize, FsError>;

    /// Reposition the sequential cursor. Returns the new position.
    ///
    /// # Errors
    ///
    /// - [`FsError::Closed`] if the handle has been closed
    /// - [`FsError::OutOfRange`] if the resulting position would be negative
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError>;

    /// Release backend resources held by the handle.
    ///
    /// After a successful close, all further I/O on the handle fails with
    /// [`FsError::Closed`]. Whether a second close is an error or a no-op
    /// is backend-defined and must be documented per backend.
    fn close(&mut self) -> Result<(), FsError>;

    /// The path this handle was opened with. Never fails, even closed.
    fn name(&self) -> &Path;

    /// Enumerate directory entries.
    ///
    /// With `count > 0`, returns up to `count` entries and remembers the
    /// enumeration position for the next call; an empty vector signals
    /// that the listing is exhausted. With `count <= 0`, returns all
    /// remaining entries in one call.
    ///
    /// Ordering is backend-defined but must be stable across repeated
    /// calls within one enumeration session over an unmodified directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::Closed`] if the handle has been closed
    /// - [`FsError::NotADirectory`] if the handle refers to a regular file
    fn read_dir(&mut self, count: isize) -> Result<Vec<Metadata>, FsError>;

    /// Like [`read_dir`](Self::read_dir), but returns bare entry names.
    ///
    /// Shares the pagination contract and the enumeration cursor rules of
    /// `read_dir`.
    ///
    /// # Errors
    ///
    /// - [`FsError::Closed`] if the handle has been closed
    /// - [`FsError::NotADirectory`] if the handle refers to a regular file
    fn read_dir_names(&mut self, n: isize) -> Result<Vec<String>, FsError>;

    /// Metadata of the open entry, reflecting its state at call time.
    ///
    /// Never a snapshot from open time: mutations through other handles
    /// or namespace operations are visible here.
    ///
    /// # Errors
    ///
    /// - [`FsError::Closed`] if the handle has been closed
    fn stat(&self) -> Result<Metadata, FsError>;

    /// Flush buffered writes to durable storage.
    ///
    /// Backends without write buffering return `Ok(())` — but must still
    /// reject the call on a closed handle.
    ///
    /// # Errors
    ///
    /// - [`FsError::Closed`] if the handle has been closed
    fn sync(&mut self) -> Result<(), FsError>;

    /// Grow (zero-filling) or shrink the entry to exactly `size` bytes.
    ///
    /// # Errors
    ///
    /// - [`FsError::Closed`] if the handle has been closed
    /// - [`FsError::PermissionDenied`] if the handle is read-only
    /// - [`FsError::NotAFile`] if the handle refers to a directory
    /// - [`FsError::TooLarge`] if `size` exceeds a backend limit
    fn truncate(&mut self, size: u64) -> Result<(), FsError>;

    /// Write the UTF-8 bytes of `s`. Same semantics as [`write`](Self::write).
    fn write_string(&mut self, s: &str) -> Result<usize, FsError> {
        self.write(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Minimal in-memory handle used to exercise the trait contract.
    struct CursorFile {
        path: PathBuf,
        data: Vec<u8>,
        pos: u64,
        writable: bool,
        append: bool,
        closed: bool,
    }

    impl CursorFile {
        fn new(data: &[u8], writable: bool) -> Self {
            Self {
                path: PathBuf::from("/cursor.bin"),
                data: data.to_vec(),
                pos: 0,
                writable,
                append: false,
                closed: false,
            }
        }

        fn check_open(&self) -> Result<(), FsError> {
            if self.closed {
                Err(FsError::Closed {
                    path: self.path.clone(),
                })
            } else {
                Ok(())
            }
        }
    }

    impl VfsFile for CursorFile {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
            self.check_open()?;
            let n = self.read_at_pos(buf, self.pos);
            self.pos += n as u64;
            Ok(n)
        }

        fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<usize, FsError> {
            self.check_open()?;
            Ok(self.read_at_pos(buf, offset))
        }

        fn write(&mut self, data: &[u8]) -> Result<usize, FsError> {
            self.check_open()?;
            if !self.writable {
                return Err(FsError::PermissionDenied {
                    path: self.path.clone(),
                    operation: "write",
                });
            }
            if self.append {
                self.pos = self.data.len() as u64;
            }
            let n = self.write_at_pos(data, self.pos);
            self.pos += n as u64;
            Ok(n)
        }

        fn write_at(&mut self, data: &[u8], offset: u64) -> Result<usize, FsError> {
            self.check_open()?;
            if !self.writable {
                return Err(FsError::PermissionDenied {
                    path: self.path.clone(),
                    operation: "write_at",
                });
            }
            Ok(self.write_at_pos(data, offset))
        }

        fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError> {
            self.check_open()?;
            let target = match pos {
                SeekFrom::Start(n) => n as i64,
                SeekFrom::Current(d) => self.pos as i64 + d,
                SeekFrom::End(d) => self.data.len() as i64 + d,
            };
            if target < 0 {
                return Err(FsError::OutOfRange {
                    operation: "seek",
                    position: target,
                });
            }
            self.pos = target as u64;
            Ok(self.pos)
        }

        fn close(&mut self) -> Result<(), FsError> {
            self.check_open()?;
            self.closed = true;
            Ok(())
        }

        fn name(&self) -> &Path {
            &self.path
        }

        fn read_dir(&mut self, _count: isize) -> Result<Vec<Metadata>, FsError> {
            self.check_open()?;
            Err(FsError::NotADirectory {
                path: self.path.clone(),
            })
        }

        fn read_dir_names(&mut self, _n: isize) -> Result<Vec<String>, FsError> {
            self.check_open()?;
            Err(FsError::NotADirectory {
                path: self.path.clone(),
            })
        }

        fn stat(&self) -> Result<Metadata, FsError> {
            self.check_open()?;
            Ok(Metadata {
                name: "cursor.bin".into(),
                size: self.data.len() as u64,
                ..Default::default()
            })
        }

        fn sync(&mut self) -> Result<(), FsError> {
            self.check_open()
        }

        fn truncate(&mut self, size: u64) -> Result<(), FsError> {
            self.check_open()?;
            if !self.writable {
                return Err(FsError::PermissionDenied {
                    path: self.path.clone(),
                    operation: "truncate",
                });
            }
            self.data.resize(size as usize, 0);
            Ok(())
        }
    }

    impl CursorFile {
        fn read_at_pos(&self, buf: &mut [u8], offset: u64) -> usize {
            let offset = offset as usize;
            if offset >= self.data.len() {
                return 0;
            }
            let n = buf.len().min(self.data.len() - offset);
            buf[..n].copy_from_slice(&self.data[offset..offset + n]);
            n
        }

        fn write_at_pos(&mut self, data: &[u8], offset: u64) -> usize {
            let offset = offset as usize;
            let end = offset + data.len();
            if end > self.data.len() {
                self.data.resize(end, 0);
            }
            self.data[offset..end].copy_from_slice(data);
            data.len()
        }
    }

    #[test]
    fn vfs_file_is_object_safe() {
        fn _check(_: &mut dyn VfsFile) {}
    }

    #[test]
    fn sequential_read_advances_and_hits_eof() {
        let mut f = CursorFile::new(b"hello", false);
        let mut buf = [0u8; 3];
        assert_eq!(f.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf, b"hel");
        assert_eq!(f.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"lo");
        // End of stream
        assert_eq!(f.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn read_at_leaves_cursor_alone() {
        let mut f = CursorFile::new(b"hello world", false);
        let mut buf = [0u8; 5];
        assert_eq!(f.read_at(&mut buf, 6).unwrap(), 5);
        assert_eq!(&buf, b"world");
        // Sequential cursor still at 0
        assert_eq!(f.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf, b"hello");
    }

    #[test]
    fn write_on_readonly_handle_fails() {
        let mut f = CursorFile::new(b"hello", false);
        let result = f.write(b"x");
        assert!(matches!(result, Err(FsError::PermissionDenied { .. })));
    }

    #[test]
    fn append_mode_writes_at_end() {
        let mut f = CursorFile::new(b"abc", true);
        f.append = true;
        f.seek(SeekFrom::Start(0)).unwrap();
        f.write(b"def").unwrap();
        assert_eq!(f.data, b"abcdef");
    }

    #[test]
    fn seek_before_start_is_out_of_range() {
        let mut f = CursorFile::new(b"abc", false);
        let result = f.seek(SeekFrom::Current(-1));
        assert!(matches!(result, Err(FsError::OutOfRange { position: -1, .. })));
    }

    #[test]
    fn seek_relative_to_end() {
        let mut f = CursorFile::new(b"abcdef", false);
        assert_eq!(f.seek(SeekFrom::End(-2)).unwrap(), 4);
        let mut buf = [0u8; 2];
        assert_eq!(f.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf, b"ef");
    }

    #[test]
    fn closed_handle_rejects_everything_but_name() {
        let mut f = CursorFile::new(b"abc", true);
        f.close().unwrap();

        let mut buf = [0u8; 1];
        assert!(matches!(f.read(&mut buf), Err(FsError::Closed { .. })));
        assert!(matches!(f.write(b"x"), Err(FsError::Closed { .. })));
        assert!(matches!(f.seek(SeekFrom::Start(0)), Err(FsError::Closed { .. })));
        assert!(matches!(f.stat(), Err(FsError::Closed { .. })));
        assert!(matches!(f.sync(), Err(FsError::Closed { .. })));
        assert!(matches!(f.truncate(0), Err(FsError::Closed { .. })));
        // name still answers
        assert_eq!(f.name(), Path::new("/cursor.bin"));
    }

    #[test]
    fn write_string_delegates_to_write() {
        let mut f = CursorFile::new(b"", true);
        assert_eq!(f.write_string("hi").unwrap(), 2);
        assert_eq!(f.data, b"hi");
    }

    #[test]
    fn read_dir_on_file_handle_fails() {
        let mut f = CursorFile::new(b"abc", false);
        assert!(matches!(f.read_dir(0), Err(FsError::NotADirectory { .. })));
        assert!(matches!(f.read_dir_names(0), Err(FsError::NotADirectory { .. })));
    }
}
