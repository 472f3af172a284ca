//! # Extension Traits
//!
//! Convenience methods for filesystem backends.
//!
//! ## Overview
//!
//! [`VfsExt`] provides the whole-file and query helpers callers reach for
//! most often, built entirely on the core contract: each method opens a
//! handle, drives it, and closes it. They are default methods with a
//! blanket implementation, so any [`Vfs`] backend gets them for free.
//!
//! ## Available Methods
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`read`](VfsExt::read) | Read an entire file as bytes |
//! | [`read_to_string`](VfsExt::read_to_string) | Read an entire file as UTF-8 |
//! | [`write`](VfsExt::write) | Create/truncate and write an entire file |
//! | [`append`](VfsExt::append) | Append bytes, creating the file if missing |
//! | [`exists`](VfsExt::exists) | Check whether a path exists |
//! | [`is_file`](VfsExt::is_file) | Check if path is a regular file |
//! | [`is_dir`](VfsExt::is_dir) | Check if path is a directory |
//! | [`file_size`](VfsExt::file_size) | Size in bytes from metadata |
//! | [`list_dir`](VfsExt::list_dir) | Collect a full directory listing |
//!
//! ## JSON Support (Feature-Gated)
//!
//! With the `serde` feature enabled, [`VfsExtJson`] adds `read_json` and
//! `write_json`. Enable with:
//!
//! ```toml
//! [dependencies]
//! unifs-core = { version = "0.1", features = ["serde"] }
//! ```

use crate::{FsError, Metadata, OpenFlags, Permissions, Vfs};
use std::path::Path;

/// Drive a handle's sequential write until `data` is fully written.
///
/// The contract allows short writes bounded by the returned count, so
/// helpers loop; zero progress is reported as an I/O error.
fn write_all(
    file: &mut dyn crate::VfsFile,
    path: &Path,
    data: &[u8],
) -> Result<(), FsError> {
    let mut written = 0;
    while written < data.len() {
        let n = file.write(&data[written..])?;
        if n == 0 {
            return Err(FsError::Io {
                operation: "write",
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "write made no progress",
                ),
            });
        }
        written += n;
    }
    Ok(())
}

/// Extension methods for any filesystem backend.
///
/// Provides convenience methods not in the core traits but commonly
/// needed. All methods have default implementations built on the
/// contract, so backends get them automatically.
///
/// # Example
///
/// ```rust
/// use unifs_core::{FsError, Vfs, VfsExt};
/// use std::path::Path;
///
/// fn load_config<B: Vfs>(backend: &B) -> Result<String, FsError> {
///     if backend.is_file(Path::new("/etc/app.conf"))? {
///         backend.read_to_string(Path::new("/etc/app.conf"))
///     } else {
///         Ok(String::new())
///     }
/// }
/// ```
pub trait VfsExt: Vfs {
    /// Read an entire file as bytes.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotAFile`] if the path is a directory
    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        let mut file = self.open(path)?;
        let size = file.stat()?.size as usize;
        let mut data = Vec::with_capacity(size);
        let mut buf = [0u8; 8192];
        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
        }
        file.close()?;
        Ok(data)
    }

    /// Read an entire file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::InvalidData`] if the content is not valid UTF-8
    fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|_| FsError::InvalidData {
            path: path.to_path_buf(),
            details: "not valid UTF-8".into(),
        })
    }

    /// Write `data` to a file, creating it and truncating existing content.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the parent directory does not exist
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let mut file = self.create(path)?;
        write_all(file.as_mut(), path, data)?;
        file.close()
    }

    /// Append `data` to a file, creating it if missing.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the parent directory does not exist
    fn append(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let mut file = self.open_file(path, OpenFlags::APPEND, Permissions::default_file())?;
        write_all(file.as_mut(), path, data)?;
        file.close()
    }

    /// Check whether a path exists.
    ///
    /// Returns `Ok(false)` for a missing path (not an error); any other
    /// failure propagates.
    fn exists(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(_) => Ok(true),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if the path points to a regular file.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    fn is_file(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(m) => Ok(m.is_file()),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if the path points to a directory.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    fn is_dir(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(m) => Ok(m.is_dir()),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Get the size of a file in bytes.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn file_size(&self, path: &Path) -> Result<u64, FsError> {
        Ok(self.stat(path)?.size)
    }

    /// Collect the full listing of a directory in one call.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotADirectory`] if the path is a regular file
    fn list_dir(&self, path: &Path) -> Result<Vec<Metadata>, FsError> {
        let mut dir = self.open(path)?;
        let entries = dir.read_dir(-1)?;
        dir.close()?;
        Ok(entries)
    }
}

// Blanket implementation - any Vfs backend gets VfsExt for free
impl<B: Vfs + ?Sized> VfsExt for B {}

// =============================================================================
// JSON Support (Feature-Gated)
// =============================================================================

#[cfg(feature = "serde")]
mod json {
    use super::*;
    use serde::{Serialize, de::DeserializeOwned};

    /// JSON serialization extension methods.
    ///
    /// Available when the `serde` feature is enabled.
    pub trait VfsExtJson: Vfs {
        /// Read a file and deserialize it as JSON.
        ///
        /// # Errors
        ///
        /// - [`FsError::NotFound`] — file doesn't exist
        /// - [`FsError::InvalidData`] — file isn't valid UTF-8 or valid JSON
        fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, FsError> {
            let data = self.read_to_string(path)?;
            serde_json::from_str(&data).map_err(|e| FsError::InvalidData {
                path: path.to_path_buf(),
                details: e.to_string(),
            })
        }

        /// Serialize a value and write it as JSON.
        ///
        /// Uses pretty-printing with 2-space indentation.
        ///
        /// # Errors
        ///
        /// - [`FsError::InvalidData`] — JSON serialization failed
        /// - Other [`FsError`] variants from the underlying `write()` call
        fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), FsError> {
            let json =
                serde_json::to_string_pretty(value).map_err(|e| FsError::InvalidData {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                })?;
            self.write(path, json.as_bytes())
        }
    }

    // Blanket implementation
    impl<B: Vfs + ?Sized> VfsExtJson for B {}
}

#[cfg(feature = "serde")]
pub use json::VfsExtJson;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileHandle, FileType, FsAttr, FsName, FsNamespace, FsOpen, VfsFile};
    use std::collections::HashMap;
    use std::io::SeekFrom;
    use std::path::PathBuf;
    use std::sync::{Arc, RwLock};
    use std::time::SystemTime;

    type Files = Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>;

    /// Flat mock backend: file paths only, no real directory tree.
    struct MockFs {
        files: Files,
    }

    impl MockFs {
        fn new() -> Self {
            Self {
                files: Arc::new(RwLock::new(HashMap::new())),
            }
        }

        fn with_file(path: &str, data: &[u8]) -> Self {
            let fs = Self::new();
            fs.files
                .write()
                .unwrap()
                .insert(PathBuf::from(path), data.to_vec());
            fs
        }

        fn handle(&self, path: &Path, flags: OpenFlags) -> FileHandle {
            Box::new(MockFile {
                files: Arc::clone(&self.files),
                path: path.to_path_buf(),
                pos: 0,
                flags,
                closed: false,
            })
        }
    }

    struct MockFile {
        files: Files,
        path: PathBuf,
        pos: u64,
        flags: OpenFlags,
        closed: bool,
    }

    impl MockFile {
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

    impl VfsFile for MockFile {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
            self.check_open()?;
            let files = self.files.read().unwrap();
            let data = files.get(&self.path).ok_or_else(|| FsError::NotFound {
                path: self.path.clone(),
            })?;
            let offset = self.pos as usize;
            if offset >= data.len() {
                return Ok(0);
            }
            let n = buf.len().min(data.len() - offset);
            buf[..n].copy_from_slice(&data[offset..offset + n]);
            self.pos += n as u64;
            Ok(n)
        }

        fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<usize, FsError> {
            self.check_open()?;
            let files = self.files.read().unwrap();
            let data = files.get(&self.path).ok_or_else(|| FsError::NotFound {
                path: self.path.clone(),
            })?;
            let offset = offset as usize;
            if offset >= data.len() {
                return Ok(0);
            }
            let n = buf.len().min(data.len() - offset);
            buf[..n].copy_from_slice(&data[offset..offset + n]);
            Ok(n)
        }

        fn write(&mut self, data: &[u8]) -> Result<usize, FsError> {
            self.check_open()?;
            let mut files = self.files.write().unwrap();
            let content = files.entry(self.path.clone()).or_default();
            if self.flags.append {
                self.pos = content.len() as u64;
            }
            let offset = self.pos as usize;
            let end = offset + data.len();
            if end > content.len() {
                content.resize(end, 0);
            }
            content[offset..end].copy_from_slice(data);
            self.pos = end as u64;
            Ok(data.len())
        }

        fn write_at(&mut self, data: &[u8], offset: u64) -> Result<usize, FsError> {
            self.check_open()?;
            let mut files = self.files.write().unwrap();
            let content = files.entry(self.path.clone()).or_default();
            let offset = offset as usize;
            let end = offset + data.len();
            if end > content.len() {
                content.resize(end, 0);
            }
            content[offset..end].copy_from_slice(data);
            Ok(data.len())
        }

        fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError> {
            self.check_open()?;
            let len = self
                .files
                .read()
                .unwrap()
                .get(&self.path)
                .map(|d| d.len())
                .unwrap_or(0) as i64;
            let target = match pos {
                SeekFrom::Start(n) => n as i64,
                SeekFrom::Current(d) => self.pos as i64 + d,
                SeekFrom::End(d) => len + d,
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
            let size = self
                .files
                .read()
                .unwrap()
                .get(&self.path)
                .map(|d| d.len())
                .unwrap_or(0) as u64;
            Ok(Metadata {
                name: crate::path::base(&self.path),
                size,
                ..Default::default()
            })
        }

        fn sync(&mut self) -> Result<(), FsError> {
            self.check_open()
        }

        fn truncate(&mut self, size: u64) -> Result<(), FsError> {
            self.check_open()?;
            let mut files = self.files.write().unwrap();
            let content = files.entry(self.path.clone()).or_default();
            content.resize(size as usize, 0);
            Ok(())
        }
    }

    impl FsOpen for MockFs {
        fn create(&self, path: &Path) -> Result<FileHandle, FsError> {
            self.files
                .write()
                .unwrap()
                .insert(path.to_path_buf(), Vec::new());
            Ok(self.handle(path, OpenFlags::WRITE))
        }

        fn open(&self, path: &Path) -> Result<FileHandle, FsError> {
            if !self.files.read().unwrap().contains_key(path) {
                return Err(FsError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Ok(self.handle(path, OpenFlags::READ))
        }

        fn open_file(
            &self,
            path: &Path,
            flags: OpenFlags,
            _perm: Permissions,
        ) -> Result<FileHandle, FsError> {
            let exists = self.files.read().unwrap().contains_key(path);
            if !exists && !flags.create {
                return Err(FsError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            if !exists {
                self.files
                    .write()
                    .unwrap()
                    .insert(path.to_path_buf(), Vec::new());
            }
            Ok(self.handle(path, flags))
        }
    }

    impl FsNamespace for MockFs {
        fn create_dir(&self, _: &Path, _: Permissions) -> Result<(), FsError> {
            Ok(())
        }

        fn create_dir_all(&self, _: &Path, _: Permissions) -> Result<(), FsError> {
            Ok(())
        }

        fn remove(&self, path: &Path) -> Result<(), FsError> {
            self.files
                .write()
                .unwrap()
                .remove(path)
                .map(|_| ())
                .ok_or_else(|| FsError::NotFound {
                    path: path.to_path_buf(),
                })
        }

        fn remove_all(&self, path: &Path) -> Result<(), FsError> {
            self.files.write().unwrap().remove(path);
            Ok(())
        }

        fn rename(&self, old: &Path, new: &Path) -> Result<(), FsError> {
            let mut files = self.files.write().unwrap();
            let data = files.remove(old).ok_or_else(|| FsError::NotFound {
                path: old.to_path_buf(),
            })?;
            files.insert(new.to_path_buf(), data);
            Ok(())
        }
    }

    impl FsAttr for MockFs {
        fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
            let files = self.files.read().unwrap();
            match files.get(path) {
                Some(data) => Ok(Metadata {
                    name: crate::path::base(path),
                    file_type: FileType::File,
                    size: data.len() as u64,
                    ..Default::default()
                }),
                None => Err(FsError::NotFound {
                    path: path.to_path_buf(),
                }),
            }
        }

        fn chmod(&self, _: &Path, _: Permissions) -> Result<(), FsError> {
            Ok(())
        }

        fn chtimes(&self, _: &Path, _: SystemTime, _: SystemTime) -> Result<(), FsError> {
            Ok(())
        }
    }

    impl FsName for MockFs {
        fn name(&self) -> &'static str {
            "MockFs"
        }
    }

    #[test]
    fn read_returns_whole_file() {
        let fs = MockFs::with_file("/test.txt", b"hello world");
        assert_eq!(fs.read(Path::new("/test.txt")).unwrap(), b"hello world");
    }

    #[test]
    fn read_missing_file_fails() {
        let fs = MockFs::new();
        let result = fs.read(Path::new("/missing"));
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn read_to_string_rejects_invalid_utf8() {
        let fs = MockFs::with_file("/bin", &[0xff, 0xfe]);
        let result = fs.read_to_string(Path::new("/bin"));
        assert!(matches!(result, Err(FsError::InvalidData { .. })));
    }

    #[test]
    fn write_then_read_round_trip() {
        let fs = MockFs::new();
        fs.write(Path::new("/out.txt"), b"payload").unwrap();
        assert_eq!(fs.read(Path::new("/out.txt")).unwrap(), b"payload");
    }

    #[test]
    fn append_extends_existing_content() {
        let fs = MockFs::with_file("/log", b"one\n");
        fs.append(Path::new("/log"), b"two\n").unwrap();
        assert_eq!(fs.read(Path::new("/log")).unwrap(), b"one\ntwo\n");
    }

    #[test]
    fn exists_and_is_file() {
        let fs = MockFs::with_file("/test.txt", b"x");
        assert!(fs.exists(Path::new("/test.txt")).unwrap());
        assert!(fs.is_file(Path::new("/test.txt")).unwrap());
        assert!(!fs.exists(Path::new("/missing")).unwrap());
        assert!(!fs.is_file(Path::new("/missing")).unwrap());
        assert!(!fs.is_dir(Path::new("/missing")).unwrap());
    }

    #[test]
    fn file_size_returns_size() {
        let fs = MockFs::with_file("/test.txt", b"12345");
        assert_eq!(fs.file_size(Path::new("/test.txt")).unwrap(), 5);
    }

    #[test]
    fn file_size_errors_on_missing() {
        let fs = MockFs::new();
        let result = fs.file_size(Path::new("/missing"));
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn vfs_ext_available_on_dyn_vfs() {
        let mock = MockFs::with_file("/test.txt", b"x");
        let fs: &dyn Vfs = &mock;
        // VfsExt methods work on trait objects
        assert!(fs.is_file(Path::new("/test.txt")).unwrap());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip() {
        let fs = MockFs::new();
        let value = serde_json::json!({"name": "unifs", "level": 3});
        fs.write_json(Path::new("/config.json"), &value).unwrap();
        let loaded: serde_json::Value = fs.read_json(Path::new("/config.json")).unwrap();
        assert_eq!(loaded, value);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn read_json_rejects_bad_json() {
        let fs = MockFs::with_file("/bad.json", b"{nope");
        let result: Result<serde_json::Value, _> = fs.read_json(Path::new("/bad.json"));
        assert!(matches!(result, Err(FsError::InvalidData { .. })));
    }
}
