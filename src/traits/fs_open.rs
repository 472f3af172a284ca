//! Handle-factory operations: creating and opening entries.

use std::path::Path;

use crate::{FileHandle, FsError, OpenFlags, Permissions};

/// Operations that produce open file handles.
///
/// All methods use `&self` (interior mutability). Backends manage their
/// own synchronization.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access. Backends should use interior mutability (`RwLock`,
/// `Mutex`) for thread-safe state management. The handles returned are
/// exclusively owned by the caller and follow the
/// [`VfsFile`](crate::VfsFile) ownership rules instead.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsOpen`.
pub trait FsOpen: Send + Sync {
    /// Create a new regular file, truncating an existing one.
    ///
    /// Returns an open, writable handle positioned at offset 0.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the parent directory does not exist
    /// - [`FsError::NotAFile`] if the path is an existing directory
    /// - [`FsError::ReadOnly`] or [`FsError::PermissionDenied`] on a
    ///   read-only backend
    fn create(&self, path: &Path) -> Result<FileHandle, FsError>;

    /// Open an existing entry for reading only.
    ///
    /// Succeeds on directories: the resulting handle supports only
    /// enumeration and stat, not content I/O.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn open(&self, path: &Path) -> Result<FileHandle, FsError>;

    /// General open with composable [`OpenFlags`].
    ///
    /// `perm` applies only when the call creates the file.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist and `create` is
    ///   not set, or if the parent directory is missing
    /// - [`FsError::AlreadyExists`] if `create_new` is set and the entry exists
    /// - [`FsError::NotAFile`] if write access is requested on a directory
    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        perm: Permissions,
    ) -> Result<FileHandle, FsError>;
}
