//! Namespace lifecycle operations: directories, removal, rename.

use std::path::Path;

use crate::{FsError, Permissions};

/// Name-based lifecycle management of entries within one backend's namespace.
///
/// Side effects are confined to the backend's namespace. None of these
/// operations touch handles obtained earlier, except that
/// [`remove`](Self::remove), [`remove_all`](Self::remove_all) and
/// [`rename`](Self::rename) may invalidate concurrently open handles on
/// the same backend. Whether a stale handle then fails or serves stale
/// content is backend-defined and must be documented per backend — the
/// contract only promises no crash.
///
/// # Atomicity
///
/// Namespace mutations must appear atomic with respect to each other for
/// a single target path: concurrent mutations on the same path must not
/// corrupt backend state, though the winner among racing operations is
/// unspecified.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsNamespace`.
pub trait FsNamespace: Send + Sync {
    /// Create exactly one new directory (parent must exist). Not recursive.
    ///
    /// # Errors
    ///
    /// - [`FsError::AlreadyExists`] if an entry already exists at `path`
    /// - [`FsError::NotFound`] if the immediate parent does not exist
    fn create_dir(&self, path: &Path, perm: Permissions) -> Result<(), FsError>;

    /// Create a directory and every missing ancestor.
    ///
    /// Idempotent: succeeds without error if `path` already exists and is
    /// a directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotADirectory`] if an existing path segment is a
    ///   non-directory entry
    fn create_dir_all(&self, path: &Path, perm: Permissions) -> Result<(), FsError>;

    /// Delete exactly one entry.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::DirectoryNotEmpty`] if the path is a non-empty directory
    fn remove(&self, path: &Path) -> Result<(), FsError>;

    /// Recursively delete `path` and everything beneath it.
    ///
    /// Unlike [`remove`](Self::remove), a missing path is an idempotent
    /// no-op, not an error.
    fn remove_all(&self, path: &Path) -> Result<(), FsError>;

    /// Move/rename an entry, atomically from the caller's perspective.
    ///
    /// An existing regular file at `new` is replaced. Replacing a
    /// directory with a non-empty directory must fail rather than
    /// silently merge.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `old` does not exist
    /// - [`FsError::DestinationExists`] if `new` exists and cannot be replaced
    fn rename(&self, old: &Path, new: &Path) -> Result<(), FsError>;
}
