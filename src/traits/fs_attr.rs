//! Entry inspection and attribute mutation.

use std::path::Path;
use std::time::SystemTime;

use crate::{FsError, Metadata, Permissions};

/// Metadata queries and in-place attribute mutation.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsAttr`.
pub trait FsAttr: Send + Sync {
    /// Return entry metadata without opening the entry.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn stat(&self, path: &Path) -> Result<Metadata, FsError>;

    /// Change the permission bits of an existing entry in place.
    ///
    /// Content and timestamps are untouched.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn chmod(&self, path: &Path, perm: Permissions) -> Result<(), FsError>;

    /// Change the access and modification timestamps of an existing entry
    /// in place.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn chtimes(&self, path: &Path, atime: SystemTime, mtime: SystemTime) -> Result<(), FsError>;
}
