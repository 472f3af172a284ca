//! Error types for the UniFS filesystem contract.

use std::path::PathBuf;

/// Filesystem error type shared by every backend.
///
/// The first seven variants are the *sentinel* conditions of the contract:
/// whenever a backend's native failure matches one of them, the backend
/// must report that variant so caller error-handling stays
/// backend-independent. Everything else propagates as a named or opaque
/// condition that callers can only treat generically (log/report).
///
/// Uses `#[non_exhaustive]` for forward compatibility.
///
/// # Examples
///
/// ```rust
/// use unifs_core::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound { path: PathBuf::from("/missing.txt") };
/// assert_eq!(err.to_string(), "not found: /missing.txt");
///
/// // Permission errors include the operation
/// let err = FsError::PermissionDenied {
///     path: PathBuf::from("/secret"),
///     operation: "write",
/// };
/// assert_eq!(err.to_string(), "write: permission denied: /secret");
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    // Sentinel conditions - every backend maps matching native failures here
    /// Path does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Path already exists when it shouldn't.
    #[error("{operation}: already exists: {path}")]
    AlreadyExists {
        /// The path that already exists.
        path: PathBuf,
        /// The operation that failed.
        operation: &'static str,
    },

    /// Operation on a file handle that has been closed.
    #[error("file closed: {path}")]
    Closed {
        /// The path the handle was opened with.
        path: PathBuf,
    },

    /// A position or offset fell outside the valid range (e.g. a seek
    /// that would land before the start of the file).
    #[error("{operation}: position out of range: {position}")]
    OutOfRange {
        /// The operation that failed.
        operation: &'static str,
        /// The offending position.
        position: i64,
    },

    /// The entry would exceed a backend size limit.
    #[error("too large: {path} ({size} > {limit})")]
    TooLarge {
        /// The path to the entry.
        path: PathBuf,
        /// The size that was requested.
        size: u64,
        /// The backend's limit.
        limit: u64,
    },

    /// Rename destination exists and cannot be replaced.
    #[error("rename: destination exists: {path}")]
    DestinationExists {
        /// The destination path.
        path: PathBuf,
    },

    /// Permission denied for operation.
    #[error("{operation}: permission denied: {path}")]
    PermissionDenied {
        /// The path where permission was denied.
        path: PathBuf,
        /// The operation that was denied.
        operation: &'static str,
    },

    // Named conditions - callers may match these, but backends are free
    // to report the opaque classes instead where their native error
    // doesn't distinguish
    /// Expected a file but found something else.
    #[error("not a file: {path}")]
    NotAFile {
        /// The path that is not a file.
        path: PathBuf,
    },

    /// Expected a directory but found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// Directory is not empty when it should be.
    #[error("directory not empty: {path}")]
    DirectoryNotEmpty {
        /// The path to the non-empty directory.
        path: PathBuf,
    },

    /// Filesystem is read-only.
    #[error("read-only filesystem: {operation}")]
    ReadOnly {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// Invalid data encountered (e.g. non-UTF-8 content read as text).
    #[error("invalid data: {path} ({details})")]
    InvalidData {
        /// The path with invalid data.
        path: PathBuf,
        /// Details about the invalid data.
        details: String,
    },

    // Opaque classes - backend-specific failures callers treat generically
    /// Generic backend error.
    #[error("backend error: {0}")]
    Backend(String),

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for FsError {
    fn from(error: std::io::Error) -> Self {
        // Map common io::ErrorKind values onto sentinel variants
        match error.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound {
                path: PathBuf::new(),
            },
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied {
                path: PathBuf::new(),
                operation: "io",
            },
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists {
                path: PathBuf::new(),
                operation: "io",
            },
            _ => FsError::Io {
                operation: "io",
                path: PathBuf::new(),
                source: error,
            },
        }
    }
}
