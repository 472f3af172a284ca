//! # unifs-core
//!
//! Core traits and types for the **UniFS backend-agnostic filesystem contract**.
//!
//! This crate provides the uniform abstraction that filesystem backends
//! implement. It contains **only trait definitions, shared types, and the
//! semantic rules** every conforming backend must honor — no production
//! backend. Code written against these traits behaves identically whether
//! the storage underneath is the operating system, memory, a read-only
//! overlay, or a network store.
//!
//! ---
//!
//! ## Quick Start
//!
//! Most users only need [`Vfs`] (plus [`VfsExt`] for convenience helpers).
//!
//! A typical usage pattern with any backend that implements `Vfs`:
//!
//! ```rust
//! use unifs_core::{FsError, Permissions, Vfs, VfsExt};
//! use std::path::Path;
//!
//! // Generic function that works with any Vfs implementation
//! fn rotate_log<B: Vfs>(backend: &B) -> Result<(), FsError> {
//!     backend.create_dir_all(Path::new("/var/log"), Permissions::default_dir())?;
//!     if backend.exists(Path::new("/var/log/app.log"))? {
//!         backend.rename(Path::new("/var/log/app.log"), Path::new("/var/log/app.log.1"))?;
//!     }
//!     let mut log = backend.create(Path::new("/var/log/app.log"))?;
//!     log.write_string("log rotated\n")?;
//!     log.close()?;
//!     Ok(())
//! }
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Vfs`] | The filesystem capability — create, open, remove, rename, inspect |
//! | [`VfsFile`] | The file-handle capability — I/O and enumeration on one open entry |
//! | [`FsError`] | Shared error taxonomy with sentinel conditions |
//! | [`Metadata`] | Entry metadata (name, type, size, times, permissions) |
//! | [`OpenFlags`] | Composable open flags for [`FsOpen::open_file`] |
//! | [`Permissions`] | Unix-style mode bit-set |
//!
//! ---
//!
//! ## The Two Capabilities
//!
//! ```text
//! Filesystem:  FsOpen + FsNamespace + FsAttr + FsName = Vfs
//!                  |
//!                  | create / open / open_file
//!                  v
//! File handle: Box<dyn VfsFile>   (owned exclusively by the caller)
//! ```
//!
//! [`Vfs`] has a **blanket implementation**: implement the four component
//! traits and the composite comes for free. Backends box their handle
//! type and return it as [`FileHandle`].
//!
//! ---
//!
//! ## Error Handling
//!
//! All operations return `Result<T, FsError>`. The sentinel conditions —
//! not-found, already-exists, closed, out-of-range, too-large,
//! destination-exists, permission-denied — are the compatibility surface
//! callers branch on; they mean the same thing on every backend:
//!
//! ```rust
//! use unifs_core::FsError;
//! use std::path::PathBuf;
//!
//! let err = FsError::NotFound { path: PathBuf::from("/missing.txt") };
//! assert_eq!(err.to_string(), "not found: /missing.txt");
//!
//! let err = FsError::Closed { path: PathBuf::from("/f.txt") };
//! assert_eq!(err.to_string(), "file closed: /f.txt");
//! ```
//!
//! The contract never recovers or retries on behalf of the caller: every
//! failure returns immediately, and an operation either fully completes
//! or has no effect (namespace operations) or an effect bounded by the
//! returned byte count (short reads/writes).
//!
//! ---
//!
//! ## Thread Safety
//!
//! Filesystem traits require `Send + Sync` and take `&self` (interior
//! mutability in backends), so a backend can be shared across threads via
//! `Arc<B>`. A [`VfsFile`] handle is exclusively owned by the caller that
//! obtained it, takes `&mut self`, and is `Send` but deliberately not
//! required to be `Sync` — callers sharing a handle across tasks
//! serialize access themselves.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`Metadata`], [`Permissions`], [`OpenFlags`], [`FileType`], plus `VfsExtJson` helpers |
//!
//! ---
//!
//! ## Crate Organization
//!
//! This crate (`unifs-core`) contains only the contract. Concrete
//! backends live in their own crates and implement the component traits;
//! a complete in-memory reference backend ships as the `memory_vfs`
//! example and doubles as the conformance-test subject.

// Private modules
mod error;
mod ext;
mod traits;
mod types;

// Public modules
pub mod path;

// Public re-exports - error types
pub use error::FsError;

// Public re-exports - core types
pub use types::{FileType, MODE_DIR, Metadata, OpenFlags, Permissions};

// Public re-exports - the filesystem capability
pub use traits::{FsAttr, FsName, FsNamespace, FsOpen, Vfs};

// Public re-exports - the file-handle capability
pub use traits::{FileHandle, VfsFile};

// Public re-exports - infrastructure
pub use ext::VfsExt;

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::VfsExtJson;
