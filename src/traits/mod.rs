//! # Filesystem Traits
//!
//! The two capabilities that define the UniFS contract.
//!
//! ## Capabilities
//!
//! | Capability | Trait(s) | Responsibility |
//! |------------|----------|----------------|
//! | Filesystem | [`FsOpen`], [`FsNamespace`], [`FsAttr`], [`FsName`] → [`Vfs`] | Name-based lifecycle of entries in one backend's namespace |
//! | File handle | [`VfsFile`] | Content I/O and enumeration on one already-open entry |
//!
//! A caller constructs a backend (any type implementing the component
//! traits), invokes [`Vfs`] operations on it, and receives boxed
//! [`VfsFile`] handles or [`FsError`](crate::FsError)s. Handles are then
//! read, written, and closed independently of the filesystem value that
//! produced them.
//!
//! ## Blanket Implementation
//!
//! [`Vfs`] has a blanket implementation. Implement the four component
//! traits and the composite comes for free:
//!
//! ```rust
//! use unifs_core::{FsAttr, FsName, FsNamespace, FsOpen, Vfs};
//! use unifs_core::{FileHandle, FsError, Metadata, OpenFlags, Permissions};
//! use std::path::Path;
//! use std::time::SystemTime;
//!
//! // Define a backend
//! struct MyBackend;
//!
//! // Implement component traits (stubs shown)
//! # impl FsOpen for MyBackend {
//! #     fn create(&self, _: &Path) -> Result<FileHandle, FsError> { unimplemented!() }
//! #     fn open(&self, _: &Path) -> Result<FileHandle, FsError> { unimplemented!() }
//! #     fn open_file(&self, _: &Path, _: OpenFlags, _: Permissions) -> Result<FileHandle, FsError> { unimplemented!() }
//! # }
//! # impl FsNamespace for MyBackend {
//! #     fn create_dir(&self, _: &Path, _: Permissions) -> Result<(), FsError> { Ok(()) }
//! #     fn create_dir_all(&self, _: &Path, _: Permissions) -> Result<(), FsError> { Ok(()) }
//! #     fn remove(&self, _: &Path) -> Result<(), FsError> { Ok(()) }
//! #     fn remove_all(&self, _: &Path) -> Result<(), FsError> { Ok(()) }
//! #     fn rename(&self, _: &Path, _: &Path) -> Result<(), FsError> { Ok(()) }
//! # }
//! # impl FsAttr for MyBackend {
//! #     fn stat(&self, _: &Path) -> Result<Metadata, FsError> { Ok(Metadata::default()) }
//! #     fn chmod(&self, _: &Path, _: Permissions) -> Result<(), FsError> { Ok(()) }
//! #     fn chtimes(&self, _: &Path, _: SystemTime, _: SystemTime) -> Result<(), FsError> { Ok(()) }
//! # }
//! # impl FsName for MyBackend {
//! #     fn name(&self) -> &'static str { "MyBackend" }
//! # }
//!
//! // Now MyBackend automatically implements Vfs!
//! fn use_fs<B: Vfs>(_backend: &B) { /* ... */ }
//! let my_backend = MyBackend;
//! use_fs(&my_backend); // ✓ Works
//! ```
//!
//! ## Thread Safety
//!
//! Filesystem traits require `Send + Sync` and take `&self`; backends use
//! interior mutability. File handles are exclusively owned, take
//! `&mut self`, and require only `Send` — see [`VfsFile`] for the rules.
//!
//! No operation may block indefinitely: backends over blocking transports
//! (e.g. a network store) apply their own timeout/cancellation policy,
//! which is outside this contract.
//!
//! ## Object Safety
//!
//! All traits are object-safe:
//!
//! ```rust
//! use unifs_core::Vfs;
//!
//! fn process(fs: &dyn Vfs) {
//!     let _ = fs.stat(std::path::Path::new("/file.txt"));
//! }
//! ```

mod file;
mod fs_attr;
mod fs_name;
mod fs_namespace;
mod fs_open;

pub use file::{FileHandle, VfsFile};
pub use fs_attr::FsAttr;
pub use fs_name::FsName;
pub use fs_namespace::FsNamespace;
pub use fs_open::FsOpen;

/// The filesystem capability: everything a backend's namespace supports.
///
/// Combines handle creation ([`FsOpen`]), namespace lifecycle
/// ([`FsNamespace`]), attributes ([`FsAttr`]) and identification
/// ([`FsName`]). Code written against `Vfs` behaves identically on every
/// conforming backend — OS-backed, in-memory, overlay, or network-backed.
///
/// # Blanket Implementation
///
/// Automatically implemented for any type implementing the four component
/// traits. You never implement `Vfs` directly.
///
/// # Example
///
/// ```rust
/// use unifs_core::{FsError, Permissions, Vfs};
/// use std::path::Path;
///
/// // Generic function that works with any Vfs implementation
/// fn install<B: Vfs>(fs: &B, path: &Path, content: &[u8]) -> Result<(), FsError> {
///     if let Some(parent) = path.parent() {
///         fs.create_dir_all(parent, Permissions::default_dir())?;
///     }
///     let mut file = fs.create(path)?;
///     file.write(content)?;
///     file.close()?;
///     Ok(())
/// }
/// ```
pub trait Vfs: FsOpen + FsNamespace + FsAttr + FsName {}

// Blanket implementation - any type implementing all four gets Vfs for free
impl<T: FsOpen + FsNamespace + FsAttr + FsName> Vfs for T {}
