//! Core types for the UniFS filesystem contract.

use std::time::SystemTime;

/// Type of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

/// Metadata for a filesystem entry.
///
/// Produced on demand by `stat`-style queries ([`FsAttr::stat`](crate::FsAttr::stat),
/// [`VfsFile::stat`](crate::VfsFile::stat)) and never cached by the contract layer:
/// two consecutive queries may observe different values if the entry changed
/// in between.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Name of the entry (final path segment, not the full path).
    pub name: String,
    /// Type of the entry (file or directory).
    pub file_type: FileType,
    /// Size in bytes. Directories report a backend-defined size (usually 0).
    pub size: u64,
    /// Permissions.
    pub permissions: Permissions,
    /// Last modification time.
    #[cfg_attr(feature = "serde", serde(with = "system_time_serde"))]
    pub modified: SystemTime,
    /// Last access time.
    #[cfg_attr(feature = "serde", serde(with = "system_time_serde"))]
    pub accessed: SystemTime,
    /// Backend-defined identity of the entry.
    ///
    /// Unique within a single backend while the entry exists. Values are
    /// **not** comparable across backends.
    pub inode: u64,
}

impl Metadata {
    /// Returns `true` if this is a regular file.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    /// Returns `true` if this is a directory.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

impl Default for Metadata {
    /// The documented zero value: empty name, regular file, size 0,
    /// default file permissions, epoch timestamps, inode 0.
    fn default() -> Self {
        Self {
            name: String::new(),
            file_type: FileType::File,
            size: 0,
            permissions: Permissions::default_file(),
            modified: SystemTime::UNIX_EPOCH,
            accessed: SystemTime::UNIX_EPOCH,
            inode: 0,
        }
    }
}

/// Directory bit within a mode value (Unix `S_IFDIR`).
pub const MODE_DIR: u32 = 0o040000;

/// Bits retained by [`Permissions::from_mode`]: rwx for owner/group/other,
/// setuid/setgid/sticky, and the directory bit.
const MODE_MASK: u32 = MODE_DIR | 0o7777;

/// Unix-style permissions stored as a mode bitmask.
///
/// Carries the standard permission bits (rwxrwxrwx) plus the directory
/// bit ([`MODE_DIR`]). The directory bit describes what the entry *is*;
/// backends keep it consistent with [`Metadata::file_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permissions(u32);

impl Permissions {
    /// Create permissions from a Unix mode (e.g., 0o755).
    ///
    /// Bits outside the permission set and the directory bit are masked off.
    #[inline]
    pub const fn from_mode(mode: u32) -> Self {
        Self(mode & MODE_MASK)
    }

    /// Get the raw mode value.
    #[inline]
    pub const fn mode(&self) -> u32 {
        self.0
    }

    /// Returns `true` if these permissions deny writing.
    #[inline]
    pub const fn readonly(&self) -> bool {
        // No write bit set for user, group, or other
        (self.0 & 0o222) == 0
    }

    /// Returns `true` if the directory bit is set.
    #[inline]
    pub const fn is_dir(&self) -> bool {
        (self.0 & MODE_DIR) != 0
    }

    /// Default permissions for a new file (0o644 = rw-r--r--).
    #[inline]
    pub const fn default_file() -> Self {
        Self(0o644)
    }

    /// Default permissions for a new directory (0o755 = rwxr-xr-x, directory bit set).
    #[inline]
    pub const fn default_dir() -> Self {
        Self(MODE_DIR | 0o755)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::default_file()
    }
}

/// Flags for opening a file with [`FsOpen::open_file`](crate::FsOpen::open_file).
///
/// Each flag is an independent bit; callers compose them freely. The
/// contract-level combinations every backend must honor:
///
/// - `create_new` + `create` on an existing entry fails with
///   [`FsError::AlreadyExists`](crate::FsError::AlreadyExists)
/// - `truncate` discards existing content at open time
/// - `append` forces every sequential write to land at end-of-file,
///   regardless of the current seek position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenFlags {
    /// Open for reading.
    pub read: bool,
    /// Open for writing.
    pub write: bool,
    /// Every sequential write goes to end-of-file.
    pub append: bool,
    /// Create the file if it doesn't exist.
    pub create: bool,
    /// Truncate the file to zero length on open.
    pub truncate: bool,
    /// Fail if the file already exists (exclusive creation).
    pub create_new: bool,
}

impl OpenFlags {
    /// Read-only access.
    pub const READ: Self = Self {
        read: true,
        write: false,
        append: false,
        create: false,
        truncate: false,
        create_new: false,
    };

    /// Write access with create and truncate.
    pub const WRITE: Self = Self {
        read: false,
        write: true,
        append: false,
        create: true,
        truncate: true,
        create_new: false,
    };

    /// Read and write access to an existing file.
    pub const READ_WRITE: Self = Self {
        read: true,
        write: true,
        append: false,
        create: false,
        truncate: false,
        create_new: false,
    };

    /// Append mode - writes go to end of file, creating it if missing.
    pub const APPEND: Self = Self {
        read: false,
        write: true,
        append: true,
        create: true,
        truncate: false,
        create_new: false,
    };

    /// Exclusive creation - fails if the file already exists.
    pub const CREATE_NEW: Self = Self {
        read: false,
        write: true,
        append: false,
        create: true,
        truncate: false,
        create_new: true,
    };

    /// Returns `true` if the flags request any form of write access.
    #[inline]
    pub const fn writable(&self) -> bool {
        self.write || self.append
    }
}

/// Serde support for SystemTime (when serde feature is enabled).
#[cfg(feature = "serde")]
mod system_time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        (duration.as_secs(), duration.subsec_nanos()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (secs, nanos): (u64, u32) = Deserialize::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + Duration::new(secs, nanos))
    }
}
