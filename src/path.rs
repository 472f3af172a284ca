//! # Path Normalization
//!
//! The default canonicalization policy for backend namespaces.
//!
//! ## Policy
//!
//! Paths are slash-separated strings interpreted against a backend-defined
//! root. The contract invariant is: **two path spellings with the same
//! canonical form resolve to the same entry within one backend.** The
//! canonical form produced here is:
//!
//! - absolute (leading `/`; relative input is taken relative to the root)
//! - case-sensitive (no case folding)
//! - purely lexical: `.` and empty segments are dropped, `..` pops the
//!   previous segment and never escapes the root
//! - no trailing slash (except the root itself, which is `/`)
//!
//! Backends that cannot honor this policy (e.g. a case-insensitive OS
//! passthrough) must document their own canonicalization rule; the
//! invariant above still applies to whatever rule they pick.
//!
//! ## Example
//!
//! ```rust
//! use unifs_core::path::normalize;
//! use std::path::{Path, PathBuf};
//!
//! assert_eq!(normalize(Path::new("/a/./b//c/")), PathBuf::from("/a/b/c"));
//! assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("/b"));
//! ```

use std::path::{Component, Path, PathBuf};

/// Normalize a path to its canonical form under the default policy.
///
/// Lexical only: nothing is looked up in any backend, so the result is
/// identical for existing and non-existing paths.
pub fn normalize(path: &Path) -> PathBuf {
    let mut segments: Vec<&std::ffi::OsStr> = Vec::new();
    for component in path.components() {
        match component {
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            Component::ParentDir => {
                // Lexical "..": pops at most to the root
                segments.pop();
            }
            Component::Normal(name) => segments.push(name),
        }
    }

    let mut out = PathBuf::from("/");
    for segment in segments {
        out.push(segment);
    }
    out
}

/// Canonical parent of a path. The parent of the root is the root.
pub fn parent(path: &Path) -> PathBuf {
    let normalized = normalize(path);
    match normalized.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("/"),
    }
}

/// Final segment of a path (the entry name). The base of the root is `/`.
pub fn base(path: &Path) -> String {
    let normalized = normalize(path);
    normalized
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "/".to_string())
}
