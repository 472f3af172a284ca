//! Basic usage of the UniFS contract traits.
//!
//! This example implements the smallest interesting backend — a read-only
//! bundle of static files — and drives it through generic caller code.
//! The same caller functions work unchanged against any other backend,
//! which is the point of the contract.
//!
//! Run with: `cargo run --example basic_usage`

use std::collections::{HashMap, HashSet};
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use unifs_core::path as vpath;
use unifs_core::*;

// =============================================================================
// Step 1: A minimal read-only backend
// =============================================================================

/// Read-only filesystem over a fixed set of static files.
///
/// Every mutation fails with `FsError::ReadOnly`; reads behave like any
/// other backend. Directories are inferred from the file paths.
struct BundleFs {
    files: HashMap<PathBuf, &'static [u8]>,
    dirs: HashSet<PathBuf>,
}

impl BundleFs {
    fn new(bundle: &[(&str, &'static [u8])]) -> Self {
        let mut files = HashMap::new();
        let mut dirs = HashSet::new();
        dirs.insert(PathBuf::from("/"));
        for (path, content) in bundle {
            let key = vpath::normalize(Path::new(path));
            // Every ancestor becomes a directory
            let mut dir = vpath::parent(&key);
            while dir != Path::new("/") {
                dirs.insert(dir.clone());
                dir = vpath::parent(&dir);
            }
            files.insert(key, *content);
        }
        Self { files, dirs }
    }

    fn metadata_of(&self, key: &Path) -> Option<Metadata> {
        if self.dirs.contains(key) {
            Some(Metadata {
                name: vpath::base(key),
                file_type: FileType::Directory,
                permissions: Permissions::from_mode(MODE_DIR | 0o555),
                ..Default::default()
            })
        } else {
            self.files.get(key).map(|content| Metadata {
                name: vpath::base(key),
                file_type: FileType::File,
                size: content.len() as u64,
                permissions: Permissions::from_mode(0o444),
                ..Default::default()
            })
        }
    }

    /// Sorted direct children of a directory key.
    fn children_of(&self, key: &Path) -> Vec<Metadata> {
        let mut listing: Vec<Metadata> = self
            .files
            .keys()
            .chain(self.dirs.iter())
            .filter(|k| k.as_path() != Path::new("/") && vpath::parent(k) == key)
            .filter_map(|k| self.metadata_of(k))
            .collect();
        listing.sort_by(|a, b| a.name.cmp(&b.name));
        listing
    }
}

// =============================================================================
// Step 2: The handle type
// =============================================================================

struct BundleFile {
    name: PathBuf,
    /// `None` for directory handles.
    data: Option<&'static [u8]>,
    meta: Metadata,
    listing: Vec<Metadata>,
    pos: u64,
    dir_pos: usize,
    closed: bool,
}

impl BundleFile {
    fn check_open(&self) -> Result<(), FsError> {
        if self.closed {
            Err(FsError::Closed {
                path: self.name.clone(),
            })
        } else {
            Ok(())
        }
    }

    fn content(&self) -> Result<&'static [u8], FsError> {
        self.data.ok_or_else(|| FsError::NotAFile {
            path: self.name.clone(),
        })
    }

    fn deny_write(&self, operation: &'static str) -> FsError {
        FsError::PermissionDenied {
            path: self.name.clone(),
            operation,
        }
    }
}

impl VfsFile for BundleFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        self.check_open()?;
        let data = self.content()?;
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
        let data = self.content()?;
        let offset = offset as usize;
        if offset >= data.len() {
            return Ok(0);
        }
        let n = buf.len().min(data.len() - offset);
        buf[..n].copy_from_slice(&data[offset..offset + n]);
        Ok(n)
    }

    fn write(&mut self, _data: &[u8]) -> Result<usize, FsError> {
        self.check_open()?;
        Err(self.deny_write("write"))
    }

    fn write_at(&mut self, _data: &[u8], _offset: u64) -> Result<usize, FsError> {
        self.check_open()?;
        Err(self.deny_write("write_at"))
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError> {
        self.check_open()?;
        let len = self.data.map(|d| d.len()).unwrap_or(0) as i64;
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
        &self.name
    }

    fn read_dir(&mut self, count: isize) -> Result<Vec<Metadata>, FsError> {
        self.check_open()?;
        if self.data.is_some() {
            return Err(FsError::NotADirectory {
                path: self.name.clone(),
            });
        }
        let remaining = self.listing.len().saturating_sub(self.dir_pos);
        let take = if count > 0 {
            remaining.min(count as usize)
        } else {
            remaining
        };
        let chunk = self.listing[self.dir_pos..self.dir_pos + take].to_vec();
        self.dir_pos += take;
        Ok(chunk)
    }

    fn read_dir_names(&mut self, n: isize) -> Result<Vec<String>, FsError> {
        let entries = self.read_dir(n)?;
        Ok(entries.into_iter().map(|m| m.name).collect())
    }

    fn stat(&self) -> Result<Metadata, FsError> {
        self.check_open()?;
        Ok(self.meta.clone())
    }

    fn sync(&mut self) -> Result<(), FsError> {
        // Nothing buffered, nothing to flush
        self.check_open()
    }

    fn truncate(&mut self, _size: u64) -> Result<(), FsError> {
        self.check_open()?;
        Err(self.deny_write("truncate"))
    }
}

// =============================================================================
// Step 3: The filesystem capability
// =============================================================================

impl FsOpen for BundleFs {
    fn create(&self, _path: &Path) -> Result<FileHandle, FsError> {
        Err(FsError::ReadOnly {
            operation: "create",
        })
    }

    fn open(&self, path: &Path) -> Result<FileHandle, FsError> {
        let key = vpath::normalize(path);
        let meta = self
            .metadata_of(&key)
            .ok_or_else(|| FsError::NotFound { path: key.clone() })?;
        let (data, listing) = if meta.is_dir() {
            (None, self.children_of(&key))
        } else {
            (Some(self.files[&key]), Vec::new())
        };
        Ok(Box::new(BundleFile {
            name: path.to_path_buf(),
            data,
            meta,
            listing,
            pos: 0,
            dir_pos: 0,
            closed: false,
        }))
    }

    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        _perm: Permissions,
    ) -> Result<FileHandle, FsError> {
        if flags.writable() || flags.create || flags.create_new || flags.truncate {
            return Err(FsError::ReadOnly {
                operation: "open_file",
            });
        }
        self.open(path)
    }
}

impl FsNamespace for BundleFs {
    fn create_dir(&self, _path: &Path, _perm: Permissions) -> Result<(), FsError> {
        Err(FsError::ReadOnly {
            operation: "create_dir",
        })
    }

    fn create_dir_all(&self, _path: &Path, _perm: Permissions) -> Result<(), FsError> {
        Err(FsError::ReadOnly {
            operation: "create_dir_all",
        })
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        let key = vpath::normalize(path);
        if self.metadata_of(&key).is_none() {
            return Err(FsError::NotFound { path: key });
        }
        Err(FsError::ReadOnly { operation: "remove" })
    }

    fn remove_all(&self, path: &Path) -> Result<(), FsError> {
        let key = vpath::normalize(path);
        // Still an idempotent no-op on a missing path
        if self.metadata_of(&key).is_none() {
            return Ok(());
        }
        Err(FsError::ReadOnly {
            operation: "remove_all",
        })
    }

    fn rename(&self, _old: &Path, _new: &Path) -> Result<(), FsError> {
        Err(FsError::ReadOnly { operation: "rename" })
    }
}

impl FsAttr for BundleFs {
    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        let key = vpath::normalize(path);
        self.metadata_of(&key)
            .ok_or(FsError::NotFound { path: key })
    }

    fn chmod(&self, _path: &Path, _perm: Permissions) -> Result<(), FsError> {
        Err(FsError::ReadOnly { operation: "chmod" })
    }

    fn chtimes(&self, _path: &Path, _atime: SystemTime, _mtime: SystemTime) -> Result<(), FsError> {
        Err(FsError::ReadOnly {
            operation: "chtimes",
        })
    }
}

impl FsName for BundleFs {
    fn name(&self) -> &'static str {
        "BundleFs"
    }
}

// =============================================================================
// Step 4: Generic caller code — works against ANY backend
// =============================================================================

/// Print a directory tree. Knows nothing about the backend underneath.
fn print_tree<B: Vfs>(fs: &B, dir: &Path, indent: usize) -> Result<(), FsError> {
    for entry in fs.list_dir(dir)? {
        println!("{:indent$}{}", "", entry.name, indent = indent);
        if entry.is_dir() {
            print_tree(fs, &dir.join(&entry.name), indent + 2)?;
        }
    }
    Ok(())
}

/// Try to write somewhere, reporting how the backend refused.
fn try_mutation<B: Vfs>(fs: &B) {
    match fs.create(Path::new("/scratch.txt")) {
        Ok(mut file) => {
            let _ = file.close();
            println!("{}: mutation accepted", fs.name());
        }
        Err(FsError::ReadOnly { operation }) => {
            println!("{}: read-only, refused {operation}", fs.name())
        }
        Err(e) => println!("{}: refused with {e}", fs.name()),
    }
}

fn main() -> Result<(), FsError> {
    let fs = BundleFs::new(&[
        ("/README.md", b"# bundled assets\n".as_slice()),
        ("/assets/logo.svg", b"<svg/>".as_slice()),
        ("/assets/style.css", b"body {}".as_slice()),
    ]);

    println!("backend: {}", fs.name());
    print_tree(&fs, Path::new("/"), 0)?;

    // Reading works like on any backend
    let readme = fs.read_to_string(Path::new("/README.md"))?;
    print!("{readme}");

    // Positioned reads too
    let mut file = fs.open(Path::new("/assets/style.css"))?;
    let mut buf = [0u8; 4];
    let n = file.read_at(&mut buf, 0)?;
    println!("first {n} bytes: {:?}", &buf[..n]);
    file.close()?;

    // Mutations are refused with the read-only condition
    try_mutation(&fs);

    // The remove/remove_all asymmetry holds even here
    assert!(matches!(
        fs.remove(Path::new("/missing")),
        Err(FsError::NotFound { .. })
    ));
    fs.remove_all(Path::new("/missing"))?;
    println!("remove_all on a missing path stayed a no-op");

    Ok(())
}
