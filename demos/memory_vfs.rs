//! Complete in-memory backend reference implementation.
//!
//! This example provides a full implementation of both UniFS capabilities.
//! Use it as a reference when implementing your own filesystem backend.
//!
//! Run with: `cargo run --example memory_vfs`
//!
//! This implementation is suitable as a starting point for:
//! - Testing and mocking
//! - Sandboxed scratch space
//! - Learning how each contract method should behave

use std::collections::HashMap;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use unifs_core::path as vpath;
use unifs_core::*;

// =============================================================================
// Backend State
// =============================================================================

/// One namespace entry.
///
/// File content sits behind its own lock, shared with every open handle:
/// a handle that outlives `remove`/`rename` keeps serving the content it
/// had — the stale-handle policy this backend documents.
#[derive(Clone)]
struct Entry {
    kind: FileType,
    content: Arc<RwLock<Vec<u8>>>,
    perm: Permissions,
    modified: SystemTime,
    accessed: SystemTime,
    inode: u64,
}

type Entries = Arc<RwLock<HashMap<PathBuf, Entry>>>;

/// A thread-safe in-memory filesystem.
///
/// ## Documented Backend Policies
///
/// - Canonicalization: the default lexical policy of [`unifs_core::path`]
///   (case-sensitive, `.`/`..` resolved lexically, trailing slashes ignored)
/// - Directory listing order: lexicographic by entry name
/// - Double close: reported as [`FsError::Closed`]
/// - Stale handles after remove/rename: keep serving the old content
///
/// ## Thread Safety
///
/// Interior mutability via `RwLock`; all capability methods take `&self`,
/// so the backend can be shared across threads with `Arc<MemoryVfs>`.
pub struct MemoryVfs {
    entries: Entries,
    next_inode: AtomicU64,
}

impl MemoryVfs {
    /// Create a new empty filesystem. The root directory `/` exists.
    pub fn new() -> Self {
        let fs = Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            next_inode: AtomicU64::new(1),
        };
        let root = fs.new_entry(FileType::Directory, Permissions::default_dir());
        fs.entries.write().unwrap().insert(PathBuf::from("/"), root);
        fs
    }

    fn new_entry(&self, kind: FileType, perm: Permissions) -> Entry {
        let now = SystemTime::now();
        Entry {
            kind,
            content: Arc::new(RwLock::new(Vec::new())),
            perm,
            modified: now,
            accessed: now,
            inode: self.next_inode.fetch_add(1, Ordering::SeqCst),
        }
    }

    fn metadata_of(key: &Path, entry: &Entry) -> Metadata {
        let size = match entry.kind {
            FileType::File => entry.content.read().unwrap().len() as u64,
            FileType::Directory => 0,
        };
        Metadata {
            name: vpath::base(key),
            file_type: entry.kind,
            size,
            permissions: entry.perm,
            modified: entry.modified,
            accessed: entry.accessed,
            inode: entry.inode,
        }
    }

    fn check_parent(entries: &HashMap<PathBuf, Entry>, key: &Path) -> Result<(), FsError> {
        let parent = vpath::parent(key);
        match entries.get(&parent) {
            Some(e) if e.kind == FileType::Directory => Ok(()),
            Some(_) => Err(FsError::NotADirectory { path: parent }),
            None => Err(FsError::NotFound { path: parent }),
        }
    }

    fn has_children(entries: &HashMap<PathBuf, Entry>, key: &Path) -> bool {
        entries
            .keys()
            .any(|k| k != Path::new("/") && vpath::parent(k) == key && k != key)
    }

    fn handle(&self, name: &Path, key: PathBuf, entry: &Entry, flags: OpenFlags) -> FileHandle {
        Box::new(MemoryFile {
            entries: Arc::clone(&self.entries),
            name: name.to_path_buf(),
            key,
            content: Arc::clone(&entry.content),
            dir: entry.kind == FileType::Directory,
            flags,
            pos: 0,
            closed: false,
            dir_snapshot: None,
            dir_pos: 0,
        })
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// File Handle
// =============================================================================

struct MemoryFile {
    entries: Entries,
    /// Path as passed by the caller; returned by `name()`.
    name: PathBuf,
    /// Canonical key for namespace lookups.
    key: PathBuf,
    content: Arc<RwLock<Vec<u8>>>,
    dir: bool,
    flags: OpenFlags,
    pos: u64,
    closed: bool,
    dir_snapshot: Option<Vec<Metadata>>,
    dir_pos: usize,
}

impl MemoryFile {
    fn check_open(&self) -> Result<(), FsError> {
        if self.closed {
            Err(FsError::Closed {
                path: self.name.clone(),
            })
        } else {
            Ok(())
        }
    }

    fn check_content_io(
        &self,
        want_write: bool,
        operation: &'static str,
    ) -> Result<(), FsError> {
        self.check_open()?;
        if self.dir {
            return Err(FsError::NotAFile {
                path: self.name.clone(),
            });
        }
        let allowed = if want_write {
            self.flags.writable()
        } else {
            self.flags.read
        };
        if !allowed {
            return Err(FsError::PermissionDenied {
                path: self.name.clone(),
                operation,
            });
        }
        Ok(())
    }

    fn read_at_offset(&self, buf: &mut [u8], offset: u64) -> usize {
        let data = self.content.read().unwrap();
        let offset = offset as usize;
        if offset >= data.len() {
            return 0;
        }
        let n = buf.len().min(data.len() - offset);
        buf[..n].copy_from_slice(&data[offset..offset + n]);
        n
    }

    fn write_at_offset(&self, data: &[u8], offset: u64) -> usize {
        let mut content = self.content.write().unwrap();
        let offset = offset as usize;
        let end = offset + data.len();
        if end > content.len() {
            content.resize(end, 0);
        }
        content[offset..end].copy_from_slice(data);
        data.len()
    }

    fn touch_mtime(&self) {
        if let Some(entry) = self.entries.write().unwrap().get_mut(&self.key) {
            entry.modified = SystemTime::now();
        }
    }

    fn take_chunk(&mut self, count: isize) -> Vec<Metadata> {
        if self.dir_snapshot.is_none() {
            let entries = self.entries.read().unwrap();
            let mut listing: Vec<Metadata> = entries
                .iter()
                .filter(|(k, _)| {
                    k.as_path() != Path::new("/")
                        && vpath::parent(k) == self.key
                        && k.as_path() != self.key
                })
                .map(|(k, e)| MemoryVfs::metadata_of(k, e))
                .collect();
            listing.sort_by(|a, b| a.name.cmp(&b.name));
            self.dir_snapshot = Some(listing);
        }
        let snapshot = self.dir_snapshot.as_ref().unwrap();
        let remaining = snapshot.len().saturating_sub(self.dir_pos);
        let take = if count > 0 {
            remaining.min(count as usize)
        } else {
            remaining
        };
        let chunk = snapshot[self.dir_pos..self.dir_pos + take].to_vec();
        self.dir_pos += take;
        chunk
    }
}

impl VfsFile for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, FsError> {
        self.check_content_io(false, "read")?;
        let n = self.read_at_offset(buf, self.pos);
        self.pos += n as u64;
        Ok(n)
    }

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<usize, FsError> {
        self.check_content_io(false, "read_at")?;
        Ok(self.read_at_offset(buf, offset))
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, FsError> {
        self.check_content_io(true, "write")?;
        if self.flags.append {
            self.pos = self.content.read().unwrap().len() as u64;
        }
        let n = self.write_at_offset(data, self.pos);
        self.pos += n as u64;
        self.touch_mtime();
        Ok(n)
    }

    fn write_at(&mut self, data: &[u8], offset: u64) -> Result<usize, FsError> {
        self.check_content_io(true, "write_at")?;
        let n = self.write_at_offset(data, offset);
        self.touch_mtime();
        Ok(n)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, FsError> {
        self.check_open()?;
        let target = match pos {
            SeekFrom::Start(n) => n as i64,
            SeekFrom::Current(d) => self.pos as i64 + d,
            SeekFrom::End(d) => self.content.read().unwrap().len() as i64 + d,
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
        if !self.dir {
            return Err(FsError::NotADirectory {
                path: self.name.clone(),
            });
        }
        Ok(self.take_chunk(count))
    }

    fn read_dir_names(&mut self, n: isize) -> Result<Vec<String>, FsError> {
        let entries = self.read_dir(n)?;
        Ok(entries.into_iter().map(|m| m.name).collect())
    }

    fn stat(&self) -> Result<Metadata, FsError> {
        self.check_open()?;
        let entries = self.entries.read().unwrap();
        let entry = entries.get(&self.key).ok_or_else(|| FsError::NotFound {
            path: self.name.clone(),
        })?;
        Ok(MemoryVfs::metadata_of(&self.key, entry))
    }

    fn sync(&mut self) -> Result<(), FsError> {
        // No write buffering in this backend
        self.check_open()
    }

    fn truncate(&mut self, size: u64) -> Result<(), FsError> {
        self.check_content_io(true, "truncate")?;
        self.content.write().unwrap().resize(size as usize, 0);
        self.touch_mtime();
        Ok(())
    }
}

// =============================================================================
// Filesystem Capability
// =============================================================================

impl FsOpen for MemoryVfs {
    fn create(&self, path: &Path) -> Result<FileHandle, FsError> {
        let key = vpath::normalize(path);
        let mut entries = self.entries.write().unwrap();
        if let Some(existing) = entries.get(&key) {
            if existing.kind == FileType::Directory {
                return Err(FsError::NotAFile { path: key });
            }
            existing.content.write().unwrap().clear();
            let entry = existing.clone();
            drop(entries);
            return Ok(self.handle(path, key, &entry, OpenFlags::READ_WRITE));
        }
        Self::check_parent(&entries, &key)?;
        let entry = self.new_entry(FileType::File, Permissions::default_file());
        entries.insert(key.clone(), entry.clone());
        drop(entries);
        Ok(self.handle(path, key, &entry, OpenFlags::READ_WRITE))
    }

    fn open(&self, path: &Path) -> Result<FileHandle, FsError> {
        let key = vpath::normalize(path);
        let entries = self.entries.read().unwrap();
        let entry = entries
            .get(&key)
            .ok_or_else(|| FsError::NotFound { path: key.clone() })?
            .clone();
        drop(entries);
        Ok(self.handle(path, key, &entry, OpenFlags::READ))
    }

    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        perm: Permissions,
    ) -> Result<FileHandle, FsError> {
        let key = vpath::normalize(path);
        let mut entries = self.entries.write().unwrap();
        let entry = match entries.get(&key) {
            Some(_) if flags.create_new => {
                return Err(FsError::AlreadyExists {
                    path: key,
                    operation: "open_file",
                });
            }
            Some(existing) if existing.kind == FileType::Directory => {
                if flags.writable() {
                    return Err(FsError::NotAFile { path: key });
                }
                existing.clone()
            }
            Some(existing) => {
                if flags.truncate && flags.writable() {
                    existing.content.write().unwrap().clear();
                }
                existing.clone()
            }
            None => {
                if !flags.create {
                    return Err(FsError::NotFound { path: key });
                }
                Self::check_parent(&entries, &key)?;
                let entry = self.new_entry(FileType::File, perm);
                entries.insert(key.clone(), entry.clone());
                entry
            }
        };
        drop(entries);
        Ok(self.handle(path, key, &entry, flags))
    }
}

impl FsNamespace for MemoryVfs {
    fn create_dir(&self, path: &Path, perm: Permissions) -> Result<(), FsError> {
        let key = vpath::normalize(path);
        let mut entries = self.entries.write().unwrap();
        if entries.contains_key(&key) {
            return Err(FsError::AlreadyExists {
                path: key,
                operation: "create_dir",
            });
        }
        Self::check_parent(&entries, &key)?;
        let perm = Permissions::from_mode(perm.mode() | MODE_DIR);
        let entry = self.new_entry(FileType::Directory, perm);
        entries.insert(key, entry);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path, perm: Permissions) -> Result<(), FsError> {
        let key = vpath::normalize(path);
        let mut entries = self.entries.write().unwrap();
        let mut prefix = PathBuf::from("/");
        for component in key.components().skip(1) {
            prefix.push(component);
            match entries.get(&prefix) {
                Some(e) if e.kind == FileType::Directory => {}
                Some(_) => {
                    return Err(FsError::NotADirectory {
                        path: prefix.clone(),
                    });
                }
                None => {
                    let perm = Permissions::from_mode(perm.mode() | MODE_DIR);
                    let entry = self.new_entry(FileType::Directory, perm);
                    entries.insert(prefix.clone(), entry);
                }
            }
        }
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        let key = vpath::normalize(path);
        let mut entries = self.entries.write().unwrap();
        let entry = entries
            .get(&key)
            .ok_or_else(|| FsError::NotFound { path: key.clone() })?;
        if entry.kind == FileType::Directory && Self::has_children(&entries, &key) {
            return Err(FsError::DirectoryNotEmpty { path: key });
        }
        entries.remove(&key);
        Ok(())
    }

    fn remove_all(&self, path: &Path) -> Result<(), FsError> {
        let key = vpath::normalize(path);
        let mut entries = self.entries.write().unwrap();
        // Idempotent: missing path is a no-op; the root always survives
        entries.retain(|k, _| k.as_path() == Path::new("/") || !k.starts_with(&key));
        Ok(())
    }

    fn rename(&self, old: &Path, new: &Path) -> Result<(), FsError> {
        let old_key = vpath::normalize(old);
        let new_key = vpath::normalize(new);
        if old_key == new_key {
            return Ok(());
        }
        let mut entries = self.entries.write().unwrap();
        let source = entries
            .get(&old_key)
            .ok_or_else(|| FsError::NotFound {
                path: old_key.clone(),
            })?
            .clone();
        match entries.get(&new_key) {
            // Replacing a directory is never a merge
            Some(e) if e.kind == FileType::Directory => {
                return Err(FsError::DestinationExists { path: new_key });
            }
            Some(_) if source.kind == FileType::Directory => {
                return Err(FsError::DestinationExists { path: new_key });
            }
            _ => {}
        }
        Self::check_parent(&entries, &new_key)?;
        if source.kind == FileType::Directory {
            let descendants: Vec<PathBuf> = entries
                .keys()
                .filter(|k| k.starts_with(&old_key) && k.as_path() != old_key)
                .cloned()
                .collect();
            for k in descendants {
                let suffix = k.strip_prefix(&old_key).expect("descendant of old_key");
                let moved = entries.remove(&k).expect("key just listed");
                entries.insert(new_key.join(suffix), moved);
            }
        }
        let entry = entries.remove(&old_key).expect("source exists");
        entries.insert(new_key, entry);
        Ok(())
    }
}

impl FsAttr for MemoryVfs {
    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        let key = vpath::normalize(path);
        let entries = self.entries.read().unwrap();
        let entry = entries
            .get(&key)
            .ok_or_else(|| FsError::NotFound { path: key.clone() })?;
        Ok(Self::metadata_of(&key, entry))
    }

    fn chmod(&self, path: &Path, perm: Permissions) -> Result<(), FsError> {
        let key = vpath::normalize(path);
        let mut entries = self.entries.write().unwrap();
        let entry = entries
            .get_mut(&key)
            .ok_or_else(|| FsError::NotFound { path: key.clone() })?;
        entry.perm = match entry.kind {
            FileType::Directory => Permissions::from_mode(perm.mode() | MODE_DIR),
            FileType::File => Permissions::from_mode(perm.mode() & 0o7777),
        };
        Ok(())
    }

    fn chtimes(&self, path: &Path, atime: SystemTime, mtime: SystemTime) -> Result<(), FsError> {
        let key = vpath::normalize(path);
        let mut entries = self.entries.write().unwrap();
        let entry = entries
            .get_mut(&key)
            .ok_or_else(|| FsError::NotFound { path: key.clone() })?;
        entry.accessed = atime;
        entry.modified = mtime;
        Ok(())
    }
}

impl FsName for MemoryVfs {
    fn name(&self) -> &'static str {
        "MemoryVfs"
    }
}

// =============================================================================
// Demo
// =============================================================================

fn main() -> Result<(), FsError> {
    let fs = MemoryVfs::new();
    println!("backend: {}", FsName::name(&fs));

    // Build a small tree
    fs.create_dir_all(Path::new("/projects/unifs"), Permissions::default_dir())?;
    let mut file = fs.create(Path::new("/projects/unifs/notes.txt"))?;
    file.write_string("hello from the contract\n")?;
    file.close()?;

    // Read it back
    let text = fs.read_to_string(Path::new("/projects/unifs/notes.txt"))?;
    print!("notes.txt: {text}");

    // Sentinel errors are backend-independent
    match fs.open(Path::new("/projects/unifs/missing.txt")) {
        Err(FsError::NotFound { path }) => println!("as expected, not found: {}", path.display()),
        Ok(_) => println!("unexpected: open unexpectedly succeeded"),
        Err(other) => println!("unexpected: {other:?}"),
    }

    // Rename replaces files atomically from the caller's perspective
    fs.write(Path::new("/projects/unifs/draft.txt"), b"v2 content")?;
    fs.rename(
        Path::new("/projects/unifs/draft.txt"),
        Path::new("/projects/unifs/notes.txt"),
    )?;
    println!(
        "after rename: {}",
        fs.read_to_string(Path::new("/projects/unifs/notes.txt"))?
    );

    // Paged directory enumeration
    for i in 0..5 {
        fs.write(
            Path::new(&format!("/projects/unifs/{i}.log")),
            format!("log {i}\n").as_bytes(),
        )?;
    }
    let mut dir = fs.open(Path::new("/projects/unifs"))?;
    loop {
        let page = dir.read_dir_names(3)?;
        if page.is_empty() {
            break;
        }
        println!("page: {page:?}");
    }
    dir.close()?;

    Ok(())
}
