//! Filesystem capability used by the scanner and the pipeline.
//!
//! The pipeline never touches `std::fs` directly: listing, status checks, reads and writes all
//! go through [`DocsFs`]. [`TokioFs`] is the real disk, [`MemoryFs`] is a deterministic tree used
//! for dry runs in tests and for exercising failure paths that are awkward to provoke on disk.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Asynchronous filesystem primitives needed to summarise a docs folder.
///
/// Implementations are cheap to clone: every spawned traversal task holds its own handle.
pub trait DocsFs: Clone + Send + Sync + 'static {
    /// Direct entries of `dir`, as full paths, in the order the backend lists them.
    fn read_dir(&self, dir: &Path) -> impl Future<Output = io::Result<Vec<PathBuf>>> + Send;

    /// Whether `path` is a directory, following symlinks.
    fn is_dir(&self, path: &Path) -> impl Future<Output = io::Result<bool>> + Send;

    /// Whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send;

    /// Replace the file at `path` with `contents`.
    fn write(&self, path: &Path, contents: String) -> impl Future<Output = io::Result<()>> + Send;
}

/// The real filesystem, through tokio's blocking-pool file operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioFs;

impl DocsFs for TokioFs {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            paths.push(entry.path());
        }
        Ok(paths)
    }

    async fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(tokio::fs::metadata(path).await?.is_dir())
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    /// Writes through a sibling temp file renamed over the target, keeping its permissions.
    async fn write(&self, path: &Path, contents: String) -> io::Result<()> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || persist_atomically(&path, &contents))
            .await
            .map_err(io::Error::other)?
    }
}

fn persist_atomically(path: &Path, contents: &str) -> io::Result<()> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(parent_dir)?;
    if let Ok(metadata) = std::fs::metadata(path) {
        temp_file.as_file().set_permissions(metadata.permissions())?;
    }
    temp_file.write_all(contents.as_bytes())?;
    temp_file.flush()?;

    // Same directory, so the rename is atomic
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[derive(Default, Debug)]
struct MemoryTree {
    /// Children of each known directory, in insertion order.
    dirs: BTreeMap<PathBuf, Vec<PathBuf>>,
    files: HashMap<PathBuf, String>,
    unreadable: BTreeSet<PathBuf>,
    read_only: bool,
}

impl MemoryTree {
    fn ensure_dir(&mut self, dir: &Path) {
        if self.dirs.contains_key(dir) {
            return;
        }
        self.dirs.insert(dir.to_path_buf(), Vec::new());
        if let Some(parent) = dir.parent() {
            self.ensure_dir(parent);
            self.link(parent, dir);
        }
    }

    fn link(&mut self, parent: &Path, child: &Path) {
        let children = self.dirs.entry(parent.to_path_buf()).or_default();
        if !children.iter().any(|c| c == child) {
            children.push(child.to_path_buf());
        }
    }
}

/// In-memory tree with deterministic listing order (insertion order).
///
/// Paths are used verbatim as keys, so callers should stick to absolute, normalised paths.
#[derive(Clone, Debug, Default)]
pub struct MemoryFs {
    tree: Arc<Mutex<MemoryTree>>,
}

impl MemoryFs {
    #[must_use]
    /// Empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn tree(&self) -> MutexGuard<'_, MemoryTree> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a directory and all of its ancestors.
    pub fn add_dir(&self, dir: impl AsRef<Path>) {
        self.tree().ensure_dir(dir.as_ref());
    }

    /// Create (or overwrite) a file, creating its ancestors.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<String>) {
        let path = path.as_ref();
        let mut tree = self.tree();
        if let Some(parent) = path.parent() {
            tree.ensure_dir(parent);
            tree.link(parent, path);
        }
        tree.files.insert(path.to_path_buf(), contents.into());
    }

    /// Make listing `dir` fail with `PermissionDenied`.
    pub fn deny_listing(&self, dir: impl AsRef<Path>) {
        self.tree().unreadable.insert(dir.as_ref().to_path_buf());
    }

    /// Make every subsequent write fail with `PermissionDenied`.
    pub fn set_read_only(&self, read_only: bool) {
        self.tree().read_only = read_only;
    }

    #[must_use]
    /// Current contents of a file, if it exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.tree().files.get(path.as_ref()).cloned()
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} does not exist", path.display()),
    )
}

fn denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("{} is not accessible", path.display()),
    )
}

impl DocsFs for MemoryFs {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let tree = self.tree();
        if tree.unreadable.contains(dir) {
            return Err(denied(dir));
        }
        tree.dirs.get(dir).cloned().ok_or_else(|| not_found(dir))
    }

    async fn is_dir(&self, path: &Path) -> io::Result<bool> {
        let tree = self.tree();
        if tree.dirs.contains_key(path) {
            Ok(true)
        } else if tree.files.contains_key(path) {
            Ok(false)
        } else {
            Err(not_found(path))
        }
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.tree()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    async fn write(&self, path: &Path, contents: String) -> io::Result<()> {
        let mut tree = self.tree();
        if tree.read_only {
            return Err(denied(path));
        }
        if let Some(parent) = path.parent() {
            if !tree.dirs.contains_key(parent) {
                return Err(not_found(parent));
            }
            tree.link(parent, path);
        }
        tree.files.insert(path.to_path_buf(), contents);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/fs.rs"]
mod tests;
