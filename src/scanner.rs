//! Recursive discovery of the documents to list.
//!
//! Every entry of a folder is inspected in its own task; the folder completes once all of
//! them have reported, concatenating their results in listing order. Nested folders repeat
//! the same fan-out, so a whole subtree resolves as one joined batch per level.

use crate::error::{Error, Result};
use crate::fs::DocsFs;
use std::ffi::OsStr;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};

/// Which entries the scanner keeps and which folders it never enters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanRules {
    /// Accepted file extensions, with or without the leading dot.
    pub extensions: Vec<String>,
    /// Folder base names that are never descended into.
    pub exclude_folders: Vec<String>,
    /// Base name of the root document, never listed as a document itself.
    pub root_file: String,
}

impl Default for ScanRules {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
            exclude_folders: ["node_modules", "dist", ".git"]
                .into_iter()
                .map(String::from)
                .collect(),
            root_file: "README.md".to_string(),
        }
    }
}

impl ScanRules {
    #[must_use]
    /// Whether a folder at `dir` must be skipped entirely.
    pub fn is_excluded(&self, dir: &Path) -> bool {
        dir.file_name()
            .and_then(OsStr::to_str)
            .is_some_and(|name| self.exclude_folders.iter().any(|e| e == name))
    }

    #[must_use]
    /// Whether a file at `path` is a document to list.
    pub fn is_document(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(OsStr::to_str) else {
            return false;
        };
        if name == self.root_file {
            return false;
        }
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.') == ext)
            })
    }
}

type ScanFuture = Pin<Box<dyn Future<Output = Result<Vec<PathBuf>>> + Send>>;

/// List every document under `folder`, recursing into non-excluded subfolders.
///
/// Must run inside a tokio runtime: entries are dispatched with [`tokio::spawn`].
///
/// # Errors
///
/// Returns [`Error::Traversal`] if any folder in the subtree cannot be listed or an entry's
/// status check fails for a reason other than `NotFound` (those entries are skipped), and
/// [`Error::Join`] if a scan task is cancelled.
pub async fn scan<F: DocsFs>(fs: &F, folder: &Path, rules: &ScanRules) -> Result<Vec<PathBuf>> {
    scan_folder(fs.clone(), folder.to_path_buf(), Arc::new(rules.clone())).await
}

fn scan_folder<F: DocsFs>(fs: F, folder: PathBuf, rules: Arc<ScanRules>) -> ScanFuture {
    Box::pin(async move {
        let entries = fs
            .read_dir(&folder)
            .await
            .map_err(|source| Error::Traversal {
                path: folder.clone(),
                source,
            })?;

        debug!(folder = %folder.display(), entries = entries.len(), "scanning folder");

        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let handles: Vec<_> = entries
            .into_iter()
            .map(|entry| tokio::spawn(scan_entry(fs.clone(), entry, Arc::clone(&rules))))
            .collect();

        // Wait for every sibling before reporting, even after a failure
        let mut documents = Vec::new();
        let mut first_error = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(found)) => documents.extend(found),
                Ok(Err(e)) => {
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    first_error.get_or_insert(Error::Join(e));
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(documents),
        }
    })
}

async fn scan_entry<F: DocsFs>(fs: F, entry: PathBuf, rules: Arc<ScanRules>) -> Result<Vec<PathBuf>> {
    // A vanished entry (e.g. a dangling symlink) is not a folder read failure
    let is_dir = match fs.is_dir(&entry).await {
        Ok(is_dir) => is_dir,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(entry = %entry.display(), error = %e, "skipping entry that cannot be inspected");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(Error::Traversal {
                path: entry.clone(),
                source,
            })
        }
    };

    if is_dir {
        if rules.is_excluded(&entry) {
            debug!(folder = %entry.display(), "skipping excluded folder");
            return Ok(Vec::new());
        }
        return scan_folder(fs, entry, rules).await;
    }

    if rules.is_document(&entry) {
        Ok(vec![entry])
    } else {
        Ok(Vec::new())
    }
}

#[cfg(test)]
#[path = "tests/scanner.rs"]
mod tests;
