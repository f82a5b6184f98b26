//! One summary run, from reading the root document to writing it back.
//!
//! The run walks through [`Stage::Init`], [`Stage::RootLoaded`], [`Stage::DocsScanned`] and
//! [`Stage::Written`]; any failure stops it where it is and is returned as an [`Error`], so
//! nothing is written once a fatal condition has been detected.

use crate::config::Options;
use crate::edit_plan::{join_lines, split_lines, Edit};
use crate::error::{Error, Result};
use crate::fs::DocsFs;
use crate::links;
use crate::scanner;
use crate::section::{self, HeadingMatcher};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Progress of a run.
pub enum Stage {
    /// Nothing read yet.
    Init,
    /// The root document has been read.
    RootLoaded,
    /// The docs folder has been scanned and holds at least one document.
    DocsScanned,
    /// The new document has been persisted (or computed, for a dry run).
    Written,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::RootLoaded => "root-loaded",
            Self::DocsScanned => "docs-scanned",
            Self::Written => "written",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
/// What a successful run did.
pub struct Outcome {
    /// Root document that was (or would have been) rewritten.
    pub root_file: PathBuf,
    /// Documents listed in the section.
    pub documents: usize,
    /// The edit applied to the root document.
    pub edit: Edit,
    /// Full text of the updated root document.
    pub content: String,
    /// Whether the content differs from what was on disk.
    pub changed: bool,
    /// Whether the file was actually written.
    pub written: bool,
}

/// Update the managed section of the root document described by `options`.
///
/// # Errors
///
/// Returns [`Error::RootFileMissing`] if the root document is unreadable or empty,
/// [`Error::Traversal`] if the docs folder cannot be walked, [`Error::NoDocuments`] if it holds
/// no document, and [`Error::Write`] if the result cannot be persisted.
pub async fn run<F: DocsFs>(fs: &F, options: &Options) -> Result<Outcome> {
    let mut stage = Stage::Init;
    let result = advance(fs, options, &mut stage).await;
    if let Err(e) = &result {
        debug!(%stage, error = %e, "run failed");
    }
    result
}

async fn advance<F: DocsFs>(fs: &F, options: &Options, stage: &mut Stage) -> Result<Outcome> {
    let base_folder = resolve_folder(&options.base_folder);
    let docs_folder = normalize(&base_folder.join(&options.docs_folder));
    let root_file = base_folder.join(&options.rules.root_file);
    let matcher = HeadingMatcher::new(&options.section, options.heading_level)?;

    let content = fs.read_to_string(&root_file).await.unwrap_or_default();
    if content.is_empty() {
        return Err(Error::RootFileMissing {
            file_name: options.rules.root_file.clone(),
            path: root_file,
        });
    }
    transition(stage, Stage::RootLoaded);

    let documents = scanner::scan(fs, &docs_folder, &options.rules).await?;
    if documents.is_empty() {
        return Err(Error::NoDocuments(docs_folder));
    }
    debug!(count = documents.len(), folder = %docs_folder.display(), "found documents");
    transition(stage, Stage::DocsScanned);

    let entries = links::build(&documents, &base_folder, options.style);
    let mut lines = split_lines(&content);
    let bounds = section::locate(&lines, &matcher);
    for duplicate in &bounds.duplicates {
        warn!(
            section = matcher.name(),
            line = duplicate + 1,
            "duplicate section heading left untouched"
        );
    }

    let edit = Edit::for_section(&root_file, &lines, &bounds, &matcher, &entries);
    edit.apply(&mut lines);
    let updated = join_lines(&lines);
    let changed = updated != content;

    let written = changed && !options.dry_run;
    if written {
        fs.write(&root_file, updated.clone())
            .await
            .map_err(|source| Error::Write {
                path: root_file.clone(),
                source,
            })?;
        info!(file = %root_file.display(), documents = documents.len(), "updated section");
    } else {
        debug!(file = %root_file.display(), changed, "nothing written");
    }
    transition(stage, Stage::Written);

    Ok(Outcome {
        root_file,
        documents: documents.len(),
        edit,
        content: updated,
        changed,
        written,
    })
}

fn transition(stage: &mut Stage, next: Stage) {
    debug!(from = %stage, to = %next, "stage");
    *stage = next;
}

/// Absolute, lexically normalised form of `folder`.
fn resolve_folder(folder: &Path) -> PathBuf {
    if folder.is_absolute() {
        return normalize(folder);
    }
    std::env::current_dir().map_or_else(|_| normalize(folder), |cwd| normalize(&cwd.join(folder)))
}

/// Drop `.` components and fold `..` into its parent without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                match normalized.components().next_back() {
                    Some(Component::Normal(_)) => {
                        normalized.pop();
                    }
                    Some(Component::RootDir | Component::Prefix(_)) => {}
                    _ => normalized.push(component),
                }
            }
            _ => normalized.push(component),
        }
    }
    normalized
}

#[cfg(test)]
#[path = "tests/pipeline.rs"]
mod tests;
