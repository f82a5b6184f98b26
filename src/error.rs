//! Failure modes of a summary run.
//!
//! Every stage of the pipeline reports through this one type, so the binary has a single place
//! where a failure becomes a stderr line and an exit status.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a run before (or while) the root document is rewritten.
#[derive(Debug, Error)]
pub enum Error {
    /// No section name was supplied.
    #[error("-s, --docsSection required")]
    MissingSection,

    /// The heading level was not an integer in `1..=6`; carries the value as given.
    #[error("-l, --headingLevel is not set correctly, it must be an integer between 1 and 6")]
    InvalidHeadingLevel(String),

    /// The section name cannot be turned into a heading pattern.
    #[error("Section name cannot be matched: {0}")]
    SectionPattern(#[from] regex::Error),

    /// The root document could not be read, or was empty.
    #[error("No {file_name} file found to be updated")]
    RootFileMissing {
        /// Base name of the root document, e.g. `README.md`.
        file_name: String,
        /// Full path that was attempted.
        path: PathBuf,
    },

    /// Listing or inspecting some folder under the docs folder failed.
    #[error("Folder {} does not exist or could not be read: {source}", path.display())]
    Traversal {
        /// The entry whose listing or status check failed.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// Traversal succeeded but matched no document.
    #[error("No documents found in {}", .0.display())]
    NoDocuments(PathBuf),

    /// Persisting the updated root document failed.
    #[error("Could not write {}: {source}", path.display())]
    Write {
        /// Root document path.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// A traversal task panicked or was cancelled by the runtime.
    #[error("Folder scan task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
