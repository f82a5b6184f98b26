//! mdsummary: keep a generated table of contents section in sync with a docs folder.
//!
//! The root document (usually `README.md`) gets one section whose body is a bullet list of
//! links to every markdown document found under a docs folder. Running the tool again replaces
//! that body and leaves every other line of the document alone.
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod edit_plan;
pub mod error;
pub mod fs;
pub mod links;
pub mod pipeline;
pub mod scanner;
pub mod section;

pub use config::{Config, Options};
pub use error::{Error, Result};
pub use pipeline::{run, Outcome};
