//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find an mdsummary.toml (in the base folder, then the working
//! directory), and if present we load settings from there. This provides the document
//! extensions, excluded folders, root file name and title style. Command line flags are merged
//! on top into a validated [`Options`] value that stays read-only for the whole run.

use crate::error::{Error, Result};
use crate::links::LinkStyle;
use crate::scanner::ScanRules;
use facet::Facet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the preferences file.
pub const CONFIG_FILE: &str = "mdsummary.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from mdsummary.toml or falling back to defaults.
pub struct Config {
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = vec!["node_modules".to_string(), "dist".to_string(), ".git".to_string()])]
    /// Folder names never descended into.
    pub exclude_folders: Vec<String>,
    #[facet(default = "README.md".to_string())]
    /// Root document holding the managed section.
    pub root_file: String,
    #[facet(default = false)]
    /// Decorate link titles with their parent folder.
    pub folder_in_title: bool,
}

impl Default for Config {
    fn default() -> Self {
        let rules = ScanRules::default();
        Self {
            file_extensions: rules.extensions,
            exclude_folders: rules.exclude_folders,
            root_file: rules.root_file,
            folder_in_title: false,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from mdsummary.toml in `base_folder` or the working directory.
    ///
    /// A missing or malformed file yields the defaults.
    pub fn load(base_folder: &Path) -> Self {
        [base_folder.join(CONFIG_FILE), PathBuf::from(CONFIG_FILE)]
            .iter()
            .find_map(|path| Self::from_file(path))
            .unwrap_or_default()
    }

    fn from_file(path: &Path) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        facet_toml::from_str::<Self>(&contents).ok()
    }

    #[must_use]
    /// Scanner rules described by this configuration.
    pub fn scan_rules(&self) -> ScanRules {
        ScanRules {
            extensions: self.file_extensions.clone(),
            exclude_folders: self.exclude_folders.clone(),
            root_file: self.root_file.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Validated inputs of one run.
pub struct Options {
    /// Folder containing the root document.
    pub base_folder: PathBuf,
    /// Folder to scan, relative to `base_folder` unless absolute.
    pub docs_folder: PathBuf,
    /// Heading text of the managed section.
    pub section: String,
    /// Restrict matching (and the synthesized heading) to this level.
    pub heading_level: Option<u8>,
    /// What the scanner keeps.
    pub rules: ScanRules,
    /// How link titles are rendered.
    pub style: LinkStyle,
    /// Compute the new document without writing it.
    pub dry_run: bool,
}

impl Options {
    /// Validate raw inputs against `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSection`] when no non-blank section name is given, and
    /// [`Error::InvalidHeadingLevel`] when the level is not an integer in `1..=6`.
    pub fn new(
        base_folder: impl Into<PathBuf>,
        docs_folder: impl Into<PathBuf>,
        section: Option<String>,
        heading_level: Option<String>,
        config: &Config,
    ) -> Result<Self> {
        let section = section
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingSection)?;

        let heading_level = heading_level
            .map(|level| match level.trim().parse::<u8>() {
                Ok(n @ 1..=6) => Ok(n),
                _ => Err(Error::InvalidHeadingLevel(level)),
            })
            .transpose()?;

        Ok(Self {
            base_folder: base_folder.into(),
            docs_folder: docs_folder.into(),
            section,
            heading_level,
            rules: config.scan_rules(),
            style: LinkStyle {
                folder_in_title: config.folder_in_title,
            },
            dry_run: false,
        })
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
