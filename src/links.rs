//! Rendering discovered documents as a markdown bullet list.

use std::ffi::OsStr;
use std::path::{Component, Path};

/// Escape used for spaces in link targets.
pub const SPACE_ESCAPE: &str = "&#32;";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// How link titles are derived from document paths.
pub struct LinkStyle {
    /// Append the immediate parent folder to the title, e.g. `intro (guides)`.
    pub folder_in_title: bool,
}

/// One `* [Title](relative/path)` line per document, in input order.
#[must_use]
pub fn build<P: AsRef<Path>>(paths: &[P], base_folder: &Path, style: LinkStyle) -> Vec<String> {
    paths
        .iter()
        .map(|path| entry(path.as_ref(), base_folder, style))
        .collect()
}

/// Render a single document as a link entry relative to `base_folder`.
#[must_use]
pub fn entry(path: &Path, base_folder: &Path, style: LinkStyle) -> String {
    let relative = path.strip_prefix(base_folder).unwrap_or(path);
    let target = link_target(relative).replace(' ', SPACE_ESCAPE);
    format!("* [{}]({target})", title(relative, style))
}

fn title(relative: &Path, style: LinkStyle) -> String {
    let stem = relative
        .file_stem()
        .map(OsStr::to_string_lossy)
        .unwrap_or_default();

    let folder = relative
        .parent()
        .and_then(Path::file_name)
        .map(OsStr::to_string_lossy);

    match folder {
        Some(folder) if style.folder_in_title => format!("{stem} ({folder})"),
        _ => stem.into_owned(),
    }
}

/// Markdown link targets always use `/`, whatever the platform separator.
fn link_target(relative: &Path) -> String {
    let mut segments = Vec::new();
    let mut rooted = false;
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy()),
            Component::RootDir => rooted = true,
            Component::CurDir | Component::ParentDir | Component::Prefix(_) => {
                segments.push(component.as_os_str().to_string_lossy());
            }
        }
    }
    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
#[path = "tests/links.rs"]
mod tests;
