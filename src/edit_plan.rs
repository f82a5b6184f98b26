//! The edit that rewrites the managed section.
//!
//! An [`Edit`] is computed from the located section bounds and the generated link entries, and
//! can be serialised for inspection (`--plan`) before it is applied to the document's lines.
//! The replacement always has the same shape, a blank line, the entries, a blank line, so
//! applying the edit to its own output reproduces it exactly. Inserted lines follow the
//! document's line endings, so a CRLF file stays CRLF throughout.

use crate::section::{HeadingMatcher, SectionBounds};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Line range of the root document to replace and what to put there.
pub struct Edit {
    /// Root document this edit targets.
    pub file_name: String,
    /// Section heading text the edit manages.
    pub item_name: String,
    /// Whether the heading already existed; otherwise it is part of the replacement.
    pub section_found: bool,
    /// First line to replace (inclusive).
    pub line_start: usize,
    /// Line to stop before (exclusive).
    pub line_end: usize,
    /// Lines inserted in place of the range.
    pub replacement: Vec<String>,
}

impl Edit {
    #[must_use]
    /// Build the edit that fills the section described by `bounds` with `entries`.
    ///
    /// A missing section is appended at the end of the document under a synthesized heading,
    /// separated from the previous text by a blank line. Inserted lines end in `\r` when the
    /// section heading does (or, for a missing section, when any line of the document does).
    pub fn for_section<S: AsRef<str>>(
        file_name: &Path,
        lines: &[S],
        bounds: &SectionBounds,
        matcher: &HeadingMatcher,
        entries: &[String],
    ) -> Self {
        let mut replacement = Vec::with_capacity(entries.len() + 5);
        let mut line_start = bounds.line_start;

        let crlf = match bounds.heading_line {
            Some(heading) => lines
                .get(heading)
                .is_some_and(|line| line.as_ref().ends_with('\r')),
            None => lines.iter().any(|line| line.as_ref().ends_with('\r')),
        };

        if !bounds.found() {
            let last: Option<&str> = lines.last().map(AsRef::as_ref);
            match last {
                // The empty tail after the final newline becomes the separator
                Some("") => {
                    line_start = lines.len() - 1;
                    replacement.push(String::new());
                }
                Some(last) if !last.trim().is_empty() => replacement.push(String::new()),
                _ => {}
            }
            replacement.push(matcher.synthetic_heading());
        }

        replacement.push(String::new());
        replacement.extend(entries.iter().cloned());
        replacement.push(String::new());

        if crlf {
            // The last line of the document carries no terminator
            let keep_bare = usize::from(bounds.line_end >= lines.len());
            let terminated = replacement.len() - keep_bare;
            for line in &mut replacement[..terminated] {
                line.push('\r');
            }
        }

        Self {
            file_name: file_name.to_string_lossy().into_owned(),
            item_name: matcher.name().to_string(),
            section_found: bounds.found(),
            line_start,
            line_end: bounds.line_end,
            replacement,
        }
    }

    /// Replace the target range of `lines` in place; everything outside it is kept verbatim.
    ///
    /// A range reaching past the end of `lines` is clamped, so an edit loaded from an older
    /// plan never panics.
    pub fn apply(&self, lines: &mut Vec<String>) {
        let start = self.line_start.min(lines.len());
        let end = self.line_end.clamp(start, lines.len());
        lines.splice(start..end, self.replacement.iter().cloned());
    }
}

#[must_use]
/// Split a document into lines on `\n`, keeping any `\r` so the text can be rejoined unchanged.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(String::from).collect()
}

#[must_use]
/// Inverse of [`split_lines`].
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;
