//! Locating the managed section inside the root document.
//!
//! A section starts on the line after its heading and runs until the next heading of any
//! level, or the end of the document. Matching works line by line on trimmed text: there is no
//! markdown parsing, so a `#` line inside a fenced block still counts as a heading.

use regex::{Regex, RegexBuilder};

/// Recognises the heading of one named section.
#[derive(Clone, Debug)]
pub struct HeadingMatcher {
    name: String,
    level: Option<u8>,
    pattern: Regex,
}

impl HeadingMatcher {
    /// Matcher for `name` (case-insensitive), optionally restricted to one heading level.
    ///
    /// # Errors
    ///
    /// Returns an error if the escaped name exceeds the regex size limit.
    pub fn new(name: &str, level: Option<u8>) -> Result<Self, regex::Error> {
        let marker = level.map_or_else(|| "#+".to_string(), |n| format!("#{{{n}}}"));
        let pattern = RegexBuilder::new(&format!(r"^{marker}\s+{}$", regex::escape(name)))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            name: name.to_string(),
            level,
            pattern,
        })
    }

    #[must_use]
    /// Whether `line` is this section's heading.
    pub fn is_section_heading(&self, line: &str) -> bool {
        self.pattern.is_match(line.trim())
    }

    #[must_use]
    /// Heading line written when the section does not exist yet.
    pub fn synthetic_heading(&self) -> String {
        let level = usize::from(self.level.unwrap_or(1));
        format!("{} {}", "#".repeat(level), self.name)
    }

    #[must_use]
    /// Section name as configured.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[must_use]
/// Whether `line` is a heading of any level.
pub fn is_heading(line: &str) -> bool {
    line.trim().starts_with('#')
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where the section body sits in the document's lines.
///
/// The body is `lines[line_start..line_end]`. When the heading is missing the range is empty and
/// positioned at the end of the document.
pub struct SectionBounds {
    /// Index of the matched heading line, if any.
    pub heading_line: Option<usize>,
    /// First line of the body (the line after the heading).
    pub line_start: usize,
    /// Line where the next heading begins or the document ends (exclusive).
    pub line_end: usize,
    /// Later headings with the same name. They are left untouched.
    pub duplicates: Vec<usize>,
}

impl SectionBounds {
    #[must_use]
    /// Whether the heading was present.
    pub fn found(&self) -> bool {
        self.heading_line.is_some()
    }

    #[must_use]
    /// Index of the last body line, `None` for an empty body.
    pub fn last_line(&self) -> Option<usize> {
        (self.line_end > self.line_start).then(|| self.line_end - 1)
    }
}

/// Find the body of the section recognised by `matcher`.
///
/// The first matching heading wins; the body ends before the next heading at or after
/// `line_start`, so a heading directly followed by another one has an empty body.
#[must_use]
pub fn locate<S: AsRef<str>>(lines: &[S], matcher: &HeadingMatcher) -> SectionBounds {
    let mut headings = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| matcher.is_section_heading(line.as_ref()))
        .map(|(index, _)| index);

    let Some(heading_line) = headings.next() else {
        return SectionBounds {
            heading_line: None,
            line_start: lines.len(),
            line_end: lines.len(),
            duplicates: Vec::new(),
        };
    };
    let duplicates = headings.collect();

    let line_start = heading_line + 1;
    let line_end = lines
        .iter()
        .enumerate()
        .skip(line_start)
        .find(|(_, line)| is_heading(line.as_ref()))
        .map_or(lines.len(), |(index, _)| index);

    SectionBounds {
        heading_line: Some(heading_line),
        line_start,
        line_end,
        duplicates,
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
