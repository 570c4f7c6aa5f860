//! Table of contents extraction from raw markdown

use serde::Serialize;

use super::slugify;

/// One heading in a table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading text as written in the source
    pub text: String,
    /// Anchor id, see [`slugify`]
    pub id: String,
}

impl TocEntry {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let id = slugify(&text);
        Self { text, id }
    }
}

/// Build a flat table of contents from markdown text
///
/// Every line that starts with one or more `#` followed by whitespace is a
/// heading, whatever its level. Entries come out in document order. Ids are
/// not deduplicated: two headings with the same text share an id.
///
/// The input must already have its front-matter block stripped.
pub fn build_toc(markdown: &str) -> Vec<TocEntry> {
    markdown.lines().filter_map(heading_text).map(TocEntry::new).collect()
}

/// Anchor id for a heading, computed from its markdown source
///
/// Only the first line counts. Returns `None` when that line is not a
/// heading line as [`build_toc`] sees it, e.g. setext or indented headings.
pub fn heading_id(source: &str) -> Option<String> {
    source.lines().next().and_then(heading_text).map(slugify)
}

fn heading_text(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches('#');
    if rest.len() == line.len() {
        return None;
    }
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
