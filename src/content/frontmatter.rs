//! Front-matter block handling
//!
//! A post file starts with an optional YAML block delimited by two lines
//! consisting of exactly `---`. The block is metadata, never body text.

use super::Frontmatter;

/// Split a post file into its front-matter block and the body
///
/// Returns `(None, content)` unchanged when the first non-blank line is not
/// `---` or the block is never closed.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    let mut lines = trimmed.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, content);
    };
    if !is_delimiter(first) {
        return (None, content);
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if is_delimiter(line) {
            let block = &trimmed[block_start..offset];
            let body = trimmed[offset + line.len()..].trim_start();
            return (Some(block), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Body of a post file with the leading front-matter block removed
pub fn strip_frontmatter(content: &str) -> &str {
    split_frontmatter(content).1
}

/// Parse the YAML front-matter of a post file, if it has one
///
/// Returns `None` for files without a block and for blocks that are not
/// valid YAML; the latter is logged.
pub fn parse_frontmatter(content: &str) -> Option<Frontmatter> {
    let (block, _) = split_frontmatter(content);
    let block = block?;
    if block.trim().is_empty() {
        return Some(Frontmatter::default());
    }

    match serde_yaml::from_str::<Frontmatter>(block) {
        Ok(fm) => Some(fm),
        Err(e) => {
            tracing::warn!("Failed to parse YAML front-matter: {}", e);
            None
        }
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == "---"
}
