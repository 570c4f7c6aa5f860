//! Reading-time estimates

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::strip_frontmatter;

lazy_static! {
    /// Opening or closing code fence: up to three spaces, then 3+ backticks or tildes
    static ref FENCE: Regex = Regex::new(r"^ {0,3}(`{3,}|~{3,})").unwrap();
}

/// Reading speed and the excerpt heuristic parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    pub words_per_minute: usize,
    /// Excerpt word count is multiplied by this when the body is unavailable
    pub excerpt_multiplier: usize,
    /// Assumed minimum article length when only the excerpt is known
    pub min_article_words: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
            excerpt_multiplier: 5,
            min_article_words: 1000,
        }
    }
}

impl ReadingConfig {
    /// Estimated minutes to read a post
    ///
    /// With a body, code fences and front-matter are excluded from the word
    /// count. Without one, the estimate is a guess derived from the excerpt
    /// and never less than `min_article_words`.
    pub fn minutes(&self, content: Option<&str>, excerpt: &str) -> usize {
        match content {
            Some(content) => self.minutes_for_words(count_words(&prose(content)).max(1)),
            None => {
                let guessed = count_words(excerpt) * self.excerpt_multiplier;
                self.minutes_for_words(guessed.max(self.min_article_words))
            }
        }
    }

    fn minutes_for_words(&self, words: usize) -> usize {
        words.div_ceil(self.words_per_minute.max(1))
    }
}

/// Post body without front-matter and fenced code blocks
///
/// A fence closes on a line of the same character at least as long as the
/// opening run; an unclosed fence runs to the end of the body.
fn prose(content: &str) -> String {
    let mut out = String::new();
    let mut open: Option<&str> = None;

    for line in strip_frontmatter(content).lines() {
        let fence = FENCE.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str());
        match (open, fence) {
            (None, Some(run)) => open = Some(run),
            (None, None) => {
                out.push_str(line);
                out.push('\n');
            }
            (Some(opening), Some(run)) => {
                let rest = &line[line.find(run).unwrap_or(0) + run.len()..];
                if closes(opening, run) && rest.trim().is_empty() {
                    open = None;
                }
            }
            (Some(_), None) => {}
        }
    }
    out
}

fn closes(opening: &str, run: &str) -> bool {
    run.len() >= opening.len() && run.chars().next() == opening.chars().next()
}

/// Count whitespace separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
