//! Heading and post slugs
//!
//! The same function computes the `id` attribute of a rendered heading and
//! the `href` fragment of its table-of-contents link, so both sides must go
//! through [`slugify`].

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DISALLOWED: Regex = Regex::new(r"[^\p{L}\p{N}\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Convert heading text to a URL-safe anchor id
///
/// Lowercases, drops everything that is not a letter, digit, whitespace or
/// hyphen, then turns each whitespace run into a single hyphen.
///
/// # Examples
/// ```
/// use postdeck::content::slugify;
///
/// assert_eq!(slugify("Hello World!"), "hello-world");
/// assert_eq!(slugify("Pattern   Matching in F#"), "pattern-matching-in-f");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned = DISALLOWED.replace_all(&lowered, "");
    WHITESPACE.replace_all(cleaned.trim(), "-").into_owned()
}
