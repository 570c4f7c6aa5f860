//! Syntax highlighting for fenced code blocks

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::html_escape;

/// Highlights code with syntect's bundled syntaxes and themes
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl Highlighter {
    /// Create a highlighter with the default dark theme
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Highlight a code block, falling back to an escaped `<pre>` block
    pub fn highlight(&self, code: &str, lang: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = self
            .theme()
            .and_then(|theme| highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok());

        match highlighted {
            Some(html) if self.line_numbers => add_line_numbers(&html, lang),
            Some(html) => html,
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang),
                html_escape(code)
            ),
        }
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap highlighted lines in a gutter table
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        html_escape(lang),
        gutter,
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_known_language() {
        let highlighter = Highlighter::new();
        let html = highlighter.highlight("fn main() {}\n", "rust");
        assert!(html.starts_with("<pre"));
        assert!(html.contains("style="));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_still_renders() {
        let highlighter = Highlighter::new();
        let html = highlighter.highlight("let x = <y>\n", "no-such-language");
        assert!(html.contains("&lt;"));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let highlighter = Highlighter::with_options("does-not-exist", false);
        let html = highlighter.highlight("x = 1\n", "python");
        assert!(html.contains("<pre"));
    }

    #[test]
    fn test_line_numbers() {
        let highlighter = Highlighter::with_options("base16-ocean.dark", true);
        let html = highlighter.highlight("a = 1\nb = 2\n", "python");
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
        assert!(html.contains("gutter"));
    }
}
