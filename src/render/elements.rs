//! Per-element rendering rules
//!
//! [`super::MarkdownRenderer`] walks the markdown and calls one method per
//! element with the already rendered children. Implementors override only the
//! elements they care about; every method has a plain HTML default.

use super::html_escape;
use super::Highlighter;

/// Mapping from markdown element kind to output
pub trait ElementRenderer {
    /// Literal text outside code blocks
    fn text(&self, text: &str) -> String {
        html_escape(text)
    }

    fn heading(&self, level: u8, id: &str, children: &str) -> String {
        format!("<h{level} id=\"{}\">{children}</h{level}>\n", html_escape(id))
    }

    fn paragraph(&self, children: &str) -> String {
        format!("<p>{children}</p>\n")
    }

    /// `start` is `Some` for ordered lists
    fn list(&self, start: Option<u64>, children: &str) -> String {
        match start {
            None => format!("<ul>\n{children}</ul>\n"),
            Some(1) => format!("<ol>\n{children}</ol>\n"),
            Some(n) => format!("<ol start=\"{n}\">\n{children}</ol>\n"),
        }
    }

    fn list_item(&self, children: &str) -> String {
        format!("<li>{children}</li>\n")
    }

    fn task_marker(&self, checked: bool) -> String {
        if checked {
            r#"<input type="checkbox" disabled="" checked="" /> "#.to_string()
        } else {
            r#"<input type="checkbox" disabled="" /> "#.to_string()
        }
    }

    fn blockquote(&self, children: &str) -> String {
        format!("<blockquote>\n{children}</blockquote>\n")
    }

    /// `code` is the raw, unescaped block content
    fn code_block(&self, lang: Option<&str>, code: &str) -> String {
        match lang {
            Some(lang) => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>\n",
                html_escape(lang),
                html_escape(code)
            ),
            None => format!("<pre><code>{}</code></pre>\n", html_escape(code)),
        }
    }

    fn inline_code(&self, code: &str) -> String {
        format!("<code>{}</code>", html_escape(code))
    }

    fn link(&self, href: &str, title: &str, children: &str) -> String {
        format!(
            r#"<a href="{}"{}>{children}</a>"#,
            html_escape(href),
            title_attr(title)
        )
    }

    /// `alt` is the plain text of the image description
    fn image(&self, src: &str, alt: &str, title: &str) -> String {
        format!(
            r#"<img src="{}" alt="{}"{} />"#,
            html_escape(src),
            html_escape(alt),
            title_attr(title)
        )
    }

    fn strong(&self, children: &str) -> String {
        format!("<strong>{children}</strong>")
    }

    fn emphasis(&self, children: &str) -> String {
        format!("<em>{children}</em>")
    }

    fn strikethrough(&self, children: &str) -> String {
        format!("<del>{children}</del>")
    }

    fn table(&self, head: &str, body: &str) -> String {
        format!("<table>{head}<tbody>\n{body}</tbody></table>\n")
    }

    fn table_head(&self, cells: &str) -> String {
        format!("<thead><tr>{cells}</tr></thead>\n")
    }

    fn table_row(&self, cells: &str) -> String {
        format!("<tr>{cells}</tr>\n")
    }

    fn table_cell(&self, header: bool, children: &str) -> String {
        if header {
            format!("<th>{children}</th>")
        } else {
            format!("<td>{children}</td>")
        }
    }

    fn rule(&self) -> String {
        "<hr />\n".to_string()
    }

    fn hard_break(&self) -> String {
        "<br />\n".to_string()
    }

    fn footnote_reference(&self, label: &str) -> String {
        let label = html_escape(label);
        format!(r##"<sup class="footnote-reference"><a href="#{label}">{label}</a></sup>"##)
    }

    fn footnote_definition(&self, label: &str, children: &str) -> String {
        let label = html_escape(label);
        format!(
            "<div class=\"footnote-definition\" id=\"{label}\"><sup class=\"footnote-definition-label\">{label}</sup>{children}</div>\n"
        )
    }
}

fn title_attr(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, html_escape(title))
    }
}

/// Plain HTML, exactly the trait defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultElements;

impl ElementRenderer for DefaultElements {}

/// The blog's element mapping: utility classes, heading anchors,
/// highlighted code and captioned images
#[derive(Default)]
pub struct StyledElements {
    highlighter: Highlighter,
}

impl StyledElements {
    pub fn new(highlighter: Highlighter) -> Self {
        Self { highlighter }
    }
}

impl ElementRenderer for StyledElements {
    fn heading(&self, level: u8, id: &str, children: &str) -> String {
        let id = html_escape(id);
        let html = match level {
            1 => format!(r#"<h1 id="{id}" class="text-4xl font-bold mt-8 mb-4">{children}</h1>"#),
            2 | 3 => {
                let size = if level == 2 {
                    "text-3xl font-bold mt-8 mb-3"
                } else {
                    "text-2xl font-bold mt-6 mb-3"
                };
                format!(
                    r##"<h{level} id="{id}" class="{size} group">{children}<a href="#{id}" class="opacity-0 group-hover:opacity-100 transition-opacity ml-1 text-primary" aria-hidden="true">#</a></h{level}>"##
                )
            }
            4 => format!(r#"<h4 id="{id}" class="text-xl font-bold mt-4 mb-2">{children}</h4>"#),
            _ => format!(r#"<h{level} id="{id}">{children}</h{level}>"#),
        };
        html + "\n"
    }

    fn paragraph(&self, children: &str) -> String {
        format!("<p class=\"my-4 leading-relaxed\">{children}</p>\n")
    }

    fn list(&self, start: Option<u64>, children: &str) -> String {
        match start {
            None => format!(
                "<ul class=\"list-disc list-inside my-4 ml-4 space-y-2\">\n{children}</ul>\n"
            ),
            Some(n) => {
                let start = if n == 1 {
                    String::new()
                } else {
                    format!(" start=\"{n}\"")
                };
                format!(
                    "<ol class=\"list-decimal list-inside my-4 ml-4 space-y-2\"{start}>\n{children}</ol>\n"
                )
            }
        }
    }

    fn list_item(&self, children: &str) -> String {
        format!("<li class=\"mb-1\">{children}</li>\n")
    }

    fn blockquote(&self, children: &str) -> String {
        format!(
            "<blockquote class=\"border-l-4 border-primary pl-4 py-2 italic my-4\">\n{children}</blockquote>\n"
        )
    }

    fn code_block(&self, lang: Option<&str>, code: &str) -> String {
        let code = code.strip_suffix('\n').unwrap_or(code);
        match lang {
            Some(lang) => format!(
                "<div class=\"code-block rounded-md my-6\" data-language=\"{}\">{}</div>\n",
                html_escape(lang),
                self.highlighter.highlight(code, lang)
            ),
            None => format!(
                "<pre class=\"bg-base-300 rounded-md p-4 my-6\"><code>{}</code></pre>\n",
                html_escape(code)
            ),
        }
    }

    fn inline_code(&self, code: &str) -> String {
        format!(
            "<code class=\"bg-base-300 px-1.5 py-0.5 rounded text-sm\">{}</code>",
            html_escape(code)
        )
    }

    fn link(&self, href: &str, title: &str, children: &str) -> String {
        if href.is_empty() {
            return format!("<a>{children}</a>");
        }

        let external = if href.starts_with("http") {
            r#" target="_blank" rel="noopener noreferrer""#
        } else {
            ""
        };
        format!(
            r#"<a href="{}"{} class="text-primary hover:text-primary/80 underline transition-colors"{external}>{children}</a>"#,
            html_escape(href),
            title_attr(title)
        )
    }

    fn image(&self, src: &str, alt: &str, title: &str) -> String {
        if src.is_empty() {
            return String::new();
        }

        let caption = if alt.is_empty() {
            String::new()
        } else {
            format!(
                r#"<figcaption class="text-center text-sm mt-2 opacity-70">{}</figcaption>"#,
                html_escape(alt)
            )
        };
        format!(
            r#"<figure class="my-8"><img src="{}" alt="{}" title="{}" class="rounded-lg w-full" loading="lazy" />{caption}</figure>"#,
            html_escape(src),
            html_escape(alt),
            html_escape(title)
        )
    }

    fn strong(&self, children: &str) -> String {
        format!("<strong class=\"font-bold\">{children}</strong>")
    }

    fn emphasis(&self, children: &str) -> String {
        format!("<em class=\"italic\">{children}</em>")
    }
}

/// Terminal output: markdown-like plain text, nothing escaped
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainElements;

impl ElementRenderer for PlainElements {
    fn text(&self, text: &str) -> String {
        text.to_string()
    }

    fn heading(&self, level: u8, _id: &str, children: &str) -> String {
        format!("{} {}\n\n", "#".repeat(level as usize), children.trim())
    }

    fn paragraph(&self, children: &str) -> String {
        format!("{}\n\n", children.trim_end())
    }

    fn list(&self, _start: Option<u64>, children: &str) -> String {
        format!("{children}\n")
    }

    fn list_item(&self, children: &str) -> String {
        let mut lines = children.trim_end().lines();
        let mut out = format!("  - {}\n", lines.next().unwrap_or_default());
        for line in lines.filter(|l| !l.trim().is_empty()) {
            out.push_str(&format!("    {line}\n"));
        }
        out
    }

    fn task_marker(&self, checked: bool) -> String {
        let marker = if checked { "[x] " } else { "[ ] " };
        marker.to_string()
    }

    fn blockquote(&self, children: &str) -> String {
        let quoted: Vec<String> = children
            .trim_end()
            .lines()
            .map(|line| format!("> {line}").trim_end().to_string())
            .collect();
        format!("{}\n\n", quoted.join("\n"))
    }

    fn code_block(&self, _lang: Option<&str>, code: &str) -> String {
        let indented: Vec<String> = code.lines().map(|line| format!("    {line}")).collect();
        format!("{}\n\n", indented.join("\n"))
    }

    fn inline_code(&self, code: &str) -> String {
        format!("`{code}`")
    }

    fn link(&self, href: &str, _title: &str, children: &str) -> String {
        if href.is_empty() || href == children {
            children.to_string()
        } else {
            format!("{children} <{href}>")
        }
    }

    fn image(&self, src: &str, alt: &str, _title: &str) -> String {
        if src.is_empty() {
            String::new()
        } else {
            format!("[image: {alt}] <{src}>")
        }
    }

    fn strong(&self, children: &str) -> String {
        children.to_string()
    }

    fn emphasis(&self, children: &str) -> String {
        children.to_string()
    }

    fn strikethrough(&self, children: &str) -> String {
        format!("~{children}~")
    }

    fn table(&self, head: &str, body: &str) -> String {
        format!("{head}{body}\n")
    }

    fn table_head(&self, cells: &str) -> String {
        let row = self.table_row(cells);
        let rule = "-".repeat(row.trim_end().chars().count());
        format!("{row}{rule}\n")
    }

    fn table_row(&self, cells: &str) -> String {
        format!("{}\n", cells.trim_end_matches(" | "))
    }

    fn table_cell(&self, _header: bool, children: &str) -> String {
        format!("{children} | ")
    }

    fn rule(&self) -> String {
        "----\n\n".to_string()
    }

    fn hard_break(&self) -> String {
        "\n".to_string()
    }

    fn footnote_reference(&self, label: &str) -> String {
        format!("[^{label}]")
    }

    fn footnote_definition(&self, label: &str, children: &str) -> String {
        format!("[^{label}]: {}\n", children.trim())
    }
}
