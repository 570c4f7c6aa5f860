//! Markdown rendering through a pluggable element mapping

mod elements;
mod highlight;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use crate::content::{heading_id, slugify};

pub use elements::{DefaultElements, ElementRenderer, PlainElements, StyledElements};
pub use highlight::Highlighter;

/// Renders markdown by handing every element to an [`ElementRenderer`]
///
/// Headings receive the id [`crate::content::build_toc`] links to, computed
/// from the heading's source line with [`heading_id`]. Headings the TOC does
/// not list (setext, indented) fall back to [`slugify`] of their plain text.
pub struct MarkdownRenderer<E = StyledElements> {
    elements: E,
}

/// An element whose children are still being collected
struct Frame<'a> {
    tag: Option<Tag<'a>>,
    /// Rendered children
    out: String,
    /// Plain text of the children, used for heading ids and image alt text
    text: String,
    /// Rendered header row, only set on table frames
    head: String,
    /// Anchor id from the source line, only set on heading frames
    id: Option<String>,
}

impl<'a> Frame<'a> {
    fn new(tag: Option<Tag<'a>>) -> Self {
        Self {
            tag,
            out: String::new(),
            text: String::new(),
            head: String::new(),
            id: None,
        }
    }

    fn is_code_block(&self) -> bool {
        matches!(self.tag, Some(Tag::CodeBlock(_)))
    }
}

impl<E: ElementRenderer> MarkdownRenderer<E> {
    pub fn new(elements: E) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &E {
        &self.elements
    }

    /// Render markdown text
    ///
    /// Front-matter is not recognised here; strip it first.
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut stack: Vec<Frame> = vec![Frame::new(None)];

        for (event, range) in parser.into_offset_iter() {
            match event {
                Event::Start(tag) => {
                    let mut frame = Frame::new(Some(tag));
                    if matches!(frame.tag, Some(Tag::Heading { .. })) {
                        frame.id = markdown.get(range).and_then(heading_id);
                    }
                    stack.push(frame);
                }
                Event::End(_) => {
                    if stack.len() < 2 {
                        continue;
                    }
                    let Some(frame) = stack.pop() else { break };
                    let in_table_head = stack
                        .iter()
                        .any(|f| matches!(f.tag, Some(Tag::TableHead)));
                    let text = frame.text.clone();
                    let is_head = matches!(frame.tag, Some(Tag::TableHead));
                    let rendered = self.finish(frame, in_table_head);

                    if let Some(parent) = stack.last_mut() {
                        if is_head {
                            parent.head.push_str(&rendered);
                        } else {
                            parent.out.push_str(&rendered);
                        }
                        parent.text.push_str(&text);
                    }
                }
                Event::Text(text) => {
                    if let Some(top) = stack.last_mut() {
                        if top.is_code_block() {
                            top.out.push_str(&text);
                        } else {
                            top.out.push_str(&self.elements.text(&text));
                        }
                        top.text.push_str(&text);
                    }
                }
                Event::Code(code) => {
                    if let Some(top) = stack.last_mut() {
                        top.out.push_str(&self.elements.inline_code(&code));
                        top.text.push_str(&code);
                    }
                }
                Event::Html(html) | Event::InlineHtml(html) => {
                    if let Some(top) = stack.last_mut() {
                        top.out.push_str(&html);
                    }
                }
                Event::SoftBreak => {
                    if let Some(top) = stack.last_mut() {
                        top.out.push('\n');
                        top.text.push(' ');
                    }
                }
                Event::HardBreak => {
                    if let Some(top) = stack.last_mut() {
                        top.out.push_str(&self.elements.hard_break());
                        top.text.push(' ');
                    }
                }
                Event::Rule => {
                    if let Some(top) = stack.last_mut() {
                        top.out.push_str(&self.elements.rule());
                    }
                }
                Event::TaskListMarker(checked) => {
                    if let Some(top) = stack.last_mut() {
                        top.out.push_str(&self.elements.task_marker(checked));
                    }
                }
                Event::FootnoteReference(label) => {
                    if let Some(top) = stack.last_mut() {
                        top.out.push_str(&self.elements.footnote_reference(&label));
                    }
                }
                _ => {}
            }
        }

        // Unbalanced input cannot happen with pulldown-cmark, but fold any
        // leftover frames into the root rather than dropping their output.
        while stack.len() > 1 {
            if let Some(frame) = stack.pop() {
                if let Some(parent) = stack.last_mut() {
                    parent.out.push_str(&frame.out);
                }
            }
        }

        stack.pop().map(|root| root.out).unwrap_or_default()
    }

    /// Render a completed element from its collected children
    fn finish(&self, frame: Frame<'_>, in_table_head: bool) -> String {
        let e = &self.elements;
        let children = frame.out.as_str();

        match frame.tag {
            Some(Tag::Paragraph) => e.paragraph(children),
            Some(Tag::Heading { level, .. }) => {
                let id = frame.id.unwrap_or_else(|| slugify(&frame.text));
                e.heading(level as u8, &id, children)
            }
            Some(Tag::BlockQuote(_)) => e.blockquote(children),
            Some(Tag::CodeBlock(kind)) => {
                let lang = match &kind {
                    CodeBlockKind::Fenced(info) => code_language(info),
                    CodeBlockKind::Indented => None,
                };
                e.code_block(lang, children)
            }
            Some(Tag::List(start)) => e.list(start, children),
            Some(Tag::Item) => e.list_item(children),
            Some(Tag::FootnoteDefinition(label)) => e.footnote_definition(&label, children),
            Some(Tag::Table(_)) => e.table(&frame.head, children),
            Some(Tag::TableHead) => e.table_head(children),
            Some(Tag::TableRow) => e.table_row(children),
            Some(Tag::TableCell) => e.table_cell(in_table_head, children),
            Some(Tag::Emphasis) => e.emphasis(children),
            Some(Tag::Strong) => e.strong(children),
            Some(Tag::Strikethrough) => e.strikethrough(children),
            Some(Tag::Link {
                dest_url, title, ..
            }) => e.link(&dest_url, &title, children),
            Some(Tag::Image {
                dest_url, title, ..
            }) => e.image(&dest_url, &frame.text, &title),
            _ => children.to_string(),
        }
    }
}

impl Default for MarkdownRenderer<StyledElements> {
    fn default() -> Self {
        Self::new(StyledElements::default())
    }
}

/// Language token of a fenced block's info string (```` ```fsharp {1,3} ````)
fn code_language(info: &str) -> Option<&str> {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .filter(|lang| !lang.is_empty())
}

/// Simple HTML escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::build_toc;

    fn plain_html(markdown: &str) -> String {
        MarkdownRenderer::new(DefaultElements).render(markdown)
    }

    fn styled_html(markdown: &str) -> String {
        MarkdownRenderer::new(StyledElements::default()).render(markdown)
    }

    #[test]
    fn test_render_basic_markdown() {
        let html = plain_html("# Hello World\n\nThis is a test.");
        assert!(html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_heading_ids_match_toc() {
        let markdown = "## Why `Option` Matters!\n\ntext\n\n### Café & Co\n";
        let html = plain_html(markdown);
        for entry in build_toc(markdown) {
            assert!(
                html.contains(&format!(r#"id="{}""#, entry.id)),
                "missing anchor {} in {}",
                entry.id,
                html
            );
        }
    }

    #[test]
    fn test_heading_ids_match_toc_for_links_and_entities() {
        let markdown =
            "## See [the docs](https://fsharp.org)\n\n### Q&amp;A\n\n## Plain *emphasis* ##\n";
        let html = plain_html(markdown);
        let toc = build_toc(markdown);
        assert_eq!(toc.len(), 3);
        for entry in toc {
            assert!(
                html.contains(&format!(r#"id="{}""#, entry.id)),
                "no anchor for TOC entry {} in {}",
                entry.id,
                html
            );
        }
        assert!(html.contains(r#"<h2 id="see-the-docshttpsfsharporg">"#));
    }

    #[test]
    fn test_setext_heading_falls_back_to_text() {
        let html = plain_html("Getting Started\n===============\n");
        assert!(html.contains(r#"<h1 id="getting-started">"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = plain_html("a < b & c");
        assert!(html.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_code_block_receives_raw_code() {
        let html = plain_html("```fsharp\nlet x = a < b\n```\n");
        assert!(html.contains(r#"<code class="language-fsharp">let x = a &lt; b"#));
    }

    #[test]
    fn test_info_string_extras_are_ignored() {
        assert_eq!(code_language("fsharp {1,3}"), Some("fsharp"));
        assert_eq!(code_language("rust,ignore"), Some("rust"));
        assert_eq!(code_language(""), None);
    }

    #[test]
    fn test_styled_highlights_fenced_code() {
        let html = styled_html("```rust\nfn main() {}\n```\n");
        assert!(html.contains(r#"data-language="rust""#));
        assert!(html.contains("<pre style="));
    }

    #[test]
    fn test_styled_unlabelled_block_is_plain() {
        let html = styled_html("```\nplain <text>\n```\n");
        assert!(html.contains("<code>plain &lt;text&gt;</code>"));
        assert!(!html.contains("data-language"));
    }

    #[test]
    fn test_styled_heading_anchor_link() {
        let html = styled_html("## Getting Started\n");
        assert!(html.contains(r#"<h2 id="getting-started""#));
        assert!(html.contains(r##"href="#getting-started""##));
    }

    #[test]
    fn test_styled_external_link() {
        let html = styled_html("[ext](https://fsharp.org) and [local](/posts/other)");
        assert!(html.contains(r#"href="https://fsharp.org""#));
        assert!(html.contains(r#"target="_blank" rel="noopener noreferrer""#));
        assert!(html.contains(r#"href="/posts/other""#));
        assert_eq!(html.matches("_blank").count(), 1);
    }

    #[test]
    fn test_styled_image_caption() {
        let html = styled_html("![A *lovely* view](/img/view.png \"View\")");
        assert!(html.contains("<figure"));
        assert!(html.contains(r#"alt="A lovely view""#));
        assert!(html.contains(r#"title="View""#));
        assert!(html.contains("<figcaption"));
    }

    #[test]
    fn test_tables() {
        let html = plain_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<thead><tr><th>a</th><th>b</th></tr></thead>"));
        assert!(html.contains("<tr><td>1</td><td>2</td></tr>"));
        assert!(html.contains("<tbody>"));
    }

    #[test]
    fn test_task_list_and_strikethrough() {
        let html = plain_html("- [x] done\n- [ ] ~~dropped~~\n");
        assert!(html.contains(r#"checked="""#));
        assert!(html.contains("<del>dropped</del>"));
    }

    #[test]
    fn test_ordered_list_start() {
        let html = plain_html("3. three\n4. four\n");
        assert!(html.contains(r#"<ol start="3">"#));
    }

    #[test]
    fn test_plain_elements() {
        let out = MarkdownRenderer::new(PlainElements)
            .render("# Title\n\nSome `code` & [link](https://x.dev).\n\n- one\n- two\n");
        assert!(out.contains("# Title"));
        assert!(out.contains("Some `code` & link <https://x.dev>."));
        assert!(out.contains("  - one"));
        assert!(!out.contains("&amp;"));
    }

    #[test]
    fn test_custom_mapping() {
        struct Shouty;
        impl ElementRenderer for Shouty {
            fn paragraph(&self, children: &str) -> String {
                format!("<p>{}</p>", children.to_uppercase())
            }
        }

        let html = MarkdownRenderer::new(Shouty).render("quiet words\n\n## Heading\n");
        assert!(html.contains("<p>QUIET WORDS</p>"));
        assert!(html.contains(r#"<h2 id="heading">Heading</h2>"#));
    }
}
