//! CLI commands and their terminal output

pub mod browse;
pub mod check;
pub mod list;
pub mod show;
pub mod toc;

use crate::render::{MarkdownRenderer, PlainElements};
use crate::view::{IndexView, PostPage, PostView, Screen};

/// Text for the post list
pub fn format_index(index: &IndexView) -> String {
    let posts = match index {
        IndexView::Empty => return "No posts found. Check back soon!\n".to_string(),
        IndexView::Posts(posts) => posts,
    };

    let mut out = format!("Posts ({}):\n", posts.len());
    for (i, post) in posts.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} - {} [{}]\n",
            i + 1,
            post.date,
            post.title,
            post.slug
        ));

        let mut details = vec![format!("{} min read", post.reading_minutes)];
        if !post.tags.is_empty() {
            let mut tags = post.tags.join(", ");
            if post.more_tags > 0 {
                tags.push_str(&format!(" +{}", post.more_tags));
            }
            details.push(tags);
        }
        out.push_str(&format!("     {}\n", details.join(" | ")));
    }
    out
}

/// Text for a post, including the not-found and unavailable states
pub fn format_post(post: &PostView, renderer: &MarkdownRenderer<PlainElements>) -> String {
    match post {
        PostView::NotFound { slug } => format!("Blog post '{}' not found\n", slug),
        PostView::ContentUnavailable { metadata } => format!(
            "Failed to load content for \"{}\"\n",
            metadata.frontmatter.title
        ),
        PostView::Ready(page) => format_page(page, renderer),
    }
}

fn format_page(page: &PostPage, renderer: &MarkdownRenderer<PlainElements>) -> String {
    let fm = &page.metadata.frontmatter;
    let mut out = format!("{}\n", fm.title);
    out.push_str(&"=".repeat(fm.title.chars().count().max(3)));
    out.push('\n');

    let mut byline = Vec::new();
    if !fm.author.is_empty() {
        byline.push(fm.author.clone());
    }
    if !page.date.is_empty() {
        byline.push(page.date.clone());
    }
    byline.push(format!("{} min read", page.reading_minutes));
    out.push_str(&byline.join(" • "));
    out.push('\n');

    if !fm.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", fm.tags.join(", ")));
    }

    out.push_str("\nContents:\n");
    if page.toc.is_empty() {
        out.push_str("  No table of contents available\n");
    }
    for entry in &page.toc {
        out.push_str(&format!("  - {} (#{})\n", entry.text, entry.id));
    }

    out.push('\n');
    out.push_str(renderer.render(&page.body).trim_end());
    out.push('\n');
    out
}

/// Text for whatever the navigator shows
pub fn format_screen(screen: &Screen, renderer: &MarkdownRenderer<PlainElements>) -> String {
    match screen {
        Screen::Loading(_) => "Loading...\n".to_string(),
        Screen::Index(index) => format_index(index),
        Screen::Post(post) => format_post(post, renderer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Frontmatter, Post, PostMetadata};
    use crate::view::{PostSummary, Route, ViewSettings};

    fn metadata(tags: &[&str]) -> PostMetadata {
        PostMetadata {
            slug: "pattern-matching".to_string(),
            filename: "pattern-matching.md".to_string(),
            frontmatter: Frontmatter {
                title: "Pattern Matching".to_string(),
                date: "2024-06-01".to_string(),
                author: "Sam".to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                excerpt: String::new(),
                cover_image: None,
            },
        }
    }

    fn plain() -> MarkdownRenderer<PlainElements> {
        MarkdownRenderer::new(PlainElements)
    }

    #[test]
    fn test_format_empty_index() {
        assert_eq!(
            format_index(&IndexView::Empty),
            "No posts found. Check back soon!\n"
        );
    }

    #[test]
    fn test_format_index_numbers_posts() {
        let meta = metadata(&["fsharp", "fp", "dotnet", "patterns"]);
        let summary = PostSummary::new(&meta, &ViewSettings::default());
        let text = format_index(&IndexView::Posts(vec![summary]));
        assert!(text.starts_with("Posts (1):\n"));
        assert!(text.contains("  1. June 1, 2024 - Pattern Matching [pattern-matching]"));
        assert!(text.contains("fsharp, fp, dotnet +1"));
    }

    #[test]
    fn test_format_ready_post() {
        let post = Post::with_content(
            metadata(&["fsharp"]),
            "## Active Patterns\n\nMatch **anything**.\n".to_string(),
        );
        let view = PostView::from_post("pattern-matching", Some(post), &ViewSettings::default());
        let text = format_post(&view, &plain());
        assert!(text.starts_with("Pattern Matching\n"));
        assert!(text.contains("Sam • June 1, 2024 • 1 min read"));
        assert!(text.contains("  - Active Patterns (#active-patterns)"));
        assert!(text.contains("## Active Patterns"));
    }

    #[test]
    fn test_format_error_states() {
        let missing = PostView::NotFound {
            slug: "gone".to_string(),
        };
        assert_eq!(format_post(&missing, &plain()), "Blog post 'gone' not found\n");

        let unavailable = PostView::ContentUnavailable {
            metadata: metadata(&[]),
        };
        assert_eq!(
            format_post(&unavailable, &plain()),
            "Failed to load content for \"Pattern Matching\"\n"
        );
    }

    #[test]
    fn test_format_loading_screen() {
        let screen = Screen::Loading(Route::Index);
        assert_eq!(format_screen(&screen, &plain()), "Loading...\n");
    }
}
