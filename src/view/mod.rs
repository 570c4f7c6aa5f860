//! Index and post views: what each page shows, independent of output format

mod session;

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{
    build_toc, strip_frontmatter, ContentLoader, Post, PostMetadata, ReadingConfig, TocEntry,
};

pub use session::{LoadTicket, Navigator, Route, Screen};

/// Display settings shared by the views
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub reading: ReadingConfig,
    pub summary_tags: usize,
    pub date_format: String,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from(&SiteConfig::default())
    }
}

impl From<&SiteConfig> for ViewSettings {
    fn from(config: &SiteConfig) -> Self {
        Self {
            reading: config.reading.clone(),
            summary_tags: config.summary_tags,
            date_format: config.date_format.clone(),
        }
    }
}

/// One card on the index page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub author_initial: Option<char>,
    pub date: String,
    pub tags: Vec<String>,
    /// Tags beyond the ones shown
    pub more_tags: usize,
    pub reading_minutes: usize,
    pub cover_image: Option<String>,
}

impl PostSummary {
    pub fn new(metadata: &PostMetadata, settings: &ViewSettings) -> Self {
        let fm = &metadata.frontmatter;
        let shown = fm.tags.len().min(settings.summary_tags);
        Self {
            slug: metadata.slug.clone(),
            title: fm.title.clone(),
            excerpt: fm.excerpt.clone(),
            author: fm.author.clone(),
            author_initial: fm.author_initial(),
            date: fm.display_date(&settings.date_format),
            tags: fm.tags[..shown].to_vec(),
            more_tags: fm.tags.len() - shown,
            reading_minutes: settings.reading.minutes(None, &fm.excerpt),
            cover_image: fm.cover_image.clone(),
        }
    }
}

/// The post list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "posts", rename_all = "snake_case")]
pub enum IndexView {
    /// Nothing to show ("No posts found")
    Empty,
    Posts(Vec<PostSummary>),
}

impl IndexView {
    pub fn from_posts(posts: &[PostMetadata], settings: &ViewSettings) -> Self {
        if posts.is_empty() {
            Self::Empty
        } else {
            Self::Posts(posts.iter().map(|p| PostSummary::new(p, settings)).collect())
        }
    }
}

/// A post ready to display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPage {
    pub metadata: PostMetadata,
    pub date: String,
    pub author_initial: Option<char>,
    pub reading_minutes: usize,
    pub cover_image: Option<String>,
    pub toc: Vec<TocEntry>,
    /// Markdown body without its front-matter block
    pub body: String,
}

/// The detail page for one slug
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PostView {
    /// The slug is not in the manifest
    NotFound { slug: String },
    /// The post exists but its body could not be retrieved; worth a retry
    ContentUnavailable { metadata: PostMetadata },
    Ready(PostPage),
}

impl PostView {
    /// Build the view for a load result
    pub fn from_post(slug: &str, post: Option<Post>, settings: &ViewSettings) -> Self {
        let Some(post) = post else {
            return Self::NotFound {
                slug: slug.to_string(),
            };
        };
        let Some(content) = post.content else {
            return Self::ContentUnavailable {
                metadata: post.metadata,
            };
        };

        let fm = &post.metadata.frontmatter;
        let body = strip_frontmatter(&content).to_string();
        Self::Ready(PostPage {
            date: fm.display_date(&settings.date_format),
            author_initial: fm.author_initial(),
            reading_minutes: settings.reading.minutes(Some(&body), &fm.excerpt),
            cover_image: fm.cover_image.clone(),
            toc: build_toc(&body),
            body,
            metadata: post.metadata,
        })
    }

    /// Title to show in the page header, when known
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::NotFound { .. } => None,
            Self::ContentUnavailable { metadata } => Some(&metadata.frontmatter.title),
            Self::Ready(page) => Some(&page.metadata.frontmatter.title),
        }
    }
}

/// Load the index view
pub async fn index_view(loader: &ContentLoader, settings: &ViewSettings) -> IndexView {
    IndexView::from_posts(&loader.all_posts().await, settings)
}

/// Load the detail view for a slug
pub async fn post_view(loader: &ContentLoader, slug: &str, settings: &ViewSettings) -> PostView {
    let post = loader.load_post(slug).await;
    PostView::from_post(slug, post, settings)
}

/// Load whatever a route shows
pub async fn load_screen(loader: &ContentLoader, settings: &ViewSettings, route: &Route) -> Screen {
    match route {
        Route::Index => Screen::Index(index_view(loader, settings).await),
        Route::Post(slug) => Screen::Post(post_view(loader, slug, settings).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Frontmatter, ManifestReader, MemorySource};
    use std::sync::Arc;

    fn metadata(slug: &str, tags: &[&str]) -> PostMetadata {
        PostMetadata {
            slug: slug.to_string(),
            filename: format!("{slug}.mdx"),
            frontmatter: Frontmatter {
                title: "Railway Oriented Programming".to_string(),
                date: "2024-06-01".to_string(),
                author: "Sam".to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                excerpt: "Errors as values.".to_string(),
                cover_image: None,
            },
        }
    }

    #[test]
    fn test_summary_collapses_extra_tags() {
        let meta = metadata("rop", &["fsharp", "errors", "fp", "dotnet", "patterns"]);
        let summary = PostSummary::new(&meta, &ViewSettings::default());
        assert_eq!(summary.tags, vec!["fsharp", "errors", "fp"]);
        assert_eq!(summary.more_tags, 2);
        assert_eq!(summary.date, "June 1, 2024");
        assert_eq!(summary.author_initial, Some('S'));
        assert_eq!(summary.reading_minutes, 5);
    }

    #[test]
    fn test_summary_with_few_tags() {
        let summary = PostSummary::new(&metadata("rop", &["fsharp"]), &ViewSettings::default());
        assert_eq!(summary.tags, vec!["fsharp"]);
        assert_eq!(summary.more_tags, 0);
    }

    #[test]
    fn test_empty_index() {
        assert_eq!(
            IndexView::from_posts(&[], &ViewSettings::default()),
            IndexView::Empty
        );
    }

    #[test]
    fn test_not_found_view() {
        let view = PostView::from_post("gone", None, &ViewSettings::default());
        assert_eq!(
            view,
            PostView::NotFound {
                slug: "gone".to_string()
            }
        );
        assert_eq!(view.title(), None);
    }

    #[test]
    fn test_content_unavailable_view() {
        let post = Post::metadata_only(metadata("rop", &[]));
        let view = PostView::from_post("rop", Some(post), &ViewSettings::default());
        assert!(matches!(view, PostView::ContentUnavailable { .. }));
        assert_eq!(view.title(), Some("Railway Oriented Programming"));
    }

    #[test]
    fn test_ready_view_strips_frontmatter_before_toc() {
        let content = "---\ntitle: Railway\n# not a heading\n---\n# Intro\n\n## Bind\n\ntext\n";
        let post = Post::with_content(metadata("rop", &[]), content.to_string());
        let PostView::Ready(page) = PostView::from_post("rop", Some(post), &ViewSettings::default())
        else {
            panic!("expected a ready view");
        };
        let ids: Vec<_> = page.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["intro", "bind"]);
        assert!(page.body.starts_with("# Intro"));
        assert_eq!(page.reading_minutes, 1);
    }

    #[tokio::test]
    async fn test_index_view_from_loader() {
        let manifest = ManifestReader::from_json(
            r#"{"posts": [
                {"slug": "old", "filename": "old.md", "frontmatter": {"title": "Old", "date": "2024-01-01"}},
                {"slug": "new", "filename": "new.md", "frontmatter": {"title": "New", "date": "2024-06-01"}}
            ]}"#,
        );
        let loader = ContentLoader::new(Arc::new(manifest), Arc::new(MemorySource::new()));
        let IndexView::Posts(posts) = index_view(&loader, &ViewSettings::default()).await else {
            panic!("expected posts");
        };
        assert_eq!(posts[0].slug, "new");
        assert_eq!(posts[1].slug, "old");
    }

    #[tokio::test]
    async fn test_load_screen_routes() {
        let manifest = ManifestReader::from_json(
            r#"{"posts": [{"slug": "a", "filename": "a.md", "frontmatter": {"title": "A", "date": "2024-01-01"}}]}"#,
        );
        let loader = ContentLoader::new(
            Arc::new(manifest),
            Arc::new(MemorySource::new().with_file("a.md", "## Section\n")),
        );
        let settings = ViewSettings::default();

        let screen = load_screen(&loader, &settings, &Route::Post("a".to_string())).await;
        assert!(matches!(screen, Screen::Post(PostView::Ready(_))));

        let screen = load_screen(&loader, &settings, &Route::Index).await;
        assert!(matches!(screen, Screen::Index(IndexView::Posts(_))));
    }
}
