//! HTML pages for the index and post views, using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping stays on: only the
//! rendered post body is marked safe.

use percent_encoding::utf8_percent_encode;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::PATH_SEGMENT;
use crate::error::RenderError;
use crate::view::{IndexView, PostPage, PostView};

/// Renders complete HTML pages from views
pub struct PageRenderer {
    tera: Tera,
    site: SiteData,
}

/// Site-wide values every page sees
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
        }
    }
}

impl PageRenderer {
    /// Create a new renderer with all page templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("pages/layout.html")),
            ("index.html", include_str!("pages/index.html")),
            ("post.html", include_str!("pages/post.html")),
            ("error.html", include_str!("pages/error.html")),
        ])?;

        Ok(Self {
            tera,
            site: SiteData::from(config),
        })
    }

    fn context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context
    }

    /// Render the post list
    pub fn index(&self, view: &IndexView) -> Result<String, RenderError> {
        let mut context = self.context();
        match view {
            IndexView::Empty => context.insert("posts", &Vec::<()>::new()),
            IndexView::Posts(posts) => context.insert("posts", posts),
        }
        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render a ready post with its body already converted to HTML
    pub fn post(&self, page: &PostPage, body_html: &str) -> Result<String, RenderError> {
        let mut context = self.context();
        context.insert("page", page);
        context.insert("body", body_html);
        Ok(self.tera.render("post.html", &context)?)
    }

    /// Render the error page for a post that cannot be shown
    ///
    /// Returns `None` for [`PostView::Ready`], which has no error to show.
    pub fn post_error(&self, view: &PostView) -> Result<Option<String>, RenderError> {
        let (heading, message, retry_href) = match view {
            PostView::Ready(_) => return Ok(None),
            PostView::NotFound { slug } => (
                "Post not found".to_string(),
                format!("Blog post '{}' not found", slug),
                None,
            ),
            PostView::ContentUnavailable { metadata } => (
                "Content unavailable".to_string(),
                format!(
                    "Failed to load content for \"{}\"",
                    metadata.frontmatter.title
                ),
                Some(format!(
                    "/posts/{}",
                    utf8_percent_encode(&metadata.slug, PATH_SEGMENT)
                )),
            ),
        };

        let mut context = self.context();
        context.insert("heading", &heading);
        context.insert("message", &message);
        context.insert("retry_href", &retry_href);
        Ok(Some(self.tera.render("error.html", &context)?))
    }
}
