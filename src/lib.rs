//! postdeck: a blog reader over a manifest of markdown posts
//!
//! The manifest lists every post with its front-matter; bodies are fetched
//! on demand from a content source (local directory or HTTP). Views are
//! rendered to the terminal or served as HTML by a preview server.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod render;
pub mod server;
pub mod templates;
pub mod view;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{ContentLoader, ContentSource, FsSource, HttpSource, ManifestReader};
use render::{Highlighter, MarkdownRenderer, StyledElements};

/// The blog application: configuration plus resolved paths
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Manifest file
    pub manifest_path: PathBuf,
    /// Directory holding post bodies
    pub posts_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    ///
    /// Reads `_config.yml` when present, defaults otherwise.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let manifest_path = base_dir.join(&config.manifest);
        let posts_dir = base_dir.join(&config.posts_dir);

        Self {
            config,
            base_dir,
            manifest_path,
            posts_dir,
        }
    }

    /// Read the manifest; a missing or broken one yields no posts
    pub fn manifest(&self) -> ManifestReader {
        ManifestReader::load(&self.manifest_path)
    }

    /// The configured content source
    pub fn content_source(&self) -> Result<Arc<dyn ContentSource>> {
        let source: Arc<dyn ContentSource> = match self.config.source.kind {
            config::SourceKind::Fs => Arc::new(FsSource::new(&self.posts_dir)),
            config::SourceKind::Http => Arc::new(HttpSource::new(
                &self.config.source.base_url,
                self.config.source.timeout(),
            )?),
        };
        tracing::debug!("Content source: {}", source.describe());
        Ok(source)
    }

    /// A loader over the manifest and the configured source
    pub fn loader(&self) -> Result<ContentLoader> {
        Ok(ContentLoader::new(
            Arc::new(self.manifest()),
            self.content_source()?,
        ))
    }

    pub fn view_settings(&self) -> view::ViewSettings {
        view::ViewSettings::from(&self.config)
    }

    /// HTML renderer using the configured highlighting theme
    pub fn markdown_renderer(&self) -> MarkdownRenderer<StyledElements> {
        let highlighter = Highlighter::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        );
        MarkdownRenderer::new(StyledElements::new(highlighter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.manifest_path, dir.path().join("blogpost.manifest.json"));
        assert_eq!(blog.posts_dir, dir.path().join("blog/posts"));
        assert!(blog.manifest().is_empty());
    }

    #[test]
    fn test_config_file_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "manifest: posts.json\nposts_dir: content\n",
        )
        .unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.manifest_path, dir.path().join("posts.json"));
        assert_eq!(blog.posts_dir, dir.path().join("content"));
    }

    #[test]
    fn test_broken_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "summary_tags: [1, 2]\n").unwrap();
        assert!(Blog::new(dir.path()).is_err());
    }

    #[tokio::test]
    async fn test_loader_reads_posts_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("blog/posts")).unwrap();
        fs::write(
            dir.path().join("blogpost.manifest.json"),
            r#"{"posts": [{"slug": "hello", "filename": "hello.md", "frontmatter": {"title": "Hello", "date": "2024-06-01"}}]}"#,
        )
        .unwrap();
        fs::write(dir.path().join("blog/posts/hello.md"), "# Hello\n").unwrap();

        let loader = Blog::new(dir.path()).unwrap().loader().unwrap();
        let post = loader.load_post("hello").await.unwrap();
        assert_eq!(post.content.as_deref(), Some("# Hello\n"));
    }
}
