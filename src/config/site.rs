//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::content::ReadingConfig;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,

    // Content
    pub manifest: String,
    pub posts_dir: String,
    #[serde(default)]
    pub source: SourceConfig,

    // Display
    #[serde(default)]
    pub reading: ReadingConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    /// Tags shown on an index card before collapsing into "+N"
    pub summary_tags: usize,
    /// chrono format for post dates
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            subtitle: String::new(),
            author: String::new(),

            manifest: "blogpost.manifest.json".to_string(),
            posts_dir: "blog/posts".to_string(),
            source: SourceConfig::default(),

            reading: ReadingConfig::default(),
            highlight: HighlightConfig::default(),
            summary_tags: 3,
            date_format: "%B %-d, %Y".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// How post bodies are retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Read from `posts_dir`
    Fs,
    /// Fetch from `base_url`
    Http,
}

/// Content source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Fs,
            base_url: "http://localhost:4000/blog/posts/".to_string(),
            timeout_secs: 10,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
