//! Where post bodies come from
//!
//! The loader only knows a post's file name; a [`ContentSource`] turns that
//! into the raw markdown text. Deployments pick one: read the files shipped
//! next to the binary, or fetch them over HTTP from wherever the site is
//! hosted.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::error::SourceError;

/// Characters escaped in a file name used as a URL path segment
pub(crate) const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Retrieves the raw text of a post body by file name
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, filename: &str) -> Result<String, SourceError>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Reads post bodies from a directory
#[derive(Debug, Clone)]
pub struct FsSource {
    posts_dir: PathBuf,
}

impl FsSource {
    pub fn new<P: Into<PathBuf>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }
}

#[async_trait]
impl ContentSource for FsSource {
    async fn fetch(&self, filename: &str) -> Result<String, SourceError> {
        if !is_plain_filename(filename) {
            return Err(SourceError::InvalidFilename(filename.to_string()));
        }
        let path = self.posts_dir.join(filename);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io { path, source })
    }

    fn describe(&self) -> String {
        format!("directory {:?}", self.posts_dir)
    }
}

/// Fetches post bodies over HTTP relative to a base URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SourceError::Request {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL a file name is fetched from
    pub fn url_for(&self, filename: &str) -> String {
        format!(
            "{}/{}",
            self.base_url,
            utf8_percent_encode(filename, PATH_SEGMENT)
        )
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch(&self, filename: &str) -> Result<String, SourceError> {
        let url = self.url_for(filename);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| SourceError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { url, status });
        }

        response
            .text()
            .await
            .map_err(|source| SourceError::Request { url, source })
    }

    fn describe(&self) -> String {
        format!("url {}", self.base_url)
    }
}

/// Post bodies compiled into the program or assembled in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, filename: &str, content: &str) -> Self {
        self.files.insert(filename.to_string(), content.to_string());
        self
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn fetch(&self, filename: &str) -> Result<String, SourceError> {
        self.files
            .get(filename)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(filename.to_string()))
    }

    fn describe(&self) -> String {
        format!("memory ({} files)", self.files.len())
    }
}

/// A single normal path component: no separators, no `..`, not absolute
fn is_plain_filename(filename: &str) -> bool {
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
