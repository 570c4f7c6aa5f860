//! Post manifest: the static index of every post and its metadata

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use super::PostMetadata;
use crate::error::ManifestError;

/// On-disk shape of the manifest document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub posts: Vec<PostMetadata>,
}

impl Manifest {
    /// Read and parse a manifest file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse a manifest from JSON text
    pub fn parse(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Read-only view over the manifest, loaded once
///
/// Loading never fails: an unreadable or malformed manifest is logged and
/// treated as empty, which the index view shows as "no posts".
#[derive(Debug, Clone, Default)]
pub struct ManifestReader {
    manifest: Manifest,
}

impl ManifestReader {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }

    /// Load the manifest file, falling back to an empty manifest
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        match Manifest::read(path.as_ref()) {
            Ok(manifest) => {
                tracing::debug!(
                    "Loaded manifest {:?} with {} posts",
                    path.as_ref(),
                    manifest.posts.len()
                );
                Self::new(manifest)
            }
            Err(e) => {
                tracing::warn!("Error reading post manifest: {}", e);
                Self::default()
            }
        }
    }

    /// Parse manifest JSON, falling back to an empty manifest
    pub fn from_json(json: &str) -> Self {
        match Manifest::parse(json) {
            Ok(manifest) => Self::new(manifest),
            Err(e) => {
                tracing::warn!("Error parsing post manifest: {}", e);
                Self::default()
            }
        }
    }

    /// Slugs of every post, in manifest order
    pub fn list_slugs(&self) -> Vec<String> {
        self.manifest.posts.iter().map(|p| p.slug.clone()).collect()
    }

    /// Metadata for one post
    pub fn find_by_slug(&self, slug: &str) -> Option<&PostMetadata> {
        self.manifest.posts.iter().find(|p| p.slug == slug)
    }

    /// Every post, newest first
    ///
    /// Posts whose date does not parse go last; equal dates keep manifest
    /// order.
    pub fn list_all(&self) -> Vec<PostMetadata> {
        let mut posts = self.manifest.posts.clone();
        posts.sort_by(|a, b| {
            match (a.frontmatter.parsed_date(), b.frontmatter.parsed_date()) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        posts
    }

    pub fn len(&self) -> usize {
        self.manifest.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.posts.is_empty()
    }
}
