//! Content loader - resolves a slug to a post with its body attached

use std::sync::Arc;

use super::{ContentSource, ManifestReader, Post, PostMetadata};

/// Loads posts by combining manifest metadata with bodies from a source
///
/// Nothing is cached: every [`ContentLoader::load_post`] call goes back to the
/// source, so edits to post files show up on the next load.
#[derive(Clone)]
pub struct ContentLoader {
    manifest: Arc<ManifestReader>,
    source: Arc<dyn ContentSource>,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(manifest: Arc<ManifestReader>, source: Arc<dyn ContentSource>) -> Self {
        Self { manifest, source }
    }

    pub fn manifest(&self) -> &ManifestReader {
        &self.manifest
    }

    /// Every post's metadata, newest first
    pub async fn all_posts(&self) -> Vec<PostMetadata> {
        self.manifest.list_all()
    }

    /// Load a single post by slug
    ///
    /// Returns `None` when the slug is not in the manifest. When the body
    /// cannot be retrieved the post is still returned, without content, so
    /// the caller can show its metadata.
    pub async fn load_post(&self, slug: &str) -> Option<Post> {
        let Some(metadata) = self.manifest.find_by_slug(slug).cloned() else {
            tracing::warn!("Post with slug {:?} not found in manifest", slug);
            return None;
        };

        match self.source.fetch(&metadata.filename).await {
            Ok(content) => Some(Post::with_content(metadata, content)),
            Err(e) => {
                tracing::warn!(
                    "Error loading content for {:?} from {}: {}",
                    slug,
                    self.source.describe(),
                    e
                );
                Some(Post::metadata_only(metadata))
            }
        }
    }
}
