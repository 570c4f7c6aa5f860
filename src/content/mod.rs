//! Content module - manifest, post bodies, slugs, tables of contents

mod frontmatter;
mod loader;
mod manifest;
mod post;
mod reading;
mod slug;
mod source;
mod toc;

pub use frontmatter::{parse_frontmatter, split_frontmatter, strip_frontmatter};
pub use loader::ContentLoader;
pub use manifest::{Manifest, ManifestReader};
pub use post::{parse_date_string, Frontmatter, Post, PostMetadata};
pub use reading::{count_words, ReadingConfig};
pub use slug::slugify;
pub use source::{ContentSource, FsSource, HttpSource, MemorySource};
pub(crate) use source::PATH_SEGMENT;
pub use toc::{build_toc, heading_id, TocEntry};
