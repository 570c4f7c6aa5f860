//! Print a post's table of contents

use anyhow::{bail, Result};

use crate::view::{self, PostView};
use crate::Blog;

/// Print one `id  text` line per heading
pub async fn run(blog: &Blog, slug: &str) -> Result<()> {
    let loader = blog.loader()?;
    let post = view::post_view(&loader, slug, &blog.view_settings()).await;

    let page = match post {
        PostView::Ready(page) => page,
        PostView::NotFound { slug } => bail!("Blog post '{}' not found", slug),
        PostView::ContentUnavailable { metadata } => bail!(
            "Failed to load content for \"{}\"",
            metadata.frontmatter.title
        ),
    };

    if page.toc.is_empty() {
        println!("No table of contents available");
    }
    let width = page.toc.iter().map(|e| e.id.len()).max().unwrap_or(0);
    for entry in &page.toc {
        println!("{:width$}  {}", entry.id, entry.text, width = width);
    }
    Ok(())
}
