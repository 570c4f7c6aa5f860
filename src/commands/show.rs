//! Show a single post

use anyhow::{bail, Result};

use crate::render::{MarkdownRenderer, PlainElements};
use crate::view::{self, PostView};
use crate::Blog;

/// Print a post as text, or its body as HTML
pub async fn run(blog: &Blog, slug: &str, html: bool) -> Result<()> {
    let loader = blog.loader()?;
    let post = view::post_view(&loader, slug, &blog.view_settings()).await;
    let plain = MarkdownRenderer::new(PlainElements);

    match &post {
        PostView::Ready(page) if html => {
            println!("{}", blog.markdown_renderer().render(&page.body));
        }
        PostView::Ready(_) => print!("{}", super::format_post(&post, &plain)),
        _ => bail!("{}", super::format_post(&post, &plain).trim_end()),
    }
    Ok(())
}
