//! List posts, newest first

use anyhow::Result;

use crate::view;
use crate::Blog;

/// Print the index view
pub async fn run(blog: &Blog) -> Result<()> {
    let loader = blog.loader()?;
    let index = view::index_view(&loader, &blog.view_settings()).await;
    print!("{}", super::format_index(&index));
    Ok(())
}
