//! Render a single article to stdout

use anyhow::Result;

use crate::Blog;

/// Print the rendered HTML body of the post matching `identifier`
pub fn run(blog: &Blog, identifier: &str) -> Result<()> {
    let content = blog.initialize()?;
    let article = content.render_article(identifier)?;

    tracing::debug!("Rendering {:?}", article.post.address);
    print!("{}", article.html);

    Ok(())
}
