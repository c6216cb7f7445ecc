//! List indexed posts

use anyhow::Result;
use serde::Serialize;

use crate::content::{error_chain, Post};
use crate::Blog;

#[derive(Serialize)]
struct Listing<'a> {
    posts: &'a [Post],
    excluded: Vec<String>,
}

/// Print posts in landing-page order, followed by any excluded files
pub fn run(blog: &Blog, json: bool) -> Result<()> {
    let content = blog.initialize()?;
    let posts = content.landing_page_content();
    let excluded: Vec<String> = content
        .report()
        .excluded
        .iter()
        .map(|e| error_chain(e))
        .collect();

    if json {
        let listing = Listing {
            posts: &posts,
            excluded,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!(
            "  [{:>3}] {} - {} ({})",
            post.display_priority,
            post.creation_date.trim(),
            post.title.trim(),
            post.link
        );
    }

    if !excluded.is_empty() {
        println!("Excluded ({}):", excluded.len());
        for reason in &excluded {
            println!("  {}", reason);
        }
    }

    Ok(())
}
