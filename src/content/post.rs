//! Post model

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::header::PostHeader;

/// A blog post, identified by its source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Source file path, used to re-read the body
    pub address: PathBuf,

    /// Post title
    pub title: String,

    /// URL-safe slug, unique across the index
    pub link: String,

    pub summary: String,
    pub author: String,
    pub creation_date: String,
    pub keywords: Vec<String>,
    pub article_id: String,

    /// Higher values sort first on the landing page
    pub display_priority: i32,
}

impl Post {
    /// Build a post from a parsed header block
    pub fn from_header(address: impl Into<PathBuf>, header: PostHeader) -> Self {
        Self {
            address: address.into(),
            title: header.title,
            link: header.link,
            summary: header.summary,
            author: header.author,
            creation_date: header.creation_date,
            keywords: header.keywords,
            article_id: header.article_id,
            display_priority: header.display_priority,
        }
    }
}

/// Normalize a title or explicit link into a link slug
pub fn normalize_link(value: &str) -> String {
    value.trim().replace(' ', "-")
}
