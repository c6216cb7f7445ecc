//! In-memory post index
//!
//! Built once from a scan and never mutated afterwards. A rebuild produces
//! a fresh `ContentIndex` that replaces the old one as a whole.

use std::collections::HashMap;

use super::error::ContentError;
use super::post::Post;
use crate::config::DuplicatePolicy;

/// Immutable set of posts keyed by link
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    /// Posts in scan order
    posts: Vec<Post>,
    /// Positions into `posts`, by display priority (descending, stable)
    listing: Vec<usize>,
    by_link: HashMap<String, usize>,
}

impl ContentIndex {
    /// Build an index from posts in scan order.
    ///
    /// Duplicate links are handled according to `policy`: `Skip` keeps the
    /// first post and returns an error per dropped post, `Abort` fails.
    pub fn build(
        posts: Vec<Post>,
        policy: DuplicatePolicy,
    ) -> Result<(Self, Vec<ContentError>), ContentError> {
        let mut kept: Vec<Post> = Vec::with_capacity(posts.len());
        let mut by_link = HashMap::with_capacity(posts.len());
        let mut rejected = Vec::new();

        for post in posts {
            if let Some(&existing) = by_link.get(&post.link) {
                let first: &Post = &kept[existing];
                let err = ContentError::DuplicateLink {
                    link: post.link.clone(),
                    first: first.address.clone(),
                    duplicate: post.address.clone(),
                };
                match policy {
                    DuplicatePolicy::Abort => return Err(err),
                    DuplicatePolicy::Skip => {
                        tracing::warn!("{}", err);
                        rejected.push(err);
                        continue;
                    }
                }
            }
            by_link.insert(post.link.clone(), kept.len());
            kept.push(post);
        }

        let mut listing: Vec<usize> = (0..kept.len()).collect();
        // sort_by is stable, so equal priorities keep scan order
        listing.sort_by(|&a, &b| kept[b].display_priority.cmp(&kept[a].display_priority));

        Ok((
            Self {
                posts: kept,
                listing,
                by_link,
            },
            rejected,
        ))
    }

    /// Posts ordered for the landing page
    pub fn list(&self) -> impl ExactSizeIterator<Item = &Post> + '_ {
        self.listing.iter().map(move |&i| &self.posts[i])
    }

    /// Find a post by its link slug
    pub fn find_by_link(&self, link: &str) -> Result<&Post, ContentError> {
        self.by_link
            .get(link)
            .map(|&i| &self.posts[i])
            .ok_or_else(|| ContentError::NotFound(link.to_string()))
    }

    /// Find the first post, in scan order, whose path contains `fragment`
    pub fn find_by_address_substring(&self, fragment: &str) -> Result<&Post, ContentError> {
        self.posts
            .iter()
            .find(|p| p.address.to_string_lossy().contains(fragment))
            .ok_or_else(|| ContentError::NotFound(fragment.to_string()))
    }

    /// Posts in scan order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
