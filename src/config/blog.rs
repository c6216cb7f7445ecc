//! Blog configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Directory
    pub posts_dir: String,
    pub post_extension: String,
    pub about_path: String,

    // Header block
    /// Number of leading lines reserved for `Field:Value` headers
    pub header_lines: usize,

    // Index
    pub lookup: LookupMode,
    pub duplicate_links: DuplicatePolicy,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            posts_dir: "data/posts".to_string(),
            post_extension: "md".to_string(),
            about_path: "data/about/about.md".to_string(),
            header_lines: 9,
            lookup: LookupMode::Link,
            duplicate_links: DuplicatePolicy::Skip,
            highlight: HighlightConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: BlogConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

/// How request identifiers are resolved to posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Identifier is a link slug
    Link,
    /// Identifier is a fragment of the post's file path
    Address,
}

/// What to do when two posts resolve to the same link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first post in scan order, record an error for the rest
    Skip,
    /// Fail the whole index build
    Abort,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.posts_dir, "data/posts");
        assert_eq!(config.header_lines, 9);
        assert_eq!(config.lookup, LookupMode::Link);
        assert_eq!(config.duplicate_links, DuplicatePolicy::Skip);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
posts_dir: content/posts
header_lines: 6
lookup: address
duplicate_links: abort
highlight:
  line_number: true
"#;
        let config: BlogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.posts_dir, "content/posts");
        assert_eq!(config.post_extension, "md");
        assert_eq!(config.header_lines, 6);
        assert_eq!(config.lookup, LookupMode::Address);
        assert_eq!(config.duplicate_links, DuplicatePolicy::Abort);
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }
}
