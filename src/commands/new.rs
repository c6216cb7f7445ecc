//! Create a new post

use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Header fields written for a new post, in order
const NEW_POST_FIELDS: [&str; 8] = [
    "Title",
    "Link",
    "Summary",
    "Keywords",
    "CreationDate",
    "Author",
    "ArticleId",
    "DisplayPriority",
];

/// Create a new post with an empty header block and return its path
pub fn create_post(blog: &Blog, title: &str) -> Result<PathBuf> {
    let header_lines = blog.config.header_lines;
    if title.trim().is_empty() {
        bail!("A post needs a title");
    }
    if header_lines < 2 {
        bail!(
            "header_lines is {}, too small to hold Title and CreationDate",
            header_lines
        );
    }

    let posts_dir = blog.settings().posts_dir;
    fs::create_dir_all(&posts_dir)?;

    let filename = format!("{}.{}", slug::slugify(title), extension(blog));
    let file_path = posts_dir.join(&filename);
    if file_path.exists() {
        bail!("Post already exists: {:?}", file_path);
    }

    let content = format!("{}\n# {}\n", header_block(title, header_lines), title);
    fs::write(&file_path, content)?;

    println!("Created: {}", file_path.display());
    tracing::info!("Created new post at {:?}", file_path);

    Ok(file_path)
}

/// Render a header block of exactly `header_lines` lines
fn header_block(title: &str, header_lines: usize) -> String {
    let now = chrono::Local::now();
    let mut lines: Vec<String> = NEW_POST_FIELDS
        .iter()
        .map(|field| match *field {
            "Title" => format!("Title:{}", title.trim()),
            "CreationDate" => format!("CreationDate:{}", now.format("%Y-%m-%d")),
            "DisplayPriority" => "DisplayPriority:0".to_string(),
            other => format!("{}:", other),
        })
        .collect();

    // Title and CreationDate always survive a short block
    if header_lines < lines.len() {
        lines.retain(|l| l.starts_with("Title:") || l.starts_with("CreationDate:"));
        let optional = NEW_POST_FIELDS
            .iter()
            .filter(|f| **f != "Title" && **f != "CreationDate")
            .take(header_lines - lines.len())
            .map(|f| format!("{}:", f));
        lines.extend(optional);
    }
    lines.resize(header_lines, String::new());

    lines.join("\n")
}

fn extension(blog: &Blog) -> &str {
    blog.config
        .post_extension
        .trim_start_matches('*')
        .trim_start_matches('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{HeaderBlock, HeaderParser};
    use tempfile::TempDir;

    #[test]
    fn test_header_block_padded() {
        let block = header_block("Hello World", 9);
        assert_eq!(block.lines().count(), 8);
        assert_eq!(block.split('\n').count(), 9);
        assert!(block.starts_with("Title:Hello World\n"));
    }

    #[test]
    fn test_header_block_truncated_keeps_title() {
        let block = header_block("T", 3);
        let lines: Vec<_> = block.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Title:T");
        assert!(lines[1].starts_with("CreationDate:"));
        assert_eq!(lines[2], "Link:");
    }

    #[test]
    fn test_created_post_parses() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let path = create_post(&blog, "My First Post").unwrap();

        assert!(path.ends_with("my-first-post.md"));
        let content = fs::read_to_string(&path).unwrap();
        let block = HeaderBlock::split(&content, blog.config.header_lines);
        let header = HeaderParser::parse(&block.lines).unwrap();
        assert_eq!(header.title, "My First Post");
        assert_eq!(header.link, "My-First-Post");
        assert_eq!(block.body, "# My First Post\n");

        assert!(create_post(&blog, "My First Post").is_err());
    }
}
