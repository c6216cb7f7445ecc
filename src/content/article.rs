//! Article page rendering

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use super::error::ContentError;
use super::header::{split_field, HeaderBlock};
use super::markdown::RenderMarkdown;
use super::source::ContentSource;

/// Display fields read from an article's header block.
///
/// Unlike the index header these are never validated; the article page
/// only shows them next to the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleFields {
    pub title: String,
    pub summary: String,
    /// Raw keyword list, as written (used for `<meta name="keywords">`)
    pub keywords: String,
    pub author: String,
    pub article_id: String,
}

impl ArticleFields {
    /// Extract display fields line by line, ignoring anything unrecognised
    pub fn parse(lines: &[&str]) -> Self {
        let mut fields = Self::default();
        for line in lines {
            let Some((name, value)) = split_field(line) else {
                continue;
            };
            let slot = match name {
                "Title" => &mut fields.title,
                "Summary" => &mut fields.summary,
                "Keywords" => &mut fields.keywords,
                "Author" => &mut fields.author,
                "ArticleId" => &mut fields.article_id,
                _ => continue,
            };
            *slot = value.to_string();
        }
        fields
    }
}

/// A rendered article body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub html: String,
    pub fields: Option<ArticleFields>,
}

/// Renders post bodies on demand
#[derive(Clone)]
pub struct ArticleRenderer {
    source: Arc<dyn ContentSource>,
    markdown: Arc<dyn RenderMarkdown>,
}

impl ArticleRenderer {
    pub fn new(source: Arc<dyn ContentSource>, markdown: Arc<dyn RenderMarkdown>) -> Self {
        Self { source, markdown }
    }

    /// Read `path`, skip `header_lines` lines and render the rest.
    ///
    /// With `with_fields` the header block is also read for display fields.
    pub fn render(
        &self,
        path: &Path,
        header_lines: usize,
        with_fields: bool,
    ) -> Result<Article, ContentError> {
        let content =
            self.source
                .read_to_string(path)
                .map_err(|source| ContentError::Unavailable {
                    path: path.to_path_buf(),
                    source,
                })?;

        let block = HeaderBlock::split(&content, header_lines);
        let fields = with_fields.then(|| ArticleFields::parse(&block.lines));
        let html = self.markdown.render(block.body);

        Ok(Article { html, fields })
    }

    /// Render a whole file as Markdown, with no header block
    pub fn render_full(&self, path: &Path) -> Result<String, ContentError> {
        self.render(path, 0, false).map(|article| article.html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::markdown::MarkdownRenderer;
    use crate::content::source::FsSource;
    use std::fs;
    use tempfile::TempDir;

    fn renderer() -> ArticleRenderer {
        ArticleRenderer::new(Arc::new(FsSource), Arc::new(MarkdownRenderer::new()))
    }

    #[test]
    fn test_article_fields_parse() {
        let lines = [
            "Title:Post",
            "Summary:About: things",
            "Keywords:a, b",
            "Author:Kim",
            "ArticleId:7",
            "DisplayPriority:not a number",
        ];
        let fields = ArticleFields::parse(&lines);
        assert_eq!(fields.title, "Post");
        assert_eq!(fields.summary, "About: things");
        assert_eq!(fields.keywords, "a, b");
        assert_eq!(fields.author, "Kim");
        assert_eq!(fields.article_id, "7");
    }

    #[test]
    fn test_render_skips_header_block() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        fs::write(&path, "Title:Post\nAuthor:Kim\n# Body\n\ntext\n").unwrap();

        let article = renderer().render(&path, 2, true).unwrap();
        assert!(article.html.contains("<h1>Body</h1>"));
        assert!(!article.html.contains("Author"));
        assert_eq!(article.fields.unwrap().author, "Kim");
    }

    #[test]
    fn test_render_without_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        fs::write(&path, "Title:Post\nbody\n").unwrap();

        let article = renderer().render(&path, 1, false).unwrap();
        assert!(article.fields.is_none());
        assert_eq!(article.html, "<p>body</p>\n");
    }

    #[test]
    fn test_render_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = renderer()
            .render(&dir.path().join("gone.md"), 9, false)
            .unwrap_err();
        assert!(matches!(err, ContentError::Unavailable { .. }));
    }

    #[test]
    fn test_render_same_file_twice_is_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        fs::write(&path, "Title:Post\n\nSome *emphasis* and `code`.\n").unwrap();

        let r = renderer();
        assert_eq!(r.render(&path, 1, true).unwrap(), r.render(&path, 1, true).unwrap());
    }
}
