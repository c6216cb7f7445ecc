//! Startup content initialization
//!
//! Scans the posts directory, parses each header block into the index and
//! renders the about page once. After construction the index and the about
//! page are only read; `rebuild` swaps in a whole new index.

use arc_swap::ArcSwap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::article::{ArticleFields, ArticleRenderer};
use super::error::ContentError;
use super::header::{HeaderBlock, HeaderParser};
use super::index::ContentIndex;
use super::markdown::{MarkdownRenderer, RenderMarkdown};
use super::post::Post;
use super::source::{ContentSource, FsSource};
use crate::config::{BlogConfig, DuplicatePolicy, LookupMode};

/// Resolved settings for the content pipeline
#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub posts_dir: PathBuf,
    pub post_extension: String,
    pub about_path: PathBuf,
    pub header_lines: usize,
    pub lookup: LookupMode,
    pub duplicate_links: DuplicatePolicy,
}

impl ContentSettings {
    /// Resolve configured paths against `base_dir`
    pub fn from_config(base_dir: &Path, config: &BlogConfig) -> Self {
        Self {
            posts_dir: base_dir.join(&config.posts_dir),
            post_extension: config.post_extension.clone(),
            about_path: base_dir.join(&config.about_path),
            header_lines: config.header_lines,
            lookup: config.lookup,
            duplicate_links: config.duplicate_links,
        }
    }
}

/// Files left out of the last index build, with the reason
#[derive(Debug, Default)]
pub struct IndexReport {
    pub excluded: Vec<ContentError>,
}

impl IndexReport {
    pub fn is_clean(&self) -> bool {
        self.excluded.is_empty()
    }
}

/// An article ready for display
#[derive(Debug, Clone, Serialize)]
pub struct RenderedArticle {
    pub post: Post,
    pub html: String,
    pub fields: ArticleFields,
}

/// Owns the post index and the cached about page
pub struct ContentInitializer {
    settings: ContentSettings,
    source: Arc<dyn ContentSource>,
    renderer: ArticleRenderer,
    index: ArcSwap<ContentIndex>,
    report: ArcSwap<IndexReport>,
    about: String,
}

impl ContentInitializer {
    /// Build the index and the about page from the local filesystem
    pub fn from_fs(
        settings: ContentSettings,
        markdown: MarkdownRenderer,
    ) -> Result<Self, ContentError> {
        Self::new(settings, Arc::new(FsSource), Arc::new(markdown))
    }

    /// Build the index and the about page.
    ///
    /// Fails when the posts directory cannot be scanned, when the about page
    /// cannot be read, or on a duplicate link under `DuplicatePolicy::Abort`.
    /// Individual posts with bad headers are excluded and reported instead.
    pub fn new(
        settings: ContentSettings,
        source: Arc<dyn ContentSource>,
        markdown: Arc<dyn RenderMarkdown>,
    ) -> Result<Self, ContentError> {
        let renderer = ArticleRenderer::new(Arc::clone(&source), markdown);
        let mut initializer = Self {
            settings,
            source,
            renderer,
            index: ArcSwap::from_pointee(ContentIndex::default()),
            report: ArcSwap::from_pointee(IndexReport::default()),
            about: String::new(),
        };

        initializer.rebuild()?;
        initializer.about = initializer.build_about_page()?;

        Ok(initializer)
    }

    /// Scan the posts directory and build a fresh index.
    ///
    /// The result is not published; see [`ContentInitializer::rebuild`].
    pub fn build_index(&self) -> Result<(ContentIndex, IndexReport), ContentError> {
        let dir = &self.settings.posts_dir;
        let files = self
            .source
            .list_files(dir, &self.settings.post_extension)
            .map_err(|source| ContentError::FileScan {
                dir: dir.clone(),
                source,
            })?;

        let mut posts = Vec::with_capacity(files.len());
        let mut report = IndexReport::default();

        for path in files {
            match self.load_post(&path) {
                Ok(post) => {
                    tracing::debug!("Indexed {:?} as `{}`", path, post.link);
                    posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Skipping post: {}", error_chain(&e));
                    report.excluded.push(e);
                }
            }
        }

        let (index, duplicates) = ContentIndex::build(posts, self.settings.duplicate_links)?;
        report.excluded.extend(duplicates);

        tracing::info!(
            "Indexed {} posts from {:?} ({} excluded)",
            index.len(),
            dir,
            report.excluded.len()
        );

        Ok((index, report))
    }

    /// Build a new index and publish it atomically
    pub fn rebuild(&self) -> Result<Arc<IndexReport>, ContentError> {
        let (index, report) = self.build_index()?;
        let report = Arc::new(report);
        self.index.store(Arc::new(index));
        self.report.store(Arc::clone(&report));
        Ok(report)
    }

    /// Render the about file as plain Markdown
    pub fn build_about_page(&self) -> Result<String, ContentError> {
        let path = &self.settings.about_path;
        self.renderer.render_full(path).map_err(|e| match e {
            ContentError::Unavailable { path, source } => ContentError::About { path, source },
            other => other,
        })
    }

    /// Parse the header block of one post file
    fn load_post(&self, path: &Path) -> Result<Post, ContentError> {
        let content =
            self.source
                .read_to_string(path)
                .map_err(|source| ContentError::Unavailable {
                    path: path.to_path_buf(),
                    source,
                })?;

        let block = HeaderBlock::split(&content, self.settings.header_lines);
        let header = HeaderParser::parse(&block.lines).map_err(|source| ContentError::Header {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Post::from_header(path, header))
    }

    /// Current index snapshot
    pub fn index(&self) -> Arc<ContentIndex> {
        self.index.load_full()
    }

    /// Report of the most recent index build
    pub fn report(&self) -> Arc<IndexReport> {
        self.report.load_full()
    }

    pub fn settings(&self) -> &ContentSettings {
        &self.settings
    }

    /// Posts for the landing page, highest priority first
    pub fn landing_page_content(&self) -> Vec<Post> {
        self.index.load().list().cloned().collect()
    }

    /// The about page HTML rendered at startup
    pub fn about_page_content(&self) -> &str {
        &self.about
    }

    /// Find a post by link or by path fragment, depending on the lookup mode
    pub fn find_blog_header_info(&self, identifier: &str) -> Result<Post, ContentError> {
        let index = self.index.load();
        let post = match self.settings.lookup {
            LookupMode::Link => index.find_by_link(identifier)?,
            LookupMode::Address => index.find_by_address_substring(identifier)?,
        };
        Ok(post.clone())
    }

    /// The identifier that `find_blog_header_info` resolves back to `post`.
    ///
    /// In address mode this is the posts directory name joined with the file
    /// name; every post sits directly in that directory, so the fragment
    /// matches exactly one address.
    pub fn identifier_for(&self, post: &Post) -> String {
        match self.settings.lookup {
            LookupMode::Link => post.link.clone(),
            LookupMode::Address => {
                let file_name = post.address.file_name().map(|n| n.to_string_lossy());
                let dir_name = post
                    .address
                    .parent()
                    .and_then(Path::file_name)
                    .map(|n| n.to_string_lossy());
                match (dir_name, file_name) {
                    (Some(dir), Some(file)) => format!("{}/{}", dir, file),
                    (None, Some(file)) => file.to_string(),
                    _ => post.address.to_string_lossy().to_string(),
                }
            }
        }
    }

    /// Look up a post and render its body with display fields
    pub fn render_article(&self, identifier: &str) -> Result<RenderedArticle, ContentError> {
        let post = self.find_blog_header_info(identifier)?;
        let article = self
            .renderer
            .render(&post.address, self.settings.header_lines, true)?;

        Ok(RenderedArticle {
            post,
            html: article.html,
            fields: article.fields.unwrap_or_default(),
        })
    }
}

/// Flatten an error and its sources into one line for logging
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site(posts: &[(&str, &str)], about: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        let posts_dir = dir.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        for (name, content) in posts {
            fs::write(posts_dir.join(name), content).unwrap();
        }
        if let Some(about) = about {
            fs::write(dir.path().join("about.md"), about).unwrap();
        }
        dir
    }

    fn settings(dir: &Path, header_lines: usize) -> ContentSettings {
        ContentSettings {
            posts_dir: dir.join("posts"),
            post_extension: "md".to_string(),
            about_path: dir.join("about.md"),
            header_lines,
            lookup: LookupMode::Link,
            duplicate_links: DuplicatePolicy::Skip,
        }
    }

    #[test]
    fn test_bad_priority_is_excluded() {
        let dir = site(
            &[
                ("a.md", "Title:Good\nDisplayPriority:1\nbody"),
                ("b.md", "Title:Bad\nDisplayPriority:x\nbody"),
            ],
            Some("# About"),
        );
        let init = ContentInitializer::from_fs(settings(dir.path(), 2), MarkdownRenderer::new())
            .unwrap();

        let titles: Vec<_> = init
            .landing_page_content()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Good"]);

        let report = init.report();
        assert_eq!(report.excluded.len(), 1);
        assert!(matches!(
            &report.excluded[0],
            ContentError::Header { path, .. } if path.ends_with("b.md")
        ));
    }

    #[test]
    fn test_missing_posts_dir_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("about.md"), "about").unwrap();
        let err = ContentInitializer::from_fs(settings(dir.path(), 9), MarkdownRenderer::new())
            .err()
            .unwrap();
        assert!(matches!(err, ContentError::FileScan { .. }));
    }

    #[test]
    fn test_missing_about_is_fatal() {
        let dir = site(&[], None);
        let err = ContentInitializer::from_fs(settings(dir.path(), 9), MarkdownRenderer::new())
            .err()
            .unwrap();
        assert!(matches!(err, ContentError::About { .. }));
    }

    #[test]
    fn test_address_lookup_mode() {
        let dir = site(&[("rust-notes.md", "Title:Notes\nbody")], Some("about"));
        let mut s = settings(dir.path(), 1);
        s.lookup = LookupMode::Address;
        let init = ContentInitializer::from_fs(s, MarkdownRenderer::new()).unwrap();

        assert_eq!(init.find_blog_header_info("rust-notes").unwrap().title, "Notes");
        assert!(init.find_blog_header_info("Notes").unwrap_err().is_not_found());
    }

    #[test]
    fn test_identifier_round_trips_in_both_modes() {
        let dir = site(
            &[
                ("a.md", "Title:Hello World\nbody"),
                ("data.md", "Title:Data\nbody"),
                ("xa.md", "Title:Xa\nbody"),
            ],
            Some("about"),
        );
        for lookup in [LookupMode::Link, LookupMode::Address] {
            let mut s = settings(dir.path(), 1);
            s.lookup = lookup;
            let init = ContentInitializer::from_fs(s, MarkdownRenderer::new()).unwrap();
            for post in init.landing_page_content() {
                let identifier = init.identifier_for(&post);
                assert_eq!(init.find_blog_header_info(&identifier).unwrap(), post);
            }
        }
    }

    #[test]
    fn test_address_identifier_is_dir_and_file_name() {
        let dir = site(&[("a.md", "Title:Hello World\nbody")], Some("about"));
        let mut s = settings(dir.path(), 1);
        s.lookup = LookupMode::Address;
        let init = ContentInitializer::from_fs(s, MarkdownRenderer::new()).unwrap();

        let post = init.find_blog_header_info("a.md").unwrap();
        assert_eq!(init.identifier_for(&post), "posts/a.md");
    }

    #[test]
    fn test_render_article_after_file_removed() {
        let dir = site(&[("a.md", "Title:Gone Soon\nbody")], Some("about"));
        let init = ContentInitializer::from_fs(settings(dir.path(), 1), MarkdownRenderer::new())
            .unwrap();

        assert!(init.render_article("Gone-Soon").is_ok());
        fs::remove_file(dir.path().join("posts/a.md")).unwrap();
        assert!(matches!(
            init.render_article("Gone-Soon").unwrap_err(),
            ContentError::Unavailable { .. }
        ));
    }

    #[test]
    fn test_rebuild_swaps_index() {
        let dir = site(&[("a.md", "Title:First\nbody")], Some("about"));
        let init = ContentInitializer::from_fs(settings(dir.path(), 1), MarkdownRenderer::new())
            .unwrap();
        let before = init.index();

        fs::write(dir.path().join("posts/b.md"), "Title:Second\nbody").unwrap();
        init.rebuild().unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(init.index().len(), 2);
        assert!(init.find_blog_header_info("Second").is_ok());
    }

    #[test]
    fn test_error_chain() {
        let err = HeaderParser::parse(&["Title:T", "DisplayPriority:x"]).unwrap_err();
        let err = ContentError::Header {
            path: PathBuf::from("p.md"),
            source: err,
        };
        let message = error_chain(&err);
        assert!(message.starts_with("invalid header in `p.md`: line 2"));
        assert!(message.contains("invalid digit"));
    }
}
