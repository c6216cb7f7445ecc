//! Content module - header parsing, post index and article rendering

mod article;
mod error;
mod header;
mod index;
mod initializer;
mod markdown;
mod post;
mod source;

pub use article::{Article, ArticleFields, ArticleRenderer};
pub use error::{ContentError, HeaderError};
pub use header::{split_field, HeaderBlock, HeaderParser, PostHeader};
pub use index::ContentIndex;
pub use initializer::{error_chain, ContentInitializer, ContentSettings, IndexReport, RenderedArticle};
pub use markdown::{html_escape, MarkdownRenderer, RenderMarkdown};
pub use post::{normalize_link, Post};
pub use source::{has_extension, ContentSource, FsSource};
