//! Header block parsing
//!
//! Every post starts with a fixed number of `FieldName:Value` lines. The
//! block length is shared configuration between whoever writes posts and
//! this parser; everything after it is Markdown body.

use serde::{Deserialize, Serialize};

use super::error::HeaderError;
use super::post::normalize_link;

/// A document split at the header boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock<'a> {
    /// The header lines, without line terminators
    pub lines: Vec<&'a str>,
    /// Everything after the header block, untouched
    pub body: &'a str,
}

impl<'a> HeaderBlock<'a> {
    /// Split `content` after exactly `header_lines` lines.
    ///
    /// A document shorter than the block yields all of its lines as header
    /// and an empty body. A leading byte-order mark is dropped.
    pub fn split(content: &'a str, header_lines: usize) -> Self {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
        let mut lines = Vec::with_capacity(header_lines);
        let mut body_start = 0;

        for raw in content.split_inclusive('\n').take(header_lines) {
            body_start += raw.len();
            lines.push(raw.trim_end_matches('\n').trim_end_matches('\r'));
        }

        Self {
            lines,
            body: &content[body_start..],
        }
    }
}

/// Split a header line on its first colon.
///
/// Returns `None` for lines without a colon.
pub fn split_field(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end_matches('\r');
    line.split_once(':')
}

/// Fields recognised in a post header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Summary,
    Keywords,
    CreationDate,
    Author,
    ArticleId,
    DisplayPriority,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Title" => Some(Field::Title),
            "Link" => Some(Field::Link),
            "Summary" => Some(Field::Summary),
            "Keywords" => Some(Field::Keywords),
            "CreationDate" => Some(Field::CreationDate),
            "Author" => Some(Field::Author),
            "ArticleId" => Some(Field::ArticleId),
            "DisplayPriority" => Some(Field::DisplayPriority),
            _ => None,
        }
    }
}

/// Header data of a post, before it is bound to a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostHeader {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub creation_date: String,
    pub author: String,
    pub article_id: String,
    pub display_priority: i32,
}

/// Parser for the fixed-format post header
pub struct HeaderParser;

impl HeaderParser {
    /// Parse the header block of one post.
    ///
    /// Unknown field names and lines without a colon are ignored. When no
    /// `Link` is given it is derived from the title.
    pub fn parse(lines: &[&str]) -> Result<PostHeader, HeaderError> {
        let mut header = PostHeader::default();
        let mut explicit_link = None;

        for (index, line) in lines.iter().enumerate() {
            let Some((name, value)) = split_field(line) else {
                continue;
            };
            let Some(field) = Field::from_name(name) else {
                continue;
            };

            match field {
                Field::Title => header.title = value.to_string(),
                Field::Link => explicit_link = Some(normalize_link(value)),
                Field::Summary => header.summary = value.to_string(),
                Field::Keywords => header.keywords = parse_keywords(value),
                Field::CreationDate => header.creation_date = value.to_string(),
                Field::Author => header.author = value.to_string(),
                Field::ArticleId => header.article_id = value.to_string(),
                Field::DisplayPriority => {
                    header.display_priority = value.trim().parse().map_err(|source| {
                        HeaderError::InvalidPriority {
                            line: index + 1,
                            value: value.to_string(),
                            source,
                        }
                    })?;
                }
            }
        }

        header.link = explicit_link
            .filter(|link| !link.is_empty())
            .unwrap_or_else(|| normalize_link(&header.title));

        if header.link.is_empty() {
            return Err(HeaderError::MissingLink);
        }

        Ok(header)
    }
}

/// Comma-separated keyword list, in order, items kept verbatim
fn parse_keywords(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::to_string).collect()
}
