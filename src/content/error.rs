//! Content pipeline errors

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing a single header block
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("line {line}: DisplayPriority `{value}` is not an integer")]
    InvalidPriority {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("header has neither a Title nor a Link")]
    MissingLink,
}

/// Errors raised by the content index and renderer
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("cannot scan posts directory `{}`", .dir.display())]
    FileScan {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid header in `{}`", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: HeaderError,
    },

    #[error("link `{link}` of `{}` is already used by `{}`", .duplicate.display(), .first.display())]
    DuplicateLink {
        link: String,
        first: PathBuf,
        duplicate: PathBuf,
    },

    #[error("no post found for `{0}`")]
    NotFound(String),

    #[error("article `{}` is unavailable", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read about page `{}`", .path.display())]
    About {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Whether this error is a lookup miss rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}
