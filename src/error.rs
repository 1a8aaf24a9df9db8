// SPDX-License-Identifier: MPL-2.0
//! Application-wide error taxonomy.
//!
//! Network failures are converted into `Error` at the boundary of the
//! operation that issued them; none propagate uncaught into rendering.
//! The defensive variants (`DuplicateId`, `NotFound`, `IndexOutOfRange`)
//! signal internal invariant violations and are logged, never fatal.

use crate::domain::PostId;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// File system failure (config, persisted state, media read).
    Io(String),
    /// Configuration could not be parsed or written.
    Config(String),
    /// A fetch, submission, or search request failed.
    Network(String),
    /// Submit was called with blank content and no media drafts.
    EmptyPost,
    /// Submit was called while a previous submission is unresolved.
    AlreadySubmitting,
    /// A post with this identifier is already present in the feed.
    DuplicateId(PostId),
    /// No post with this identifier is present in the feed.
    NotFound(PostId),
    /// A media draft index is outside the draft list.
    IndexOutOfRange { index: usize, len: usize },
}

impl Error {
    /// Returns the i18n message key used when surfacing this error as a
    /// notification or inline message.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Network(_) => "error-network",
            Error::EmptyPost => "error-empty-post",
            Error::AlreadySubmitting => "error-already-submitting",
            Error::DuplicateId(_) => "error-duplicate-post",
            Error::NotFound(_) => "error-post-not-found",
            Error::IndexOutOfRange { .. } => "error-draft-index",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "I/O error: {msg}"),
            Error::Config(msg) => write!(f, "Configuration error: {msg}"),
            Error::Network(msg) => write!(f, "Network error: {msg}"),
            Error::EmptyPost => write!(f, "Post has no content and no media"),
            Error::AlreadySubmitting => write!(f, "A submission is already in flight"),
            Error::DuplicateId(id) => write!(f, "Post {id} is already in the feed"),
            Error::NotFound(id) => write!(f, "Post {id} is not in the feed"),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "Draft index {index} out of range (len {len})")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}
