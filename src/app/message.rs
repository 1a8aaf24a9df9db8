// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::Post;
use crate::error::Error;
use crate::ui::{composer, navbar, notifications, post_card, search};

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Composer(composer::Message),
    Search(search::Message),
    PostCard(post_card::Message),
    Navbar(navbar::Message),
    Notification(notifications::Message),
    /// Resolved initial or retried feed fetch.
    FeedLoaded(Result<Vec<Post>, Error>),
    /// Retry button on the feed-unavailable view.
    RetryFeedPressed,
    /// Resolved avatar fetch for a server-relative path.
    AvatarFetched {
        path: String,
        result: Result<Vec<u8>, Error>,
    },
}

/// Launch parameters resolved by `main.rs` from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Locale override, e.g. `fr`.
    pub lang: Option<String>,
    /// API base URL override for self-hosted backends.
    pub api_url: Option<String>,
}
