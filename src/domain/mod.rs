// SPDX-License-Identifier: MPL-2.0
//! Core domain types shared across the feed, composer, and search.

mod post;
mod user;

pub use post::{Author, MediaAttachment, MediaKind, Post, PostId};
pub use user::SearchResult;
