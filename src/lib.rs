// SPDX-License-Identifier: MPL-2.0
//! `driftline` is a desktop client for a small social feed, built with the
//! Iced GUI framework.
//!
//! It keeps a chronological feed of posts in sync with a backing service,
//! supports composing posts with media attachments, liking and deleting
//! posts, and live user-directory search. Localization uses Fluent, and
//! preferences persist across sessions.

#![doc(html_root_url = "https://docs.rs/driftline/0.2.0")]

pub mod api;
pub mod app;
pub mod domain;
pub mod error;
pub mod feed;
pub mod i18n;
pub mod media;
pub mod ui;
