// SPDX-License-Identifier: MPL-2.0
//! Cache of fetched avatar images, keyed by server-relative path.
//!
//! Avatars are the one remote image class this client decodes: they are
//! small, heavily repeated across the feed, and the placeholder initial
//! renders until the bytes arrive. `request` marks paths in flight so a
//! feed refresh or a repeated search cannot fetch the same avatar twice;
//! a failed fetch clears the mark so a later refresh may retry.

use iced::widget::image;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct AvatarCache {
    loaded: HashMap<String, image::Handle>,
    pending: HashSet<String>,
}

impl AvatarCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The decoded handle for this path, if fetched.
    #[must_use]
    pub fn handle(&self, path: &str) -> Option<&image::Handle> {
        self.loaded.get(path)
    }

    /// Marks the given paths as in flight and returns those that actually
    /// need a fetch (not loaded, not already pending).
    pub fn request<'a>(&mut self, paths: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut to_fetch = Vec::new();
        for path in paths {
            if path.is_empty() || self.loaded.contains_key(path) || self.pending.contains(path) {
                continue;
            }
            self.pending.insert(path.to_string());
            to_fetch.push(path.to_string());
        }
        to_fetch
    }

    /// Stores fetched bytes as a renderable handle.
    pub fn insert(&mut self, path: String, bytes: Vec<u8>) {
        self.pending.remove(&path);
        self.loaded.insert(path, image::Handle::from_bytes(bytes));
    }

    /// Clears the in-flight mark after a failed fetch so the path can be
    /// requested again later.
    pub fn mark_failed(&mut self, path: &str) {
        self.pending.remove(path);
    }
}
