// SPDX-License-Identifier: MPL-2.0
//! In-memory store for the visible feed.
//!
//! The store exclusively owns the ordered post collection for the current
//! session. All operations are synchronous over the in-memory sequence;
//! the network calls that produce their arguments belong to the callers
//! (composer, post card). Client-created posts are inserted at the head
//! regardless of their server timestamp (optimistic insert), merged with
//! the server-ordered fetched posts below them.

use crate::domain::{Post, PostId};
use crate::error::{Error, Result};

/// Outcome of the last feed fetch.
///
/// `Unavailable` is distinct from an empty `Loaded` feed: a failed fetch
/// must never render as "no posts".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Unavailable,
}

/// Ordered collection of posts currently shown, newest first.
#[derive(Debug, Default)]
pub struct FeedStore {
    load_state: LoadState,
    posts: Vec<Post>,
}

impl FeedStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|post| &post.id == id)
    }

    /// Marks a fetch as in flight. Keeps the current posts so a refresh
    /// does not blank the screen.
    pub fn set_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Replaces the whole sequence with a fetched feed.
    pub fn set_loaded(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.load_state = LoadState::Loaded;
    }

    /// Records a failed fetch. The previous posts are dropped so stale
    /// content cannot masquerade as current.
    pub fn set_unavailable(&mut self) {
        self.posts.clear();
        self.load_state = LoadState::Unavailable;
    }

    /// Inserts a freshly committed post at the head of the sequence.
    ///
    /// Identifier collisions are not expected in normal flow; they signal
    /// an invariant violation upstream.
    pub fn prepend(&mut self, post: Post) -> Result<()> {
        if self.get(&post.id).is_some() {
            return Err(Error::DuplicateId(post.id));
        }
        self.posts.insert(0, post);
        self.load_state = LoadState::Loaded;
        Ok(())
    }

    /// Removes the post with the given identifier, preserving the order of
    /// the rest.
    pub fn remove_by_id(&mut self, id: &PostId) -> Result<Post> {
        match self.posts.iter().position(|post| &post.id == id) {
            Some(index) => Ok(self.posts.remove(index)),
            None => Err(Error::NotFound(id.clone())),
        }
    }

    /// Applies a confirmed like result in place, preserving position.
    ///
    /// Returns `false` when the post is no longer present: a like update
    /// racing a removal resolves in arrival order, and the late update is
    /// a silent no-op rather than an error.
    pub fn apply_like_update(&mut self, id: &PostId, liked: bool, like_count: u32) -> bool {
        match self.posts.iter_mut().find(|post| &post.id == id) {
            Some(post) => {
                post.liked_by_current_user = liked;
                post.like_count = like_count;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Author;
    use chrono::{TimeZone, Utc};

    fn post(id: &str, like_count: u32) -> Post {
        Post {
            id: PostId::from(id),
            author: Author {
                id: "u1".into(),
                username: "mira".into(),
                avatar: None,
            },
            content: format!("post {id}"),
            media: Vec::new(),
            liked_by_current_user: false,
            like_count,
            created_at: Utc.with_ymd_and_hms(2025, 11, 3, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn starts_loading_and_empty() {
        let store = FeedStore::new();
        assert_eq!(store.load_state(), LoadState::Loading);
        assert!(store.posts().is_empty());
    }

    #[test]
    fn failed_fetch_is_distinct_from_empty_feed() {
        let mut store = FeedStore::new();
        store.set_loaded(Vec::new());
        assert_eq!(store.load_state(), LoadState::Loaded);

        store.set_loading();
        store.set_unavailable();
        assert_eq!(store.load_state(), LoadState::Unavailable);
    }

    #[test]
    fn prepend_inserts_at_head() {
        let mut store = FeedStore::new();
        store.set_loaded(vec![post("p1", 0), post("p2", 0)]);
        store.prepend(post("p3", 0)).expect("prepend");

        let ids: Vec<&str> = store.posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p3", "p1", "p2"]);
    }

    #[test]
    fn prepend_rejects_duplicate_id() {
        let mut store = FeedStore::new();
        store.set_loaded(vec![post("p1", 0)]);

        let err = store.prepend(post("p1", 0)).unwrap_err();
        assert_eq!(err, Error::DuplicateId(PostId::from("p1")));
        assert_eq!(store.posts().len(), 1);
    }

    #[test]
    fn remove_by_id_deletes_only_the_match() {
        let mut store = FeedStore::new();
        store.set_loaded(vec![post("p1", 0), post("p2", 0)]);

        store.remove_by_id(&PostId::from("p1")).expect("remove");
        assert!(store.get(&PostId::from("p1")).is_none());
        assert!(store.get(&PostId::from("p2")).is_some());
    }

    #[test]
    fn remove_of_absent_id_errors_and_leaves_sequence_unchanged() {
        let mut store = FeedStore::new();
        store.set_loaded(vec![post("p1", 0)]);

        let err = store.remove_by_id(&PostId::from("gone")).unwrap_err();
        assert_eq!(err, Error::NotFound(PostId::from("gone")));
        assert_eq!(store.posts().len(), 1);
    }

    #[test]
    fn like_update_changes_fields_in_place() {
        let mut store = FeedStore::new();
        store.set_loaded(vec![post("p1", 2), post("p2", 7)]);

        assert!(store.apply_like_update(&PostId::from("p1"), true, 5));

        let updated = store.get(&PostId::from("p1")).expect("p1 present");
        assert!(updated.liked_by_current_user);
        assert_eq!(updated.like_count, 5);

        // Position and neighbors untouched.
        assert_eq!(store.posts()[0].id, PostId::from("p1"));
        assert_eq!(store.posts()[1].like_count, 7);
    }

    #[test]
    fn like_update_for_removed_post_is_a_silent_noop() {
        let mut store = FeedStore::new();
        store.set_loaded(vec![post("p1", 2)]);
        store.remove_by_id(&PostId::from("p1")).expect("remove");

        assert!(!store.apply_like_update(&PostId::from("p1"), true, 3));
        assert!(store.posts().is_empty());
    }

    #[test]
    fn unavailable_drops_previous_posts() {
        let mut store = FeedStore::new();
        store.set_loaded(vec![post("p1", 0)]);
        store.set_unavailable();
        assert!(store.posts().is_empty());
    }
}
