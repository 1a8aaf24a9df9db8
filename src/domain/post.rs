// SPDX-License-Identifier: MPL-2.0
//! Post model as exchanged with the backing service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable post identifier assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Display identity of a post's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub username: String,
    /// Server-relative avatar path, joined onto the asset host for display.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Author {
    /// Uppercase first letter of the username, used as the avatar
    /// placeholder when no avatar is set.
    #[must_use]
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "U".to_string())
    }
}

/// Broad media category, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v"];

impl MediaKind {
    /// Classifies a path or server-relative reference by extension.
    /// Anything that is not a known video extension is treated as an image.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let ext = path.rsplit('.').next().unwrap_or_default().to_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    #[must_use]
    pub fn is_video(self) -> bool {
        matches!(self, MediaKind::Video)
    }
}

/// A committed media attachment: a server-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaAttachment(String);

impl MediaAttachment {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_path(&self.0)
    }
}

/// A post as held by the feed store.
///
/// `like_count` is an explicit integer; it is never reconstructed from a
/// container's length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author: Author,
    /// May be empty when media is present.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
    #[serde(default)]
    pub liked_by_current_user: bool,
    #[serde(default)]
    pub like_count: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_detects_videos_by_extension() {
        assert!(MediaKind::from_path("clip.mp4").is_video());
        assert!(MediaKind::from_path("/uploads/a.MOV").is_video());
        assert!(!MediaKind::from_path("photo.jpg").is_video());
        assert!(!MediaKind::from_path("no_extension").is_video());
    }

    #[test]
    fn author_initial_falls_back_when_username_empty() {
        let author = Author {
            id: "u1".into(),
            username: String::new(),
            avatar: None,
        };
        assert_eq!(author.initial(), "U");

        let author = Author {
            id: "u2".into(),
            username: "mira".into(),
            avatar: None,
        };
        assert_eq!(author.initial(), "M");
    }

    #[test]
    fn post_deserializes_from_wire_shape() {
        let json = r#"{
            "id": "p1",
            "author": { "id": "u1", "username": "mira", "avatar": "/uploads/mira.png" },
            "content": "hello",
            "media": ["/uploads/pic.jpg", "/uploads/clip.webm"],
            "likedByCurrentUser": true,
            "likeCount": 4,
            "createdAt": "2025-11-03T10:15:30Z"
        }"#;

        let post: Post = serde_json::from_str(json).expect("post json");
        assert_eq!(post.id, PostId::from("p1"));
        assert_eq!(post.like_count, 4);
        assert!(post.liked_by_current_user);
        assert_eq!(post.media.len(), 2);
        assert_eq!(post.media[0].kind(), MediaKind::Image);
        assert_eq!(post.media[1].kind(), MediaKind::Video);
    }

    #[test]
    fn post_defaults_apply_for_sparse_payloads() {
        let json = r#"{
            "id": "p2",
            "author": { "id": "u1", "username": "mira" },
            "createdAt": "2025-11-03T10:15:30Z"
        }"#;

        let post: Post = serde_json::from_str(json).expect("sparse post json");
        assert_eq!(post.content, "");
        assert!(post.media.is_empty());
        assert!(!post.liked_by_current_user);
        assert_eq!(post.like_count, 0);
    }
}
