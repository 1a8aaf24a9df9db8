// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the Driftline backing service.
//!
//! Thin wrapper around `reqwest` that owns endpoint construction and wire
//! decoding. Callers receive domain types; every failure is converted into
//! [`Error::Network`] at this boundary.
//!
//! Endpoint summary:
//! - `GET  {api}/posts/feed`            -> `{ "posts": [...] }`
//! - `POST {api}/posts` (multipart)     -> `{ "post": ... }`
//! - `GET  {api}/users/search/{query}`  -> `{ "users": [...] }` (bearer auth)
//! - `POST {api}/posts/{id}/like`       -> `{ "likedByCurrentUser", "likeCount" }`
//! - `DELETE {api}/posts/{id}`
//!
//! The search endpoint is the only one that attaches the bearer token; the
//! feed and creation endpoints are anonymous, mirroring the deployed
//! service.

use crate::domain::{Post, PostId, SearchResult};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Default API base URL, overridable via config or `--api-url`.
pub const DEFAULT_API_BASE_URL: &str = "https://backend-api-b0q2.onrender.com/api";

#[derive(Debug, Deserialize)]
struct FeedResponse {
    posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    post: Post,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    users: Vec<SearchResult>,
}

/// Confirmed outcome of a like/unlike request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeOutcome {
    pub liked_by_current_user: bool,
    pub like_count: u32,
}

/// Client for the backing service.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection
/// pool across clones, which is what `Task::perform` closures rely on.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    asset_base_url: String,
}

impl Client {
    /// Creates a client for the given API base URL (e.g. `https://host/api`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        let asset_base_url = base_url
            .strip_suffix("/api")
            .unwrap_or(&base_url)
            .to_string();

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("Driftline/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url,
            asset_base_url,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a server-relative media or avatar path onto the asset host.
    #[must_use]
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.asset_base_url, path)
        } else {
            format!("{}/{}", self.asset_base_url, path)
        }
    }

    /// Fetches the current feed. No auth header is attached.
    pub async fn fetch_feed(&self) -> Result<Vec<Post>> {
        let url = format!("{}/posts/feed", self.base_url);
        let response = self.http.get(&url).send().await?;
        let response = check_status(response)?;
        let feed: FeedResponse = response.json().await?;
        Ok(feed.posts)
    }

    /// Creates a post from text content plus raw media files, as a
    /// multipart form with a `content` text field and one `media` file
    /// field per attachment.
    pub async fn create_post(&self, content: String, media: Vec<PathBuf>) -> Result<Post> {
        let url = format!("{}/posts", self.base_url);

        let mut form = reqwest::multipart::Form::new().text("content", content);
        for path in media {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string());
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
            let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
            form = form.part("media", part);
        }

        let response = self.http.post(&url).multipart(form).send().await?;
        let response = check_status(response)?;
        let created: CreatePostResponse = response.json().await?;
        Ok(created.post)
    }

    /// Runs a directory search. The bearer token comes from the persisted
    /// session; a missing token is sent as an empty search (the server
    /// rejects it, which surfaces as `Error::Network`).
    pub async fn search_users(&self, query: String, token: Option<String>) -> Result<Vec<SearchResult>> {
        let url = format!("{}/users/search/{}", self.base_url, encode_path_segment(&query));
        let mut request = self.http.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let response = check_status(response)?;
        let results: SearchResponse = response.json().await?;
        Ok(results.users)
    }

    /// Toggles the like state of a post; returns the confirmed outcome.
    pub async fn like_post(&self, id: PostId) -> Result<LikeOutcome> {
        let url = format!("{}/posts/{}/like", self.base_url, id);
        let response = self.http.post(&url).send().await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// Fetches the raw bytes of a server-hosted asset (avatar images).
    pub async fn fetch_asset(&self, path: String) -> Result<Vec<u8>> {
        let url = self.asset_url(&path);
        let response = self.http.get(&url).send().await?;
        let response = check_status(response)?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Deletes a post.
    pub async fn delete_post(&self, id: PostId) -> Result<()> {
        let url = format!("{}/posts/{}", self.base_url, id);
        let response = self.http.delete(&url).send().await?;
        check_status(response)?;
        Ok(())
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Network(format!("server returned {status}")))
    }
}

/// Percent-encodes a search query for use as a single path segment.
fn encode_path_segment(segment: &str) -> String {
    const SAFE: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_.~";
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if SAFE.contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_url_joins_relative_paths_onto_host() {
        let client = Client::new("https://example.test/api");
        assert_eq!(
            client.asset_url("/uploads/a.png"),
            "https://example.test/uploads/a.png"
        );
        assert_eq!(
            client.asset_url("uploads/b.png"),
            "https://example.test/uploads/b.png"
        );
    }

    #[test]
    fn asset_url_passes_absolute_urls_through() {
        let client = Client::new("https://example.test/api");
        assert_eq!(
            client.asset_url("https://cdn.test/x.png"),
            "https://cdn.test/x.png"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = Client::new("https://example.test/api/");
        assert_eq!(client.base_url(), "https://example.test/api");
        assert_eq!(
            client.asset_url("/u.png"),
            "https://example.test/u.png"
        );
    }

    #[test]
    fn query_segments_are_percent_encoded() {
        assert_eq!(encode_path_segment("ada lovelace"), "ada%20lovelace");
        assert_eq!(encode_path_segment("a/b"), "a%2Fb");
        assert_eq!(encode_path_segment("plain-name_1.2~"), "plain-name_1.2~");
    }

    #[test]
    fn like_outcome_deserializes_from_wire_shape() {
        let json = r#"{ "likedByCurrentUser": true, "likeCount": 3 }"#;
        let outcome: LikeOutcome = serde_json::from_str(json).expect("like json");
        assert!(outcome.liked_by_current_user);
        assert_eq!(outcome.like_count, 3);
    }
}
