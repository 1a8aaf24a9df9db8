// SPDX-License-Identifier: MPL-2.0
//! Directory search result model.

use serde::{Deserialize, Serialize};

/// A user returned by the directory search.
///
/// Fully transient: replaced wholesale on every query change and cleared
/// when the search panel is dismissed. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub display_name: String,
    /// Server-relative avatar path, if any.
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl SearchResult {
    /// Uppercase first letter of the display name, used as the avatar
    /// placeholder.
    #[must_use]
    pub fn initial(&self) -> String {
        self.display_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "U".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_deserializes_with_optional_fields() {
        let json = r#"{ "id": "u9", "displayName": "ada" }"#;
        let result: SearchResult = serde_json::from_str(json).expect("user json");
        assert_eq!(result.display_name, "ada");
        assert!(result.avatar.is_none());
        assert!(result.bio.is_none());
        assert_eq!(result.initial(), "A");
    }
}
