//! Per-entity endpoint configuration.

use atelier_core::ContentKind;
use atelier_upload::PlaceholderPolicy;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Where records of one kind live and how their uploads are shaped.
///
/// ```toml
/// [endpoints.banner]
/// path = "banners"
/// placeholder = "empty_part"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct EndpointConfig {
    /// Collection path relative to the API base URL
    path: String,

    /// Whether an empty file part is required when no images are sent
    #[serde(default)]
    placeholder: PlaceholderPolicy,
}

impl EndpointConfig {
    /// Create an endpoint configuration.
    pub fn new(path: impl Into<String>, placeholder: PlaceholderPolicy) -> Self {
        Self {
            path: path.into(),
            placeholder,
        }
    }

    /// Endpoint used for a kind nobody configured: plural collection name, no placeholder.
    pub fn fallback(kind: ContentKind) -> Self {
        let name = kind.as_str();
        let path = if let Some(stem) = name.strip_suffix('y') {
            format!("{}ies", stem)
        } else if name.ends_with('s') {
            name.to_string()
        } else {
            format!("{}s", name)
        };
        Self::new(path, PlaceholderPolicy::Omit)
    }

    /// Path of one record in the collection.
    ///
    /// The id is percent-encoded as a single path segment.
    pub fn item_path(&self, id: &str) -> String {
        format!(
            "{}/{}",
            self.path.trim_end_matches('/'),
            urlencoding::encode(id)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_pluralizes_kind() {
        assert_eq!(EndpointConfig::fallback(ContentKind::Banner).path(), "banners");
        assert_eq!(EndpointConfig::fallback(ContentKind::Category).path(), "categories");
        assert_eq!(EndpointConfig::fallback(ContentKind::News).path(), "news");
    }

    #[test]
    fn item_path_joins_id() {
        let endpoint = EndpointConfig::new("brands/", PlaceholderPolicy::Omit);
        assert_eq!(endpoint.item_path("4"), "brands/4");
        assert_eq!(endpoint.item_path("c-2"), "brands/c-2");
    }

    #[test]
    fn item_path_encodes_reserved_characters() {
        let endpoint = EndpointConfig::new("brands", PlaceholderPolicy::Omit);
        assert_eq!(endpoint.item_path("a/b?c"), "brands/a%2Fb%3Fc");
        assert_eq!(endpoint.item_path("x#1 2"), "brands/x%231%202");
    }
}
