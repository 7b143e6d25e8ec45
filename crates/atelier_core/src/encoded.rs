//! Encoded image payloads as delivered by the content API.

use serde::{Deserialize, Serialize};

/// Compressed image bytes represented as text (base64 of a zlib stream).
///
/// Identity is the string value itself: two payloads with equal content are
/// interchangeable, which is what lets the decode cache key on it directly.
///
/// # Examples
///
/// ```
/// use atelier_core::EncodedImage;
///
/// let a = EncodedImage::from("eJzLSM3JyQcABiwCFQ==");
/// let b = EncodedImage::new("eJzLSM3JyQcABiwCFQ==".to_string());
/// assert_eq!(a, b);
/// assert!(!a.is_empty());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Wrap a payload received from the server.
    pub fn new(payload: String) -> Self {
        Self(payload)
    }

    /// Borrow the payload text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the payload carries no characters at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of the payload text in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Unwrap into the underlying string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for EncodedImage {
    fn from(payload: String) -> Self {
        Self(payload)
    }
}

impl From<&str> for EncodedImage {
    fn from(payload: &str) -> Self {
        Self(payload.to_string())
    }
}

impl AsRef<str> for EncodedImage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
