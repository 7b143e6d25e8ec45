//! Codec configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// MIME type attached to every decoded image.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Bytes converted to text per step when building a display image.
pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

/// Configuration for the image codec.
///
/// ```toml
/// [codec]
/// mime_type = "image/jpeg"
/// chunk_size = 32768
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct CodecConfig {
    /// Fixed MIME type for decoded images
    #[serde(default = "default_mime_type")]
    #[setters(into)]
    #[builder(setter(into))]
    mime_type: String,

    /// Chunk size for byte-to-text conversion, rounded down to a multiple of 3
    #[serde(default = "default_chunk_size")]
    chunk_size: usize,
}

fn default_mime_type() -> String {
    DEFAULT_MIME_TYPE.to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            mime_type: default_mime_type(),
            chunk_size: default_chunk_size(),
        }
    }
}
