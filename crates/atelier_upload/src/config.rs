//! Upload assembly configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Part names and MIME defaults for multipart bodies.
///
/// ```toml
/// [upload]
/// metadata_part = "data"
/// file_part = "images"
/// default_mime = "image/jpeg"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct UploadConfig {
    /// Name of the JSON metadata part
    #[serde(default = "default_metadata_part")]
    metadata_part: String,

    /// Name shared by every file part
    #[serde(default = "default_file_part")]
    file_part: String,

    /// MIME type for files that carry none
    #[serde(default = "default_mime")]
    default_mime: String,
}

fn default_metadata_part() -> String {
    "data".to_string()
}

fn default_file_part() -> String {
    "images".to_string()
}

fn default_mime() -> String {
    "image/jpeg".to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            metadata_part: default_metadata_part(),
            file_part: default_file_part(),
            default_mime: default_mime(),
        }
    }
}
