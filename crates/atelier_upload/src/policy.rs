//! Per-endpoint handling of requests without images.

use serde::{Deserialize, Serialize};

/// What to send when a request carries no image files.
///
/// Some endpoints reject a body without any file part while others accept
/// it, so this is decided per endpoint and never inferred.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderPolicy {
    /// Send no file part at all
    #[default]
    #[display("omit")]
    Omit,
    /// Send one empty file part
    #[display("empty_part")]
    EmptyPart,
}
