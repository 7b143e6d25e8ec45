//! Decode cache configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Configuration for the decode cache.
///
/// Without `max_entries` the cache is unbounded and never evicts, which
/// suits a session-scoped admin tool. Long-lived processes should set a
/// bound to get least-recently-used eviction.
///
/// ```toml
/// [cache]
/// enabled = true
/// max_entries = 512
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
pub struct DecodeCacheConfig {
    /// Maximum number of cached payloads (unbounded if None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[setters(strip_option)]
    #[builder(setter(strip_option))]
    max_entries: Option<usize>,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for DecodeCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: None,
            enabled: default_enabled(),
        }
    }
}
