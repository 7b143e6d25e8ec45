//! Decode cache for encoded image payloads.
//!
//! Decompressing an image is CPU-bound, and list screens re-render the same
//! records repeatedly. This crate memoizes decode outcomes keyed by the exact
//! payload string so each distinct payload is decompressed once.

#![warn(missing_docs)]

mod cache;
mod config;

pub use cache::{CacheStats, DecodeCache};
pub use config::{DecodeCacheConfig, DecodeCacheConfigBuilder};
