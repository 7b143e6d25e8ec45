//! Decode cache implementation.

use crate::DecodeCacheConfig;
use atelier_codec::{Codec, DecodeOutcome, ImageDecoder};
use atelier_core::EncodedImage;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Hit, miss and eviction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that ran the decoder
    pub misses: u64,
    /// Entries dropped by the size bound
    pub evictions: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<EncodedImage, DecodeOutcome>,
    access_order: VecDeque<EncodedImage>,
    stats: CacheStats,
}

impl CacheState {
    fn touch(&mut self, key: &EncodedImage) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            if let Some(key) = self.access_order.remove(pos) {
                self.access_order.push_back(key);
            }
        }
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self.access_order.pop_front() {
            tracing::debug!(payload_len = key.len(), "Evicting LRU entry");
            self.entries.remove(&key);
            self.stats.evictions += 1;
        }
    }
}

/// Memoizes decode outcomes keyed by exact payload.
///
/// Entries are written once per key and, unless a size bound is
/// configured, never removed. Decoding runs outside the internal lock, so two
/// callers missing on the same payload at once may both decode; the second
/// write replaces the first with an equal value.
///
/// Failed decodes are cached too, so a corrupt payload is not decompressed
/// again on every render.
///
/// # Example
///
/// ```
/// use atelier_cache::DecodeCache;
/// use atelier_codec::encode_payload;
///
/// let cache = DecodeCache::default();
/// let payload = encode_payload(b"GIF89a tiny").unwrap();
///
/// let first = cache.get(&payload);
/// let second = cache.get(&payload);
///
/// assert_eq!(first, second);
/// assert_eq!(cache.stats().misses, 1);
/// assert_eq!(cache.stats().hits, 1);
/// ```
#[derive(Debug)]
pub struct DecodeCache<D = Codec>
where
    D: ImageDecoder,
{
    config: DecodeCacheConfig,
    decoder: D,
    state: Mutex<CacheState>,
}

impl DecodeCache<Codec> {
    /// Create a cache around the default codec.
    pub fn new(config: DecodeCacheConfig) -> Self {
        Self::with_decoder(config, Codec::default())
    }
}

impl Default for DecodeCache<Codec> {
    fn default() -> Self {
        Self::new(DecodeCacheConfig::default())
    }
}

impl<D> DecodeCache<D>
where
    D: ImageDecoder,
{
    /// Create a cache around a specific decoder.
    pub fn with_decoder(config: DecodeCacheConfig, decoder: D) -> Self {
        tracing::debug!(
            max_entries = ?config.max_entries(),
            enabled = config.enabled(),
            "Creating new DecodeCache"
        );
        Self {
            config,
            decoder,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Get the cache configuration.
    pub fn config(&self) -> &DecodeCacheConfig {
        &self.config
    }

    /// Get the wrapped decoder.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // Entries are immutable values; a panic elsewhere cannot leave one half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decode a payload, answering from the cache when possible.
    ///
    /// Never fails: a miss runs the decoder, whose outcome already encodes
    /// malformed input.
    #[tracing::instrument(skip(self, payload), fields(payload_len = payload.len()))]
    pub fn get(&self, payload: &EncodedImage) -> DecodeOutcome {
        if !self.config.enabled() {
            tracing::debug!("Cache disabled, decoding directly");
            return self.decoder.decode(payload);
        }

        if let Some(outcome) = self.lookup(payload) {
            return outcome;
        }

        let outcome = self.decoder.decode(payload);
        self.store(payload, outcome.clone());
        outcome
    }

    /// Decode several payloads, preserving order.
    pub fn get_many<'a, I>(&self, payloads: I) -> Vec<DecodeOutcome>
    where
        I: IntoIterator<Item = &'a EncodedImage>,
    {
        payloads.into_iter().map(|payload| self.get(payload)).collect()
    }

    /// Decode and store every payload not yet cached.
    ///
    /// Returns how many payloads were newly decoded.
    #[tracing::instrument(skip_all)]
    pub fn warm<'a, I>(&self, payloads: I) -> usize
    where
        I: IntoIterator<Item = &'a EncodedImage>,
    {
        if !self.config.enabled() {
            return 0;
        }
        let mut decoded = 0;
        for payload in payloads {
            if self.contains(payload) {
                continue;
            }
            let outcome = self.decoder.decode(payload);
            self.store(payload, outcome);
            decoded += 1;
        }
        tracing::debug!(decoded, cache_size = self.len(), "Warmed cache");
        decoded
    }

    fn lookup(&self, payload: &EncodedImage) -> Option<DecodeOutcome> {
        let bounded = self.config.max_entries().is_some();
        let mut state = self.lock();
        match state.entries.get(payload).cloned() {
            Some(outcome) => {
                state.stats.hits += 1;
                if bounded {
                    state.touch(payload);
                }
                tracing::debug!(cache_size = state.entries.len(), "Cache hit");
                Some(outcome)
            }
            None => {
                state.stats.misses += 1;
                tracing::debug!(cache_size = state.entries.len(), "Cache miss");
                None
            }
        }
    }

    fn store(&self, payload: &EncodedImage, outcome: DecodeOutcome) {
        let mut state = self.lock();
        match *self.config.max_entries() {
            None => {
                state.entries.insert(payload.clone(), outcome);
            }
            Some(0) => {}
            Some(max) => {
                if state.entries.contains_key(payload) {
                    state.touch(payload);
                } else {
                    while state.entries.len() >= max {
                        state.evict_lru();
                    }
                    state.access_order.push_back(payload.clone());
                }
                state.entries.insert(payload.clone(), outcome);
            }
        }
    }

    /// Check whether a payload has a cached outcome.
    pub fn contains(&self, payload: &EncodedImage) -> bool {
        self.lock().entries.contains_key(payload)
    }

    /// Get number of cached entries.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Snapshot of the hit/miss/eviction counters.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    /// Clear all cache entries.
    pub fn clear(&self) {
        let mut state = self.lock();
        let count = state.entries.len();
        state.entries.clear();
        state.access_order.clear();
        tracing::info!(cleared = count, "Cleared decode cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> EncodedImage {
        EncodedImage::from(s)
    }

    #[test]
    fn touch_moves_key_to_back() {
        let mut state = CacheState::default();
        state.access_order.extend([key("a"), key("b"), key("c")]);

        state.touch(&key("a"));

        let order: Vec<&str> = state.access_order.iter().map(EncodedImage::as_str).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn evict_lru_drops_front() {
        let mut state = CacheState::default();
        for name in ["a", "b"] {
            state.entries.insert(key(name), DecodeOutcome::Empty);
            state.access_order.push_back(key(name));
        }

        state.evict_lru();

        assert!(!state.entries.contains_key(&key("a")));
        assert!(state.entries.contains_key(&key("b")));
        assert_eq!(state.stats.evictions, 1);
    }
}
