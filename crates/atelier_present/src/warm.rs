//! Background cache warming.

use atelier_cache::DecodeCache;
use atelier_codec::ImageDecoder;
use atelier_core::ContentRecord;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Decode every image of `records` into the cache at low priority.
///
/// Yields to the scheduler before starting and between records, so a first
/// render queued on the same runtime runs before any decoding. Returns how
/// many payloads were newly decoded.
#[instrument(skip_all, fields(records = records.len()))]
pub async fn warm_deferred<D>(cache: Arc<DecodeCache<D>>, records: Vec<ContentRecord>) -> usize
where
    D: ImageDecoder,
{
    let mut decoded = 0;
    tokio::task::yield_now().await;
    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            tokio::task::yield_now().await;
        }
        decoded += cache.warm(record.encoded_images());
    }
    debug!(decoded, "Deferred warming finished");
    decoded
}

/// Spawn [`warm_deferred`] on the current tokio runtime.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn spawn_warm<D>(cache: Arc<DecodeCache<D>>, records: Vec<ContentRecord>) -> JoinHandle<usize>
where
    D: ImageDecoder + 'static,
{
    tokio::spawn(warm_deferred(cache, records))
}
