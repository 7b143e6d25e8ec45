//! Decoder trait used by the cache.

use crate::DecodeOutcome;
use atelier_core::EncodedImage;
use std::sync::Arc;

/// Turns an encoded payload into a decode outcome.
///
/// Implementations must be pure: equal payloads yield content-equal
/// outcomes. The decode cache relies on this to memoize results.
pub trait ImageDecoder: Send + Sync {
    /// Decode a payload.
    fn decode(&self, payload: &EncodedImage) -> DecodeOutcome;
}

impl<D> ImageDecoder for Arc<D>
where
    D: ImageDecoder + ?Sized,
{
    fn decode(&self, payload: &EncodedImage) -> DecodeOutcome {
        (**self).decode(payload)
    }
}
