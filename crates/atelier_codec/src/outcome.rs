//! Result of decoding one payload.

use crate::DisplayImage;
use atelier_error::CodecError;
use std::sync::Arc;

/// What decoding a payload produced.
///
/// `Empty` and `Malformed` are both rendered as "no image"; they stay
/// distinct so callers and tests can tell a missing image from a corrupt one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Payload decoded into a renderable image
    Decoded(Arc<DisplayImage>),
    /// Payload was empty
    Empty,
    /// Payload was not valid base64 or the compressed stream was corrupt
    Malformed(CodecError),
}

impl DecodeOutcome {
    /// Borrow the decoded image, if any.
    pub fn image(&self) -> Option<&Arc<DisplayImage>> {
        match self {
            DecodeOutcome::Decoded(image) => Some(image),
            DecodeOutcome::Empty | DecodeOutcome::Malformed(_) => None,
        }
    }

    /// Take the decoded image, if any.
    pub fn into_image(self) -> Option<Arc<DisplayImage>> {
        match self {
            DecodeOutcome::Decoded(image) => Some(image),
            DecodeOutcome::Empty | DecodeOutcome::Malformed(_) => None,
        }
    }

    /// True when a renderable image was produced.
    pub fn is_image(&self) -> bool {
        matches!(self, DecodeOutcome::Decoded(_))
    }

    /// True when the payload was malformed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, DecodeOutcome::Malformed(_))
    }

    /// The codec error behind a malformed payload.
    pub fn error(&self) -> Option<&CodecError> {
        match self {
            DecodeOutcome::Malformed(err) => Some(err),
            DecodeOutcome::Decoded(_) | DecodeOutcome::Empty => None,
        }
    }
}
