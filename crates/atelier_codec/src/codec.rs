//! Decode and re-encode operations.

use crate::{CodecConfig, DecodeOutcome, DisplayImage, ImageDecoder, stream};
use atelier_core::{EncodedImage, UploadFile};
use atelier_error::{CodecError, CodecErrorKind};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Stateless converter between payloads, display images and upload files.
///
/// # Example
///
/// ```
/// use atelier_codec::{Codec, CodecConfig, DecodeOutcome};
/// use atelier_core::EncodedImage;
///
/// let codec = Codec::new(CodecConfig::default().with_mime_type("image/png"));
///
/// assert_eq!(codec.decode(&EncodedImage::from("")), DecodeOutcome::Empty);
/// assert!(codec.decode(&EncodedImage::from("not-valid-base64!!")).is_malformed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a codec with configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get the codec configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode a payload into a display image.
    ///
    /// Reverses the base64 text, inflates the compressed stream, and wraps
    /// the raw bytes with the configured MIME type. Never panics: empty input
    /// gives [`DecodeOutcome::Empty`], anything undecodable gives
    /// [`DecodeOutcome::Malformed`].
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    pub fn decode(&self, payload: &EncodedImage) -> DecodeOutcome {
        let text = payload.as_str().trim();
        if text.is_empty() {
            debug!("Empty payload");
            return DecodeOutcome::Empty;
        }

        match self.decode_text(text) {
            Ok(image) => {
                debug!(encoded_len = image.base64().len(), "Decoded payload");
                DecodeOutcome::Decoded(Arc::new(image))
            }
            Err(err) => {
                warn!(error = %err, "Malformed image payload");
                DecodeOutcome::Malformed(err)
            }
        }
    }

    fn decode_text(&self, text: &str) -> Result<DisplayImage, CodecError> {
        let compressed = stream::decode_base64(text)?;
        let raw = stream::inflate(&compressed)?;
        if raw.is_empty() {
            return Err(CodecError::new(CodecErrorKind::EmptyImage));
        }
        let base64 = stream::encode_base64_chunked(&raw, *self.config.chunk_size());
        Ok(DisplayImage::new(self.config.mime_type().clone(), base64))
    }

    /// Turn a display image back into an upload file with the same raw bytes.
    ///
    /// No recompression happens: the server accepts and re-stores raw bytes
    /// on write. A name without an extension gets one from the MIME type.
    ///
    /// # Errors
    ///
    /// Fails on an empty display image or an invalid base64 body; callers
    /// omit the file part in that case.
    #[instrument(skip(self, image), fields(mime = %image.mime_type(), encoded_len = image.base64().len()))]
    pub fn reencode(&self, image: &DisplayImage, name: &str) -> Result<UploadFile, CodecError> {
        if image.is_empty() {
            return Err(CodecError::new(CodecErrorKind::Empty));
        }
        let bytes = image.bytes()?;
        if bytes.is_empty() {
            return Err(CodecError::new(CodecErrorKind::EmptyImage));
        }
        debug!(size = bytes.len(), "Re-encoded display image");
        Ok(UploadFile::new(
            file_name(name, image.mime_type()),
            image.mime_type().clone(),
            bytes,
        ))
    }

    /// Re-encode a renderer-held `data:` URI.
    ///
    /// # Errors
    ///
    /// Fails if the URI cannot be parsed or its body is empty.
    pub fn reencode_data_uri(&self, uri: &str, name: &str) -> Result<UploadFile, CodecError> {
        let display = DisplayImage::from_data_uri(uri)?;
        self.reencode(&display, name)
    }

    /// Compress raw bytes the way the server stores them.
    ///
    /// # Errors
    ///
    /// Fails only if the compressor reports an I/O error.
    pub fn encode(&self, raw: &[u8]) -> Result<EncodedImage, CodecError> {
        encode_payload(raw)
    }
}

impl ImageDecoder for Codec {
    fn decode(&self, payload: &EncodedImage) -> DecodeOutcome {
        Codec::decode(self, payload)
    }
}

/// Decode with the default configuration.
pub fn decode(payload: &EncodedImage) -> DecodeOutcome {
    Codec::default().decode(payload)
}

/// Re-encode with the default configuration.
///
/// # Errors
///
/// See [`Codec::reencode`].
pub fn reencode(display: &DisplayImage, name: &str) -> Result<UploadFile, CodecError> {
    Codec::default().reencode(display, name)
}

/// Produce a payload from raw image bytes: zlib, then base64.
///
/// # Errors
///
/// Fails only if the compressor reports an I/O error.
pub fn encode_payload(raw: &[u8]) -> Result<EncodedImage, CodecError> {
    let compressed = stream::deflate(raw)?;
    Ok(EncodedImage::new(stream::encode_base64_chunked(
        &compressed,
        crate::DEFAULT_CHUNK_SIZE,
    )))
}

fn file_name(name: &str, mime_type: &str) -> String {
    let stem = match name.trim() {
        "" => "image",
        trimmed => trimmed,
    };
    if stem.contains('.') {
        return stem.to_string();
    }
    format!("{}.{}", stem, extension_for(mime_type))
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        "image/avif" => "avif",
        _ => "bin",
    }
}
