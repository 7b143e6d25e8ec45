//! Renderable image representation.

use crate::stream;
use atelier_error::{CodecError, CodecErrorKind};
use derive_getters::Getters;

const DATA_URI_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// A decoded image: raw bytes as base64 text plus a MIME type.
///
/// Equivalent to a `data:` URI and presentable directly by a renderer.
/// Values are derived from a payload by the codec or parsed from an
/// existing data URI; there is no constructor from loose parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct DisplayImage {
    mime_type: String,
    base64: String,
}

impl DisplayImage {
    pub(crate) fn new(mime_type: String, base64: String) -> Self {
        Self { mime_type, base64 }
    }

    /// Parse a `data:<mime>;base64,<body>` URI.
    ///
    /// # Errors
    ///
    /// Fails if the prefix or base64 marker is missing, the MIME type is
    /// empty, or the body is not valid base64.
    ///
    /// # Examples
    ///
    /// ```
    /// use atelier_codec::DisplayImage;
    ///
    /// let image = DisplayImage::from_data_uri("data:image/png;base64,iVBORw==").unwrap();
    /// assert_eq!(image.mime_type(), "image/png");
    /// assert_eq!(image.bytes().unwrap(), vec![0x89, 0x50, 0x4E, 0x47]);
    ///
    /// assert!(DisplayImage::from_data_uri("https://example.com/a.png").is_err());
    /// ```
    #[track_caller]
    pub fn from_data_uri(uri: &str) -> Result<Self, CodecError> {
        let Some(rest) = uri.trim().strip_prefix(DATA_URI_PREFIX) else {
            return Err(CodecError::new(CodecErrorKind::InvalidDataUri(
                "missing data: prefix".into(),
            )));
        };
        let Some((mime_type, body)) = rest.split_once(BASE64_MARKER) else {
            return Err(CodecError::new(CodecErrorKind::InvalidDataUri(
                "missing ;base64, marker".into(),
            )));
        };
        if mime_type.is_empty() {
            return Err(CodecError::new(CodecErrorKind::InvalidDataUri(
                "empty MIME type".into(),
            )));
        }
        stream::decode_base64(body)?;
        Ok(Self::new(mime_type.to_string(), body.to_string()))
    }

    /// Render as a `data:` URI.
    pub fn data_uri(&self) -> String {
        let mut uri = String::with_capacity(
            DATA_URI_PREFIX.len() + self.mime_type.len() + BASE64_MARKER.len() + self.base64.len(),
        );
        uri.push_str(DATA_URI_PREFIX);
        uri.push_str(&self.mime_type);
        uri.push_str(BASE64_MARKER);
        uri.push_str(&self.base64);
        uri
    }

    /// Recover the raw image bytes.
    ///
    /// # Errors
    ///
    /// Fails if the base64 body is invalid.
    pub fn bytes(&self) -> Result<Vec<u8>, CodecError> {
        stream::decode_base64(&self.base64)
    }

    /// True when the image carries no data.
    pub fn is_empty(&self) -> bool {
        self.base64.is_empty()
    }
}
