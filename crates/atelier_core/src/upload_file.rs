//! Binary files destined for multipart file parts.

use derive_getters::Getters;

/// A named binary blob with a MIME type.
///
/// Produced either from a file the user just picked or by re-encoding a
/// decoded display image back to raw bytes.
///
/// # Examples
///
/// ```
/// use atelier_core::UploadFile;
///
/// let file = UploadFile::new("logo.png", "image/png", vec![0x89, 0x50, 0x4E, 0x47]);
/// assert_eq!(file.name(), "logo.png");
/// assert_eq!(file.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct UploadFile {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl UploadFile {
    /// Create a file from its parts.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Size of the file in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for zero-byte placeholder files.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the file, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
