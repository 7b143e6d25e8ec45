//! Codec error types.

/// Kinds of codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CodecErrorKind {
    /// Input payload was empty
    #[display("Empty payload")]
    Empty,
    /// Textual encoding could not be reversed
    #[display("Invalid base64 encoding: {}", _0)]
    InvalidEncoding(String),
    /// Compressed stream was corrupt or truncated
    #[display("Decompression failed: {}", _0)]
    Decompression(String),
    /// Raw bytes could not be compressed
    #[display("Compression failed: {}", _0)]
    Compression(String),
    /// Stream decompressed to zero bytes
    #[display("Decompressed image is empty")]
    EmptyImage,
    /// Display representation is not a base64 data URI
    #[display("Invalid data URI: {}", _0)]
    InvalidDataUri(String),
}

/// Codec error with location tracking.
///
/// # Examples
///
/// ```
/// use atelier_error::{CodecError, CodecErrorKind};
///
/// let err = CodecError::new(CodecErrorKind::Decompression("unexpected end of file".into()));
/// assert!(format!("{}", err).contains("Decompression failed"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Codec Error: {} at line {} in {}", kind, line, file)]
pub struct CodecError {
    /// The kind of error that occurred
    pub kind: CodecErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CodecError {
    /// Create a new codec error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CodecErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CodecErrorKind {
        &self.kind
    }
}
