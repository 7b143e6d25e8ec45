//! Upload assembly error types.

/// Kinds of upload assembly errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum UploadErrorKind {
    /// Record fields did not serialize to a JSON object
    #[display("Metadata must be a JSON object, got {}", _0)]
    MetadataNotObject(String),
    /// Record fields could not be serialized
    #[display("Failed to serialize metadata: {}", _0)]
    Serialization(String),
    /// A file part carried an unparseable MIME type
    #[display("Invalid MIME type: {}", _0)]
    InvalidMime(String),
    /// A rendered multipart body could not be parsed back
    #[display("Malformed multipart body: {}", _0)]
    MalformedBody(String),
}

/// Upload error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upload Error: {} at line {} in {}", kind, line, file)]
pub struct UploadError {
    /// The kind of error that occurred
    pub kind: UploadErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UploadError {
    /// Create a new upload error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UploadErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &UploadErrorKind {
        &self.kind
    }
}
