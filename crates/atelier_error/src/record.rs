//! Content record error types.

/// Specific error conditions when manipulating a content record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RecordErrorKind {
    /// Field is not present on the record
    #[display("Missing field: {}", _0)]
    MissingField(String),
    /// Field exists but is not a boolean
    #[display("Field '{}' is not a boolean", _0)]
    NotBoolean(String),
    /// Record has no id, so it cannot be addressed on the server
    #[display("Record has no id")]
    MissingId,
}

/// Record error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Record Error: {} at line {} in {}", kind, line, file)]
pub struct RecordError {
    kind: RecordErrorKind,
    line: u32,
    file: &'static str,
}

impl RecordError {
    /// Create a new record error with caller location tracking.
    #[track_caller]
    pub fn new(kind: RecordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RecordErrorKind {
        &self.kind
    }
}
