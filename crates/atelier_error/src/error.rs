//! Top-level error wrapper types.

use crate::{CodecError, ConfigError, HttpError, JsonError, RecordError, UploadError};

/// Sum of every error condition in the workspace.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: AtelierError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AtelierErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Codec error
    #[from(CodecError)]
    Codec(CodecError),
    /// Upload assembly error
    #[from(UploadError)]
    Upload(UploadError),
    /// Content record error
    #[from(RecordError)]
    Record(RecordError),
}

/// Atelier error with kind discrimination.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierErrorKind, AtelierResult, ConfigError};
///
/// fn might_fail() -> AtelierResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), AtelierErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Atelier Error: {}", _0)]
pub struct AtelierError(Box<AtelierErrorKind>);

impl AtelierError {
    /// Create a new error from a kind.
    pub fn new(kind: AtelierErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AtelierErrorKind {
        &self.0
    }
}

impl<T> From<T> for AtelierError
where
    T: Into<AtelierErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Atelier operations.
pub type AtelierResult<T> = std::result::Result<T, AtelierError>;
