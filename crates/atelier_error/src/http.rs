//! HTTP error types.

/// HTTP error wrapping transport failures and non-2xx responses.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Response status, when the server answered
    pub status: Option<u16>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use atelier_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.message.contains("Connection refused"));
    /// assert_eq!(err.status, None);
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create an HttpError for a non-success response status.
    #[track_caller]
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: Some(status),
            line: location.line(),
            file: location.file(),
        }
    }
}
