//! Multipart request body types.

use atelier_core::UploadFile;
use atelier_error::{UploadError, UploadErrorKind};
use derive_getters::Getters;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

/// File name used for empty placeholder parts.
pub const PLACEHOLDER_FILE_NAME: &str = "blob";

/// Content type of the metadata part.
pub(crate) const JSON_MIME: &str = "application/json";

/// The JSON document describing a record's fields.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct MetadataPart {
    name: String,
    json: Value,
}

impl MetadataPart {
    pub(crate) fn new(name: impl Into<String>, json: Value) -> Self {
        Self {
            name: name.into(),
            json,
        }
    }
}

/// One binary file part.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct FilePart {
    name: String,
    file: UploadFile,
}

impl FilePart {
    /// Create a file part under the given part name.
    pub fn new(name: impl Into<String>, file: UploadFile) -> Self {
        Self {
            name: name.into(),
            file,
        }
    }

    /// An empty part for endpoints that insist on a file part.
    pub fn placeholder(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::new(name, UploadFile::new(PLACEHOLDER_FILE_NAME, mime_type, Vec::new()))
    }

    /// True for an empty placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.file.is_empty()
    }
}

/// Exactly one metadata part followed by ordered file parts.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct MultipartRequestBody {
    metadata: MetadataPart,
    files: Vec<FilePart>,
}

impl MultipartRequestBody {
    pub(crate) fn new(metadata: MetadataPart, files: Vec<FilePart>) -> Self {
        Self { metadata, files }
    }

    /// Total bytes across file parts.
    pub fn file_bytes(&self) -> usize {
        self.files.iter().map(|part| part.file.len()).sum()
    }

    /// `Content-Type` header value for a rendered body.
    pub fn content_type(boundary: &str) -> String {
        format!("multipart/form-data; boundary={}", boundary)
    }

    /// Convert into a `reqwest` form for sending.
    ///
    /// # Errors
    ///
    /// Fails if a file part carries an unparseable MIME type.
    #[tracing::instrument(skip(self), fields(files = self.files.len(), file_bytes = self.file_bytes()))]
    pub fn into_form(self) -> Result<Form, UploadError> {
        let metadata = Part::text(self.metadata.json.to_string())
            .mime_str(JSON_MIME)
            .map_err(|e| UploadError::new(UploadErrorKind::InvalidMime(e.to_string())))?;
        let mut form = Form::new().part(self.metadata.name, metadata);

        for part in self.files {
            let mime_type = part.file.mime_type().clone();
            let name = part.file.name().clone();
            let file = Part::bytes(part.file.into_bytes())
                .file_name(name)
                .mime_str(&mime_type)
                .map_err(|e| {
                    UploadError::new(UploadErrorKind::InvalidMime(format!("{}: {}", mime_type, e)))
                })?;
            form = form.part(part.name, file);
        }

        Ok(form)
    }
}
