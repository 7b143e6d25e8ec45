//! Building multipart bodies from record fields and files.

use crate::{FilePart, MetadataPart, MultipartRequestBody, PlaceholderPolicy, UploadConfig, resubmission_files};
use atelier_cache::DecodeCache;
use atelier_codec::{Codec, ImageDecoder};
use atelier_core::{ContentRecord, UploadFile};
use atelier_error::{UploadError, UploadErrorKind};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

/// Packages record fields and image files into a multipart body.
#[derive(Debug, Clone, Default)]
pub struct UploadAssembler {
    config: UploadConfig,
}

impl UploadAssembler {
    /// Create an assembler with configuration.
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// Get the upload configuration.
    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Build a request body.
    ///
    /// `metadata` holds the record fields and is serialized as the metadata
    /// part; it must serialize to a JSON object. Files are appended in
    /// order. When `images` is empty the endpoint's `policy` decides whether
    /// an empty placeholder part is sent.
    ///
    /// # Errors
    ///
    /// Fails if `metadata` cannot be serialized or is not an object.
    #[instrument(skip(self, metadata, images), fields(images = images.len(), %policy))]
    pub fn build_request<T>(
        &self,
        metadata: &T,
        images: Vec<UploadFile>,
        policy: PlaceholderPolicy,
    ) -> Result<MultipartRequestBody, UploadError>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_value(metadata)
            .map_err(|e| UploadError::new(UploadErrorKind::Serialization(e.to_string())))?;
        if !json.is_object() {
            return Err(UploadError::new(UploadErrorKind::MetadataNotObject(
                json_type(&json).to_string(),
            )));
        }
        let metadata = MetadataPart::new(self.config.metadata_part().clone(), json);

        let mut files: Vec<FilePart> = images
            .into_iter()
            .map(|file| FilePart::new(self.config.file_part().clone(), self.with_default_mime(file)))
            .collect();

        if files.is_empty() && policy == PlaceholderPolicy::EmptyPart {
            debug!("No images, appending empty placeholder part");
            files.push(FilePart::placeholder(
                self.config.file_part().clone(),
                self.config.default_mime().clone(),
            ));
        }

        Ok(MultipartRequestBody::new(metadata, files))
    }

    /// Rebuild a record's body from its stored images.
    ///
    /// Used when the record must be resubmitted without new images (toggle
    /// state, edit of text fields only): the backend replaces attachments, so
    /// the existing ones are re-derived and sent again.
    ///
    /// # Errors
    ///
    /// See [`build_request`](Self::build_request).
    pub fn resubmit_request<D>(
        &self,
        record: &ContentRecord,
        cache: &DecodeCache<D>,
        codec: &Codec,
        policy: PlaceholderPolicy,
    ) -> Result<MultipartRequestBody, UploadError>
    where
        D: ImageDecoder,
    {
        let files = resubmission_files(record, cache, codec);
        self.build_request(&record.metadata(), files, policy)
    }

    fn with_default_mime(&self, file: UploadFile) -> UploadFile {
        if !file.mime_type().trim().is_empty() {
            return file;
        }
        let name = file.name().clone();
        UploadFile::new(name, self.config.default_mime().clone(), file.into_bytes())
    }
}

/// Build a body with default part names and no placeholder part.
///
/// # Errors
///
/// Fails if `fields` cannot be serialized or is not an object.
pub fn build_request<T>(fields: &T, images: Vec<UploadFile>) -> Result<MultipartRequestBody, UploadError>
where
    T: Serialize + ?Sized,
{
    UploadAssembler::default().build_request(fields, images, PlaceholderPolicy::Omit)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
