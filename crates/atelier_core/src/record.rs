//! Content records and their image attachments.

use crate::{ContentKind, EncodedImage};
use atelier_error::{JsonError, RecordError, RecordErrorKind};
use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry of a record's `image`/`images` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageAttachment {
    /// Encoded payload
    #[serde(alias = "image", alias = "base64")]
    data: EncodedImage,
    /// Server-side identifier, if the API exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    /// Original file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    /// MIME type recorded at upload time
    #[serde(default, alias = "mimeType", skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
}

impl ImageAttachment {
    /// Create an attachment holding only a payload.
    pub fn new(data: impl Into<EncodedImage>) -> Self {
        Self {
            data: data.into(),
            id: None,
            name: None,
            mime_type: None,
        }
    }

    /// Set the original file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the recorded MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Wire shape of a record as returned by the content API.
#[derive(Debug, Deserialize)]
struct RecordBody {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, alias = "image", deserialize_with = "one_or_many")]
    images: Vec<ImageAttachment>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// Accept `null`, a single attachment object, or an array of attachments.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<ImageAttachment>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<ImageAttachment>),
        One(ImageAttachment),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(images)) => images,
        Some(OneOrMany::One(image)) => vec![image],
    })
}

/// A managed entity (banner, brand, product, ...) with its image attachments.
///
/// Images are part of the record's identity for edit purposes but are
/// never mutated in place: edits always submit a full replacement set.
///
/// # Examples
///
/// ```
/// use atelier_core::{ContentKind, ContentRecord};
/// use serde_json::json;
///
/// let record = ContentRecord::from_json(
///     ContentKind::Banner,
///     json!({"id": 7, "title": "Spring", "active": true, "image": [{"data": "eJwDAAAAAAE="}]}),
/// )
/// .unwrap();
///
/// assert_eq!(record.images().len(), 1);
/// assert_eq!(record.flag("active"), Some(true));
/// assert_eq!(record.metadata(), json!({"id": 7, "title": "Spring", "active": true}));
/// ```
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct ContentRecord {
    kind: ContentKind,
    id: Option<Value>,
    images: Vec<ImageAttachment>,
    fields: Map<String, Value>,
}

impl ContentRecord {
    /// Create an empty record of the given kind.
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            id: None,
            images: Vec::new(),
            fields: Map::new(),
        }
    }

    /// Parse a record from an API JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object or its `image`/`images`
    /// entry does not hold attachment objects.
    #[track_caller]
    pub fn from_json(kind: ContentKind, value: Value) -> Result<Self, JsonError> {
        let body: RecordBody = match serde_json::from_value(value) {
            Ok(body) => body,
            Err(e) => {
                return Err(JsonError::new(format!(
                    "Failed to parse {} record: {}",
                    kind, e
                )));
            }
        };
        Ok(Self {
            kind,
            id: body.id.filter(|id| !id.is_null()),
            images: body.images,
            fields: body.fields,
        })
    }

    /// Set the server identifier.
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set a scalar or text field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Append an image attachment.
    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.images.push(image);
        self
    }

    /// The first image, conventionally treated as the thumbnail.
    pub fn primary_image(&self) -> Option<&EncodedImage> {
        self.images.first().map(ImageAttachment::data)
    }

    /// All encoded payloads in attachment order.
    pub fn encoded_images(&self) -> impl Iterator<Item = &EncodedImage> {
        self.images.iter().map(ImageAttachment::data)
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Insert or replace a field.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Read a boolean field.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(Value::as_bool)
    }

    /// Flip a boolean field, returning the new value.
    ///
    /// # Errors
    ///
    /// Fails if the field is absent or not a boolean; the record is left untouched.
    #[track_caller]
    pub fn toggle_flag(&mut self, name: &str) -> Result<bool, RecordError> {
        let current = match self.fields.get(name).map(Value::as_bool) {
            None => {
                return Err(RecordError::new(RecordErrorKind::MissingField(
                    name.to_string(),
                )));
            }
            Some(None) => {
                return Err(RecordError::new(RecordErrorKind::NotBoolean(
                    name.to_string(),
                )));
            }
            Some(Some(current)) => current,
        };
        self.fields.insert(name.to_string(), Value::Bool(!current));
        Ok(!current)
    }

    /// The id rendered as a URL path segment.
    ///
    /// # Errors
    ///
    /// Fails when the record has no id (it was never saved).
    #[track_caller]
    pub fn id_segment(&self) -> Result<String, RecordError> {
        match &self.id {
            Some(Value::String(id)) => Ok(id.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(RecordError::new(RecordErrorKind::MissingId)),
        }
    }

    /// The JSON document sent as the metadata part: id plus fields, never images.
    pub fn metadata(&self) -> Value {
        let mut doc = Map::with_capacity(self.fields.len() + 1);
        if let Some(id) = &self.id {
            doc.insert("id".to_string(), id.clone());
        }
        for (name, value) in &self.fields {
            doc.insert(name.clone(), value.clone());
        }
        Value::Object(doc)
    }
}
