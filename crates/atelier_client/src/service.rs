//! Record call sites: list, create, update, toggle, delete.

use crate::{ContentTransport, Dialogs, EndpointConfig, LoadingSignal, LoadingTracker, RequestBody};
use atelier_cache::DecodeCache;
use atelier_codec::Codec;
use atelier_core::{ContentKind, ContentRecord, UploadFile};
use atelier_error::{AtelierResult, JsonError};
use atelier_upload::{UploadAssembler, resubmission_files};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Message shown to the user when a request fails.
pub const GENERIC_FAILURE_MESSAGE: &str = "The operation could not be completed. Please try again.";

/// Result of a call that asks for confirmation first.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The user confirmed and the request succeeded
    Completed(T),
    /// The user declined; nothing was sent
    Declined,
}

impl<T> Outcome<T> {
    /// True when the user declined.
    pub fn is_declined(&self) -> bool {
        matches!(self, Outcome::Declined)
    }

    /// The completed value, if any.
    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Declined => None,
        }
    }
}

/// Create/update/toggle/delete for content records.
///
/// Every mutating call awaits a confirmation before anything is sent, and
/// every network call is bracketed by the loading indicator. Failures are
/// logged, reported through [`Dialogs::alert`], and returned; the caller's
/// record is never modified.
pub struct RecordService {
    transport: Arc<dyn ContentTransport>,
    dialogs: Arc<dyn Dialogs>,
    loading: LoadingTracker,
    cache: Arc<DecodeCache>,
    codec: Codec,
    assembler: UploadAssembler,
    endpoints: HashMap<ContentKind, EndpointConfig>,
}

impl std::fmt::Debug for RecordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordService")
            .field("loading", &self.loading)
            .field("cache_size", &self.cache.len())
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl RecordService {
    /// Create a service with default codec, assembler and endpoints.
    pub fn new(
        transport: Arc<dyn ContentTransport>,
        dialogs: Arc<dyn Dialogs>,
        loading: Arc<dyn LoadingSignal>,
        cache: Arc<DecodeCache>,
    ) -> Self {
        Self {
            transport,
            dialogs,
            loading: LoadingTracker::new(loading),
            cache,
            codec: Codec::default(),
            assembler: UploadAssembler::default(),
            endpoints: HashMap::new(),
        }
    }

    /// Use a specific codec for re-encoding stored images.
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Use a specific upload assembler.
    pub fn with_assembler(mut self, assembler: UploadAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// Set endpoint configuration per kind.
    pub fn with_endpoints(mut self, endpoints: HashMap<ContentKind, EndpointConfig>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Endpoint configuration for a kind, falling back to defaults.
    pub fn endpoint(&self, kind: ContentKind) -> EndpointConfig {
        self.endpoints
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| EndpointConfig::fallback(kind))
    }

    /// Shared decode cache.
    pub fn cache(&self) -> &Arc<DecodeCache> {
        &self.cache
    }

    /// Loading tracker wrapping the indicator.
    pub fn loading(&self) -> &LoadingTracker {
        &self.loading
    }

    /// Fetch all records of a kind.
    ///
    /// Accepts a bare JSON array or an object wrapping it under `data`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or an unrecognized response shape.
    #[instrument(skip(self), fields(%kind))]
    pub async fn list(&self, kind: ContentKind) -> AtelierResult<Vec<ContentRecord>> {
        let path = self.endpoint(kind).path().clone();
        let result = async {
            let value = {
                let _loading = self.loading.begin();
                self.transport.get(&path).await?
            };
            parse_records(kind, value)
        }
        .await;
        self.surface("list", kind, result).await
    }

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or an unparseable record.
    #[instrument(skip(self), fields(%kind))]
    pub async fn get(&self, kind: ContentKind, id: &str) -> AtelierResult<ContentRecord> {
        let path = self.endpoint(kind).item_path(id);
        let result = async {
            let value = {
                let _loading = self.loading.begin();
                self.transport.get(&path).await?
            };
            Ok(ContentRecord::from_json(kind, unwrap_envelope(value))?)
        }
        .await;
        self.surface("load", kind, result).await
    }

    /// Create a record from its fields and freshly picked images.
    ///
    /// `metadata` must serialize to a JSON object.
    ///
    /// # Errors
    ///
    /// Fails if the body cannot be assembled or the request fails.
    #[instrument(skip(self, metadata, images), fields(%kind, images = images.len()))]
    pub async fn create<T>(
        &self,
        kind: ContentKind,
        metadata: &T,
        images: Vec<UploadFile>,
    ) -> AtelierResult<Outcome<Value>>
    where
        T: Serialize + Sync + ?Sized,
    {
        if !self.confirm(&format!("Create this {}?", kind)).await {
            return Ok(Outcome::Declined);
        }
        let endpoint = self.endpoint(kind);
        let result = async {
            let body = self
                .assembler
                .build_request(metadata, images, *endpoint.placeholder())?;
            let _loading = self.loading.begin();
            self.transport
                .post(endpoint.path(), RequestBody::Multipart(body))
                .await
        }
        .await;
        self.surface("create", kind, result).await.map(Outcome::Completed)
    }

    /// Save a record.
    ///
    /// `images` replaces the record's images; `None` resubmits the stored
    /// ones, since the backend replaces attachments on every update.
    ///
    /// # Errors
    ///
    /// Fails if the record has no id, the body cannot be assembled, or the
    /// request fails.
    #[instrument(skip(self, record, images), fields(kind = %record.kind(), new_images = images.is_some()))]
    pub async fn update(
        &self,
        record: &ContentRecord,
        images: Option<Vec<UploadFile>>,
    ) -> AtelierResult<Outcome<Value>> {
        let kind = *record.kind();
        if !self.confirm(&format!("Save changes to this {}?", kind)).await {
            return Ok(Outcome::Declined);
        }
        let endpoint = self.endpoint(kind);
        let result = async {
            let path = endpoint.item_path(&record.id_segment()?);
            let files = images
                .unwrap_or_else(|| resubmission_files(record, &*self.cache, &self.codec));
            let body = self
                .assembler
                .build_request(&record.metadata(), files, *endpoint.placeholder())?;
            let _loading = self.loading.begin();
            self.transport.put(&path, RequestBody::Multipart(body)).await
        }
        .await;
        self.surface("update", kind, result).await.map(Outcome::Completed)
    }

    /// Flip a boolean field and resubmit the record with its stored images.
    ///
    /// Returns the updated copy; the record passed in is left unchanged.
    ///
    /// # Errors
    ///
    /// Fails if the field is missing or not a boolean, the record has no
    /// id, or the request fails.
    #[instrument(skip(self, record), fields(kind = %record.kind()))]
    pub async fn toggle(
        &self,
        record: &ContentRecord,
        field: &str,
    ) -> AtelierResult<Outcome<ContentRecord>> {
        let kind = *record.kind();
        let mut updated = record.clone();
        let new_value = updated.toggle_flag(field)?;

        let verb = if new_value { "Enable" } else { "Disable" };
        if !self.confirm(&format!("{} this {}?", verb, kind)).await {
            return Ok(Outcome::Declined);
        }
        let endpoint = self.endpoint(kind);
        let result = async {
            let path = endpoint.item_path(&updated.id_segment()?);
            let body = self.assembler.resubmit_request(
                &updated,
                &*self.cache,
                &self.codec,
                *endpoint.placeholder(),
            )?;
            let _loading = self.loading.begin();
            self.transport.put(&path, RequestBody::Multipart(body)).await
        }
        .await;
        self.surface("toggle", kind, result).await?;
        info!(field, new_value, "Toggled record state");
        Ok(Outcome::Completed(updated))
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Fails if the record has no id or the request fails.
    #[instrument(skip(self, record), fields(kind = %record.kind()))]
    pub async fn delete(&self, record: &ContentRecord) -> AtelierResult<Outcome<()>> {
        let kind = *record.kind();
        if !self.confirm(&format!("Delete this {}?", kind)).await {
            return Ok(Outcome::Declined);
        }
        let endpoint = self.endpoint(kind);
        let result = async {
            let path = endpoint.item_path(&record.id_segment()?);
            let _loading = self.loading.begin();
            self.transport.delete(&path).await.map(|_| ())
        }
        .await;
        self.surface("delete", kind, result).await.map(Outcome::Completed)
    }

    async fn confirm(&self, message: &str) -> bool {
        let confirmed = self.dialogs.confirm(message).await;
        if !confirmed {
            info!(message, "User declined");
        }
        confirmed
    }

    async fn surface<T>(
        &self,
        action: &str,
        kind: ContentKind,
        result: AtelierResult<T>,
    ) -> AtelierResult<T> {
        if let Err(err) = &result {
            error!(action, %kind, error = %err, "Request failed");
            self.dialogs.alert(GENERIC_FAILURE_MESSAGE).await;
        }
        result
    }
}

/// Strip a `{ "data": ... }` envelope if present.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn parse_records(kind: ContentKind, value: Value) -> AtelierResult<Vec<ContentRecord>> {
    match unwrap_envelope(value) {
        Value::Array(items) => items
            .into_iter()
            .map(|item| ContentRecord::from_json(kind, item).map_err(Into::into))
            .collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(JsonError::new(format!(
            "Expected an array of {} records, got {}",
            kind, other
        ))
        .into()),
    }
}
