//! Record to view conversion.

use crate::{Gallery, ImageView, truncate};
use atelier_cache::DecodeCache;
use atelier_codec::{Codec, ImageDecoder};
use atelier_core::ContentRecord;
use derive_getters::Getters;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// One list-screen row: thumbnail plus shortened text columns.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Row {
    thumbnail: ImageView,
    cells: Vec<String>,
}

/// Builds views for records through a shared decode cache.
#[derive(Debug)]
pub struct PresentationAdapter<D = Codec>
where
    D: ImageDecoder,
{
    cache: Arc<DecodeCache<D>>,
}

impl<D> Clone for PresentationAdapter<D>
where
    D: ImageDecoder,
{
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<D> PresentationAdapter<D>
where
    D: ImageDecoder,
{
    /// Create an adapter over a shared cache.
    pub fn new(cache: Arc<DecodeCache<D>>) -> Self {
        Self { cache }
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<DecodeCache<D>> {
        &self.cache
    }

    /// The record's first image, or a placeholder.
    #[instrument(skip_all, fields(kind = %record.kind()))]
    pub fn thumbnail(&self, record: &ContentRecord) -> ImageView {
        match record.primary_image() {
            Some(payload) => self.cache.get(payload).into(),
            None => ImageView::Placeholder,
        }
    }

    /// All of the record's images with the cursor at `start_index`.
    ///
    /// Each image decodes independently; a broken one becomes a placeholder
    /// without affecting its neighbours.
    #[instrument(skip(self, record), fields(kind = %record.kind(), images = record.images().len()))]
    pub fn gallery(&self, record: &ContentRecord, start_index: usize) -> Gallery {
        let views = self
            .cache
            .get_many(record.encoded_images())
            .into_iter()
            .map(ImageView::from)
            .collect();
        Gallery::new(views, start_index)
    }

    /// A list row showing `columns` shortened to `max_len` characters.
    ///
    /// Strings are shown as-is, other values in their JSON form, and missing
    /// or null fields as an empty cell.
    pub fn row(&self, record: &ContentRecord, columns: &[&str], max_len: usize) -> Row {
        let cells = columns
            .iter()
            .map(|column| {
                let text = match record.field(column) {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                };
                truncate(&text, max_len).into_owned()
            })
            .collect();
        Row {
            thumbnail: self.thumbnail(record),
            cells,
        }
    }
}
