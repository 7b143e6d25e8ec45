//! Renderable image state.

use atelier_codec::{DecodeOutcome, DisplayImage};
use std::sync::Arc;

/// What an image slot shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageView {
    /// A decoded image
    Image(Arc<DisplayImage>),
    /// Nothing to show: the image is missing or could not be decoded
    Placeholder,
}

impl ImageView {
    /// The decoded image, if any.
    pub fn image(&self) -> Option<&Arc<DisplayImage>> {
        match self {
            ImageView::Image(image) => Some(image),
            ImageView::Placeholder => None,
        }
    }

    /// True for [`ImageView::Placeholder`].
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageView::Placeholder)
    }

    /// The `data:` URI to put in an `img` source, if any.
    pub fn data_uri(&self) -> Option<String> {
        self.image().map(|image| image.data_uri())
    }
}

impl From<DecodeOutcome> for ImageView {
    fn from(outcome: DecodeOutcome) -> Self {
        match outcome.into_image() {
            Some(image) => ImageView::Image(image),
            None => ImageView::Placeholder,
        }
    }
}
