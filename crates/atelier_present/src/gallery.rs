//! Lightbox gallery over a record's images.

use crate::ImageView;
use atelier_codec::DisplayImage;
use derive_getters::Getters;
use std::sync::Arc;

/// A record's images in attachment order with a cursor.
///
/// One view per attachment, placeholders included, so indices line up with
/// the record's `images` array. Navigation wraps at both ends.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Gallery {
    views: Vec<ImageView>,
    index: usize,
}

impl Gallery {
    /// Build a gallery, clamping `start_index` to the last view.
    pub fn new(views: Vec<ImageView>, start_index: usize) -> Self {
        let index = start_index.min(views.len().saturating_sub(1));
        Self { views, index }
    }

    /// Number of views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// True when the record had no images.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// The view under the cursor.
    pub fn current(&self) -> Option<&ImageView> {
        self.views.get(self.index)
    }

    /// Move forward one view, wrapping to the first.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&ImageView> {
        if !self.views.is_empty() {
            self.index = (self.index + 1) % self.views.len();
        }
        self.current()
    }

    /// Move back one view, wrapping to the last.
    pub fn prev(&mut self) -> Option<&ImageView> {
        if !self.views.is_empty() {
            self.index = self
                .index
                .checked_sub(1)
                .unwrap_or(self.views.len() - 1);
        }
        self.current()
    }

    /// Only the renderable images, in order.
    pub fn images(&self) -> impl Iterator<Item = &Arc<DisplayImage>> {
        self.views.iter().filter_map(ImageView::image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(n: usize) -> Vec<ImageView> {
        vec![ImageView::Placeholder; n]
    }

    #[test]
    fn start_index_is_clamped() {
        assert_eq!(*Gallery::new(placeholders(3), 10).index(), 2);
        assert_eq!(*Gallery::new(Vec::new(), 4).index(), 0);
    }

    #[test]
    fn navigation_wraps() {
        let mut gallery = Gallery::new(placeholders(3), 0);
        gallery.prev();
        assert_eq!(*gallery.index(), 2);
        gallery.next();
        assert_eq!(*gallery.index(), 0);
    }

    #[test]
    fn empty_gallery_has_no_current() {
        let mut gallery = Gallery::new(Vec::new(), 0);
        assert!(gallery.current().is_none());
        assert!(gallery.next().is_none());
        assert!(gallery.prev().is_none());
    }
}
