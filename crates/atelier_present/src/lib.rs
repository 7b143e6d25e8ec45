//! Presentation adapter for content images.
//!
//! Turns records into what list and detail screens draw: a thumbnail per
//! row, a navigable gallery per record, and truncated text columns. Every
//! image goes through the shared [`DecodeCache`](atelier_cache::DecodeCache);
//! missing and malformed images both render as a placeholder.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod gallery;
mod text;
mod view;
mod warm;

pub use adapter::{PresentationAdapter, Row};
pub use gallery::Gallery;
pub use text::{ELLIPSIS, truncate};
pub use view::ImageView;
pub use warm::{spawn_warm, warm_deferred};
