//! Core data types for the Atelier image pipeline.
//!
//! This crate provides the foundation data types shared by the codec, cache,
//! upload assembly and presentation crates: the encoded payloads delivered by
//! the content API, the records that own them, and the files sent back.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod encoded;
mod kind;
mod record;
mod upload_file;

pub use encoded::EncodedImage;
pub use kind::ContentKind;
pub use record::{ContentRecord, ImageAttachment};
pub use upload_file::UploadFile;
