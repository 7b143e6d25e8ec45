//! Codec for compressed, text-encoded image payloads.
//!
//! The content API stores images as base64 text wrapping a zlib stream. This
//! crate turns those payloads into renderable [`DisplayImage`]s and turns
//! display images back into raw [`UploadFile`](atelier_core::UploadFile)s for
//! resubmission.
//!
//! ```text
//! EncodedImage --decode--> DisplayImage --reencode--> UploadFile
//!  base64(zlib(B))         data:<mime>;base64,B        B
//! ```
//!
//! Decoding never fails outward: malformed payloads come back as
//! [`DecodeOutcome::Malformed`] so callers can render a placeholder.
//!
//! # Example
//!
//! ```
//! use atelier_codec::{Codec, encode_payload};
//!
//! let codec = Codec::default();
//! let payload = encode_payload(b"\xFF\xD8\xFF\xE0 fake jpeg").unwrap();
//!
//! let display = codec.decode(&payload).into_image().unwrap();
//! assert!(display.data_uri().starts_with("data:image/jpeg;base64,"));
//!
//! let file = codec.reencode(&display, "photo").unwrap();
//! assert_eq!(file.bytes(), b"\xFF\xD8\xFF\xE0 fake jpeg");
//! assert_eq!(file.name(), "photo.jpg");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod config;
mod decoder;
mod display;
mod outcome;
mod stream;

pub use atelier_error::{CodecError, CodecErrorKind};
pub use codec::{Codec, decode, encode_payload, reencode};
pub use config::{CodecConfig, CodecConfigBuilder, DEFAULT_CHUNK_SIZE, DEFAULT_MIME_TYPE};
pub use decoder::ImageDecoder;
pub use display::DisplayImage;
pub use outcome::DecodeOutcome;
