//! Multipart request assembly.
//!
//! Create, update and toggle-state calls all send the same shape: one JSON
//! metadata part followed by zero or more binary file parts, in order. The
//! first file part is the record's primary image.
//!
//! # Example
//!
//! ```
//! use atelier_core::UploadFile;
//! use atelier_upload::build_request;
//! use serde_json::json;
//!
//! let body = build_request(
//!     &json!({"title": "x"}),
//!     vec![
//!         UploadFile::new("a.jpg", "image/jpeg", vec![1, 2, 3]),
//!         UploadFile::new("b.jpg", "image/jpeg", vec![4, 5]),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(body.metadata().json(), &json!({"title": "x"}));
//! assert_eq!(body.files().len(), 2);
//! assert_eq!(body.files()[0].file().name(), "a.jpg");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod body;
mod config;
mod policy;
mod resubmit;
mod wire;

pub use assembler::{UploadAssembler, build_request};
pub use atelier_error::{UploadError, UploadErrorKind};
pub use body::{FilePart, MetadataPart, MultipartRequestBody, PLACEHOLDER_FILE_NAME};
pub use config::UploadConfig;
pub use policy::PlaceholderPolicy;
pub use resubmit::resubmission_files;
