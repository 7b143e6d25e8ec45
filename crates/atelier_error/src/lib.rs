//! Error types for the Atelier image pipeline.
//!
//! This crate provides the foundation error types used throughout the Atelier workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Codec errors are usually carried as values inside a decode outcome rather
//! than propagated; transport and configuration errors propagate as
//! [`AtelierError`].
//!
//! # Examples
//!
//! ```
//! use atelier_error::{AtelierResult, HttpError};
//!
//! fn fetch_banners() -> AtelierResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! assert!(fetch_banners().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod config;
mod error;
mod http;
mod json;
mod record;
mod upload;

pub use codec::{CodecError, CodecErrorKind};
pub use config::ConfigError;
pub use error::{AtelierError, AtelierErrorKind, AtelierResult};
pub use http::HttpError;
pub use json::JsonError;
pub use record::{RecordError, RecordErrorKind};
pub use upload::{UploadError, UploadErrorKind};
