//! Atelier - image pipeline for content-management admin tools
//!
//! Records (banners, brands, products, ...) arrive from the content API with
//! their images as compressed, base64-encoded payloads. Atelier decodes them
//! once into renderable data URIs, caches the result, presents thumbnails and
//! galleries, and packages images back into multipart bodies whenever a
//! record is created, edited or toggled.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use atelier::{Atelier, AtelierConfig, AutoConfirm, LoadingFlag, ContentKind};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     atelier::init_observability()?;
//!     let atelier = Atelier::connect(
//!         AtelierConfig::load()?,
//!         Arc::new(AutoConfirm),
//!         Arc::new(LoadingFlag::default()),
//!     )?;
//!
//!     let banners = atelier.service().list(ContentKind::Banner).await?;
//!     for banner in &banners {
//!         let row = atelier.presenter().row(banner, &["title"], 40);
//!         println!("{:?}", row.cells());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `otel` - Export spans through OpenTelemetry (stdout exporter)
//!
//! # Architecture
//!
//! - `atelier_error` - Error types
//! - `atelier_core` - Records, attachments, encoded payloads, upload files
//! - `atelier_codec` - Payload decoding and re-encoding
//! - `atelier_cache` - Memoized decoding
//! - `atelier_upload` - Multipart body assembly
//! - `atelier_client` - Transport, dialogs, loading indicator, record call sites
//! - `atelier_present` - Thumbnails, galleries, list rows
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod observability;

pub use app::Atelier;
pub use config::AtelierConfig;
pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};

pub use atelier_core::*;
pub use atelier_error::*;

pub use atelier_cache::{CacheStats, DecodeCache, DecodeCacheConfig, DecodeCacheConfigBuilder};
pub use atelier_client::{
    ApiConfig, AutoConfirm, ContentTransport, Dialogs, EndpointConfig, GENERIC_FAILURE_MESSAGE,
    LoadingFlag, LoadingGuard, LoadingSignal, LoadingTracker, Outcome, RecordService, RequestBody,
    ReqwestTransport,
};
pub use atelier_codec::{
    Codec, CodecConfig, CodecConfigBuilder, DecodeOutcome, DisplayImage, ImageDecoder,
    encode_payload,
};
pub use atelier_present::{
    ELLIPSIS, Gallery, ImageView, PresentationAdapter, Row, spawn_warm, truncate, warm_deferred,
};
pub use atelier_upload::{
    FilePart, MetadataPart, MultipartRequestBody, PlaceholderPolicy, UploadAssembler, UploadConfig,
    resubmission_files,
};
