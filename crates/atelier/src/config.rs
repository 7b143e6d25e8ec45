//! Layered configuration for the whole pipeline.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from atelier.toml)
//! - `~/.config/atelier/atelier.toml`
//! - `./atelier.toml`

use atelier_cache::DecodeCacheConfig;
use atelier_client::{ApiConfig, EndpointConfig};
use atelier_codec::CodecConfig;
use atelier_core::ContentKind;
use atelier_error::{AtelierError, AtelierResult, ConfigError};
use atelier_upload::UploadConfig;
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../atelier.toml");

/// Top-level Atelier configuration.
///
/// # Example
///
/// ```
/// use atelier::AtelierConfig;
/// use atelier_core::ContentKind;
///
/// let config = AtelierConfig::from_toml_str(
///     r#"
///     [api]
///     base_url = "https://cms.example.test/api"
///
///     [endpoints.banner]
///     path = "home/banners"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.api().base_url(), "https://cms.example.test/api");
/// assert_eq!(config.endpoint(ContentKind::Banner).path(), "home/banners");
/// assert_eq!(config.endpoint(ContentKind::Brand).path(), "brands");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct AtelierConfig {
    /// Content API connection
    #[serde(default)]
    api: ApiConfig,

    /// Decoding and display
    #[serde(default)]
    codec: CodecConfig,

    /// Decode cache
    #[serde(default)]
    cache: DecodeCacheConfig,

    /// Multipart part names
    #[serde(default)]
    upload: UploadConfig,

    /// Per-kind endpoint paths and placeholder policy
    #[serde(default)]
    endpoints: HashMap<ContentKind, EndpointConfig>,
}

impl AtelierConfig {
    /// Load with precedence: current dir > home dir > bundled defaults.
    ///
    /// # Errors
    ///
    /// Fails if a present file cannot be read or the merged result does not
    /// deserialize.
    #[instrument]
    pub fn load() -> AtelierResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut overrides = Vec::with_capacity(2);
        if let Some(home) = dirs::home_dir() {
            overrides.push(home.join(".config/atelier/atelier.toml"));
        }
        overrides.push(PathBuf::from("atelier.toml"));

        Self::load_layered(overrides)
    }

    /// Bundled defaults overridden by each file in turn.
    ///
    /// Later files win key by key; files that do not exist are skipped.
    ///
    /// # Errors
    ///
    /// Fails if a present file cannot be parsed or the merged result does
    /// not deserialize.
    pub fn load_layered<I, P>(overrides: I) -> AtelierResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        for path in overrides {
            builder = builder.add_source(File::from(path.as_ref()).required(false));
        }
        Self::deserialize_from(builder.build())
    }

    /// Load from one file, without bundled defaults.
    ///
    /// Sections and keys left out take their built-in defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> AtelierResult<Self> {
        debug!("Loading configuration from file");
        let built = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                AtelierError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?;
        Self::deserialize_from(Ok(built))
    }

    /// Parse a TOML document, without bundled defaults.
    ///
    /// # Errors
    ///
    /// Fails if the text is not valid TOML or does not match the schema.
    pub fn from_toml_str(toml: &str) -> AtelierResult<Self> {
        Self::deserialize_from(
            Config::builder()
                .add_source(File::from_str(toml, FileFormat::Toml))
                .build(),
        )
    }

    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled file is broken.
    pub fn bundled() -> AtelierResult<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Endpoint for a kind; kinds nobody configured get the plural kind
    /// name and no placeholder part.
    pub fn endpoint(&self, kind: ContentKind) -> EndpointConfig {
        self.endpoints
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| EndpointConfig::fallback(kind))
    }

    /// Replace the API section.
    pub fn with_api(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    /// Replace the cache section.
    pub fn with_cache(mut self, cache: DecodeCacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Set the endpoint for one kind.
    pub fn with_endpoint(mut self, kind: ContentKind, endpoint: EndpointConfig) -> Self {
        self.endpoints.insert(kind, endpoint);
        self
    }

    fn deserialize_from(built: Result<Config, config::ConfigError>) -> AtelierResult<Self> {
        built
            .map_err(|e| {
                AtelierError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                AtelierError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
