//! Tracing subscriber setup.

#[cfg(feature = "otel")]
use opentelemetry::{KeyValue, global, trace::TracerProvider};
#[cfg(feature = "otel")]
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging and span export.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name for telemetry attribution
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log level filter (e.g., "info", "atelier_cache=debug")
    pub log_level: String,
    /// Enable JSON-formatted logs for structured logging
    pub json_logs: bool,
}

impl ObservabilityConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: false,
        }
    }

    /// Set the service version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Install the global subscriber with default configuration.
///
/// # Errors
///
/// Fails if the filter is invalid or a global subscriber is already set.
pub fn init_observability() -> Result<(), Box<dyn std::error::Error>> {
    init_observability_with_config(ObservabilityConfig::default())
}

/// Install the global subscriber.
///
/// This sets up:
/// - An `EnvFilter` from `RUST_LOG`, falling back to `log_level`
/// - A text or JSON fmt layer
/// - With the `otel` feature, an OpenTelemetry layer exporting spans to stdout
///
/// # Errors
///
/// Fails if the filter is invalid or a global subscriber is already set.
pub fn init_observability_with_config(
    config: ObservabilityConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    let registry = tracing_subscriber::registry().with(env_filter).with(fmt_layer);

    #[cfg(feature = "otel")]
    let registry = {
        let resource = Resource::builder()
            .with_service_name(config.service_name.clone())
            .with_attributes(vec![KeyValue::new(
                "service.version",
                config.service_version.clone(),
            )])
            .build();

        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .with_resource(resource)
            .build();
        global::set_tracer_provider(provider.clone());

        let tracer = provider.tracer(config.service_name.clone());
        registry.with(tracing_opentelemetry::layer().with_tracer(tracer))
    };

    registry.try_init()?;
    tracing::debug!(
        service = %config.service_name,
        version = %config.service_version,
        json = config.json_logs,
        "Observability initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_override_defaults() {
        let config = ObservabilityConfig::new("admin")
            .with_version("9.9.9")
            .with_log_level("atelier_cache=debug")
            .with_json_logs(true);

        assert_eq!(config.service_name, "admin");
        assert_eq!(config.service_version, "9.9.9");
        assert_eq!(config.log_level, "atelier_cache=debug");
        assert!(config.json_logs);
    }
}
