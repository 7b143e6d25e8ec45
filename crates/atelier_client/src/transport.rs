//! HTTP transport to the content API.

use atelier_error::{AtelierResult, HttpError, JsonError};
use atelier_upload::MultipartRequestBody;
use derive_getters::Getters;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

/// Body of a mutating request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Plain JSON document
    Json(Value),
    /// Metadata plus image files
    Multipart(MultipartRequestBody),
}

/// Thin client for the content API.
///
/// Any non-2xx response is an error. An empty response body parses as
/// `Value::Null`.
#[async_trait::async_trait]
pub trait ContentTransport: Send + Sync {
    /// GET a path.
    async fn get(&self, path: &str) -> AtelierResult<Value>;

    /// POST a body to a path.
    async fn post(&self, path: &str, body: RequestBody) -> AtelierResult<Value>;

    /// PUT a body to a path.
    async fn put(&self, path: &str, body: RequestBody) -> AtelierResult<Value>;

    /// DELETE a path.
    async fn delete(&self, path: &str) -> AtelierResult<Value>;
}

/// API connection settings.
///
/// ```toml
/// [api]
/// base_url = "http://localhost:8080/api"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ApiConfig {
    /// Base URL every path is joined to
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Create a configuration for a base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// [`ContentTransport`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: &ApiConfig) -> Result<Self, HttpError> {
        tracing::debug!("Creating content API transport");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    #[instrument(skip(self, method, body), fields(%method))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> AtelierResult<Value> {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), &url);
        request = match body {
            None => request,
            Some(RequestBody::Json(json)) => request.json(&json),
            Some(RequestBody::Multipart(multipart)) => request.multipart(multipart.into_form()?),
        };

        let response = request.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            HttpError::new(format!("{} {} failed: {}", method, path, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Server returned error");
            return Err(HttpError::with_status(
                status.as_u16(),
                format!("{} {} returned {}", method, path, status),
            )
            .into());
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            HttpError::with_status(status.as_u16(), format!("Failed to read response: {}", e))
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        let value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            JsonError::new(format!("Failed to parse response from {}: {}", path, e))
        })?;
        tracing::debug!(status = status.as_u16(), "Request succeeded");
        Ok(value)
    }
}

#[async_trait::async_trait]
impl ContentTransport for ReqwestTransport {
    async fn get(&self, path: &str) -> AtelierResult<Value> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: RequestBody) -> AtelierResult<Value> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: RequestBody) -> AtelierResult<Value> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> AtelierResult<Value> {
        self.send(Method::DELETE, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let transport = ReqwestTransport::new(&ApiConfig::new("http://example.test/api/")).unwrap();
        assert_eq!(transport.base_url(), "http://example.test/api");
        assert_eq!(transport.url("/banners/3"), "http://example.test/api/banners/3");
        assert_eq!(transport.url("brands"), "http://example.test/api/brands");
    }
}
