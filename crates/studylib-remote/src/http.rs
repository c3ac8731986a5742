//! HTTP transport for the notes service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use studylib_core::config::api::ApiConfig;
use studylib_core::error::{AppError, ErrorKind};
use studylib_core::result::AppResult;
use studylib_core::traits::transport::{NotesTransport, QueryParams};

/// `reqwest`-backed transport.
///
/// `reqwest::Client` is internally reference-counted and safe to share
/// across concurrent requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport from API configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("study-library/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str, query: &QueryParams) -> AppResult<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse_with_params(&raw, query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .map_err(|e| AppError::configuration(format!("Invalid notes service URL '{raw}': {e}")))
    }
}

#[async_trait]
impl NotesTransport for HttpTransport {
    async fn get_json(&self, path: &str, query: &QueryParams) -> AppResult<serde_json::Value> {
        let url = self.url(path, query)?;
        debug!(%url, "GET");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            let reason = if e.is_timeout() { "timed out" } else { "failed" };
            AppError::with_source(
                ErrorKind::Network,
                format!("Request to {url} {reason}: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::network(format!("{url} answered HTTP {status}")));
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Response from {url} is not valid JSON: {e}"),
                e,
            )
        })
    }

    fn transport_type(&self) -> &str {
        "http"
    }
}
