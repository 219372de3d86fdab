use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::{DEFAULT_CWA_URL, DEFAULT_FETCH_TIMEOUT};

/// Everything needed to call the CWA open data file API
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Skip TLS certificate validation. Off unless the operator asks for it.
    pub accept_invalid_certs: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_CWA_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT),
            accept_invalid_certs: false,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: StatusCode },
    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("Response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of the raw upstream forecast document.
///
/// The ingest job and the coordinate resolver each fetch their own copy.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch_document(&self) -> Result<Value, FetchError>;
}

pub struct CwaFetcher {
    client: Client,
    settings: FetchSettings,
}

impl CwaFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, settings })
    }

    fn query(&self) -> [(&'static str, &str); 3] {
        [
            ("Authorization", self.settings.api_key.as_str()),
            ("downloadType", "WEB"),
            ("format", "JSON"),
        ]
    }
}

#[async_trait]
impl ForecastSource for CwaFetcher {
    async fn fetch_document(&self) -> Result<Value, FetchError> {
        let url = &self.settings.url;
        debug!("requesting: {}", url);

        let response = self
            .client
            .get(url)
            .query(&self.query())
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status,
            });
        }

        let body = response.bytes().await.map_err(FetchError::Body)?;
        debug!("received {} bytes from {}", body.len(), url);
        Ok(serde_json::from_slice(&body)?)
    }
}
