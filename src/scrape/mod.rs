//! Fetching and content validation
//!
//! This module owns everything between a URL and a usable page body:
//! - The [`FetchService`] collaborator trait and its default HTTP
//!   implementation
//! - Content validation that keeps block pages and interstitials out of the
//!   diff pipeline
//! - The resilient retry loop gating fetches through the validator

mod fetcher;
mod validator;

pub use fetcher::{fetch_with_retry, FetchError, FetchSuccess, RetryPolicy};
pub use validator::{validate, InvalidContent, MIN_CONTENT_LENGTH};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Options forwarded to the fetch collaborator
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Ask the collaborator to execute page JavaScript before returning
    pub render: bool,

    /// How long the collaborator should wait after rendering (milliseconds)
    pub wait_ms: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            render: true,
            wait_ms: 10000,
        }
    }
}

/// Raw result of a single fetch: status plus body, before any validation
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status_code: u16,
    pub body: String,
}

/// Transport-level fetch failure (connection, TLS, timeout, body read)
#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

/// The fetch collaborator contract
///
/// Implementations deliver the response body and status for a URL, raising
/// [`TransportError`] only for transport-level failures. HTTP error statuses
/// are returned as ordinary responses; the retry loop decides what to do
/// with them.
#[async_trait]
pub trait FetchService: Send + Sync {
    async fn fetch(&self, url: &str, options: &FetchOptions)
        -> Result<FetchResponse, TransportError>;
}

/// Default [`FetchService`] over a reqwest client
///
/// Fetches raw HTML only; the `render` option is accepted but not acted on.
/// A rendering collaborator (headless browser, scraping API) can replace
/// this implementation without touching the retry loop.
pub struct HttpFetchService {
    client: reqwest::Client,
}

impl HttpFetchService {
    /// Builds the service with sensible timeouts and compression enabled
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pagewatch/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FetchService for HttpFetchService {
    async fn fetch(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<FetchResponse, TransportError> {
        if options.render {
            tracing::debug!("JavaScript rendering requested for {}; fetching raw HTML", url);
        }

        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        Ok(FetchResponse { status_code, body })
    }
}
