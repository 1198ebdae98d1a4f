//! Resilient fetch loop
//!
//! Wraps a [`FetchService`] in a retry loop gated by the content validator:
//! 403 responses, transport failures, and invalid bodies are all retried up
//! to a fixed attempt count with a fixed delay between attempts. The delay
//! is deliberately constant - no exponential growth, no jitter - so the
//! observable timing of a run stays predictable.

use crate::scrape::validator::{validate, InvalidContent};
use crate::scrape::{FetchOptions, FetchService, TransportError};
use std::time::Duration;
use thiserror::Error;

/// Retry behavior for a fetch
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts before giving up
    pub max_attempts: u32,

    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(5000),
        }
    }
}

/// A fetch that passed the 403 gate and content validation
#[derive(Debug, Clone)]
pub struct FetchSuccess {
    pub body: String,
    pub status_code: u16,
}

/// Failure kinds produced by the fetch loop
///
/// `Transport`, `Forbidden`, and `InvalidContent` are retryable and absorbed
/// inside [`fetch_with_retry`]; only `ExhaustedRetries` ever escapes it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("403 Forbidden")]
    Forbidden,

    #[error("Invalid content: {0}")]
    InvalidContent(#[from] InvalidContent),

    #[error("Giving up on {url} after {attempts} attempts: {last}")]
    ExhaustedRetries {
        url: String,
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },
}

/// Fetches a URL, retrying through transport errors, 403s, and invalid bodies
///
/// Each attempt calls the collaborator, rejects 403 responses, and runs the
/// body through the content validator. Failed attempts sleep the fixed
/// policy delay before the next try; the delay never runs after the final
/// attempt. Exhaustion wraps the last failure in
/// [`FetchError::ExhaustedRetries`].
///
/// # Arguments
///
/// * `service` - The fetch collaborator
/// * `url` - The URL to fetch
/// * `options` - Options forwarded to the collaborator
/// * `policy` - Attempt count and inter-attempt delay
pub async fn fetch_with_retry(
    service: &dyn FetchService,
    url: &str,
    options: &FetchOptions,
    policy: &RetryPolicy,
) -> Result<FetchSuccess, FetchError> {
    let mut attempt = 0;

    loop {
        attempt += 1;

        match attempt_fetch(service, url, options).await {
            Ok(success) => {
                tracing::info!(
                    "Fetched {} ({} chars, status {}) on attempt {}/{}",
                    url,
                    success.body.chars().count(),
                    success.status_code,
                    attempt,
                    policy.max_attempts
                );
                return Ok(success);
            }
            Err(failure) => {
                tracing::warn!(
                    "Attempt {}/{} failed for {}: {}",
                    attempt,
                    policy.max_attempts,
                    url,
                    failure
                );

                if attempt >= policy.max_attempts {
                    return Err(FetchError::ExhaustedRetries {
                        url: url.to_string(),
                        attempts: attempt,
                        last: Box::new(failure),
                    });
                }
            }
        }

        tokio::time::sleep(policy.delay).await;
    }
}

/// One fetch attempt: transport, then the 403 gate, then validation
async fn attempt_fetch(
    service: &dyn FetchService,
    url: &str,
    options: &FetchOptions,
) -> Result<FetchSuccess, FetchError> {
    let response = service.fetch(url, options).await?;

    if response.status_code == 403 {
        return Err(FetchError::Forbidden);
    }

    validate(&response.body, url)?;

    Ok(FetchSuccess {
        body: response.body,
        status_code: response.status_code,
    })
}
