//! Monitor coordinator - per-run orchestration logic
//!
//! The coordinator walks the configured URL list strictly sequentially:
//! resilient fetch, parse, append to the store, then compare each scraped
//! URL against its own two most recent stored versions. Every per-URL
//! result is captured locally and folded into the run report, so the
//! report is a pure function of the per-URL outcomes.

use crate::compare::compare;
use crate::config::Config;
use crate::monitor::{Comparison, RunReport, ScrapeFailure, ScrapeOutcome};
use crate::nav::NavLocators;
use crate::scrape::{fetch_with_retry, FetchError, FetchOptions, FetchService, RetryPolicy};
use crate::snapshot::{current_timestamp, parse, retention_cutoff};
use crate::storage::SnapshotStore;
use std::time::Duration;

/// Sequential monitor over a fixed URL list
pub struct Monitor<S: SnapshotStore, F: FetchService> {
    urls: Vec<String>,
    options: FetchOptions,
    policy: RetryPolicy,
    retention_days: i64,
    locators: NavLocators,
    store: S,
    fetcher: F,
}

impl<S: SnapshotStore, F: FetchService> Monitor<S, F> {
    /// Builds a monitor from the loaded configuration
    pub fn new(config: &Config, store: S, fetcher: F) -> Self {
        Self {
            urls: config.urls.clone(),
            options: FetchOptions {
                render: config.monitor.render_js,
                wait_ms: config.monitor.render_wait_ms,
            },
            policy: RetryPolicy {
                max_attempts: config.monitor.max_attempts,
                delay: Duration::from_millis(config.monitor.retry_delay_ms),
            },
            retention_days: config.monitor.retention_days,
            locators: NavLocators::from_config(&config.nav_locators),
            store,
            fetcher,
        }
    }

    /// Runs one monitoring pass over every configured URL
    ///
    /// Every URL is attempted; a URL whose fetch exhausts its retries shows
    /// up in the report's failures and is excluded from storage and
    /// comparison, without affecting any other URL. Store failures are
    /// fatal and propagate.
    pub async fn run(&mut self) -> crate::Result<RunReport> {
        tracing::info!("Starting monitoring run over {} URLs", self.urls.len());

        let urls = self.urls.clone();
        let mut outcomes = Vec::with_capacity(urls.len());
        for url in &urls {
            outcomes.push(self.process_url(url).await?);
        }

        let mut pages = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                ScrapeOutcome::Scraped(snapshot) => pages.push(snapshot),
                ScrapeOutcome::Failed(failure) => failures.push(failure),
            }
        }

        let mut comparisons = Vec::new();
        for page in &pages {
            if let Some(comparison) = self.compare_against_history(&page.url)? {
                comparisons.push(comparison);
            }
        }

        tracing::info!(
            "Run complete: {} scraped, {} failed, {} comparison outcomes",
            pages.len(),
            failures.len(),
            comparisons.len()
        );

        Ok(RunReport {
            pages,
            comparisons,
            failures,
        })
    }

    /// Deletes snapshots older than the configured retention window
    ///
    /// # Returns
    ///
    /// The number of purged snapshots
    pub fn purge_expired(&mut self) -> crate::Result<usize> {
        let cutoff = retention_cutoff(self.retention_days);
        tracing::info!(
            "Purging snapshots older than {} days (cutoff: {})",
            self.retention_days,
            cutoff
        );

        let deleted = self.store.delete_older_than(&cutoff)?;
        tracing::info!("Purged {} expired snapshots", deleted);
        Ok(deleted)
    }

    /// Fetches, parses, and stores one URL
    ///
    /// Retry exhaustion becomes a `ScrapeOutcome::Failed`; only store
    /// failures escape as errors.
    async fn process_url(&mut self, url: &str) -> crate::Result<ScrapeOutcome> {
        match fetch_with_retry(&self.fetcher, url, &self.options, &self.policy).await {
            Ok(success) => {
                let timestamp = current_timestamp();
                let snapshot = parse(&success.body, url, &timestamp, Some(success.status_code));
                self.store.append(&snapshot)?;
                tracing::info!("Stored snapshot of {} at {}", url, timestamp);
                Ok(ScrapeOutcome::Scraped(snapshot))
            }
            Err(error) => {
                tracing::error!("{}", error);
                let failure = match error {
                    FetchError::ExhaustedRetries { attempts, last, .. } => ScrapeFailure {
                        url: url.to_string(),
                        attempts,
                        reason: last.to_string(),
                    },
                    other => ScrapeFailure {
                        url: url.to_string(),
                        attempts: self.policy.max_attempts,
                        reason: other.to_string(),
                    },
                };
                Ok(ScrapeOutcome::Failed(failure))
            }
        }
    }

    /// Compares a URL's two most recent stored versions
    fn compare_against_history(&self, url: &str) -> crate::Result<Option<Comparison>> {
        let versions = self.store.last_n(url, 2)?;

        match versions.len() {
            2 => {
                let changes = compare(&versions[1], &versions[0], &self.locators);
                if changes.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Comparison::Changed {
                        url: url.to_string(),
                        changes,
                    }))
                }
            }
            1 => Ok(Some(Comparison::FirstScrape {
                url: url.to_string(),
            })),
            _ => Ok(None),
        }
    }
}
