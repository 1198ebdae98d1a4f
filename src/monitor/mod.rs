//! Run orchestration
//!
//! Ties fetch → parse → store → compare together per URL and folds the
//! per-URL results into an immutable [`RunReport`]. One URL's failure never
//! touches another URL's outcome.

mod coordinator;

pub use coordinator::Monitor;

use crate::compare::Change;
use crate::snapshot::PageSnapshot;

/// Per-URL scrape result: a validated snapshot or a terminal failure,
/// never both
#[derive(Debug, Clone)]
pub enum ScrapeOutcome {
    Scraped(PageSnapshot),
    Failed(ScrapeFailure),
}

/// A URL whose fetch exhausted its retries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeFailure {
    pub url: String,

    /// Attempts made before giving up
    pub attempts: u32,

    /// The last failure that exhausted the retries
    pub reason: String,
}

/// Outcome of comparing a URL against its stored history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// Two versions existed and differed; `changes` is never empty
    Changed { url: String, changes: Vec<Change> },

    /// Only one version exists - nothing to compare against yet
    FirstScrape { url: String },
}

/// Immutable fold of one run's per-URL results
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Snapshots successfully scraped this run
    pub pages: Vec<PageSnapshot>,

    /// Per-URL comparison outcomes for the successfully scraped URLs
    pub comparisons: Vec<Comparison>,

    /// URLs whose fetch exhausted retries this run
    pub failures: Vec<ScrapeFailure>,
}
