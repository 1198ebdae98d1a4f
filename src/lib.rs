//! Pagewatch: an SEO page-change monitor
//!
//! This crate periodically fetches a fixed set of web pages, extracts
//! SEO-relevant structural fields, and detects meaningful changes versus the
//! previously recorded version of each page, classifying differences for
//! downstream reporting.

pub mod compare;
pub mod config;
pub mod monitor;
pub mod nav;
pub mod report;
pub mod scrape;
pub mod snapshot;
pub mod storage;

use thiserror::Error;

/// Main error type for pagewatch operations
#[derive(Debug, Error)]
pub enum PagewatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error for {url}: {source}")]
    Fetch {
        url: String,
        source: scrape::FetchError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid nav locator: {0}")]
    InvalidLocator(String),
}

/// Result type alias for pagewatch operations
pub type Result<T> = std::result::Result<T, PagewatchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use compare::{compare, Change};
pub use config::Config;
pub use monitor::{Comparison, Monitor, RunReport, ScrapeFailure};
pub use nav::{diff_nav, extract_nav, NavLink, NavLocators};
pub use snapshot::{parse, PageSnapshot};
