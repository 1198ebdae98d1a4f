//! Page snapshots
//!
//! A [`PageSnapshot`] is the structured record of one validated fetch of one
//! URL at one point in time. Snapshots are immutable once created and owned
//! by the store as an append-only, per-URL ordered log.

mod parser;

pub use parser::parse;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Format string producing the 14-digit `YYYYMMDDhhmmss` timestamp
///
/// Fixed width and zero padding make these strings lexicographically
/// sortable, which the store's retention cutoff relies on.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Structured record of one validated fetch of one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,

    /// 14-digit `YYYYMMDDhhmmss`, UTC
    pub timestamp: String,

    pub status_code: Option<u16>,

    pub raw_html: String,

    /// First `<title>` text, trimmed ("" when absent)
    pub title: String,

    /// Title is non-empty and not itself a parseable absolute URL
    pub has_title: bool,

    /// Href of the first `<link rel="canonical">` ("" when absent)
    pub canonical: String,

    /// Canonical resolves to the page's own URL (single trailing slash
    /// stripped from both sides before the exact compare)
    pub is_canonical_self_ref: bool,

    /// Content of the first `<meta name="description">` ("" when absent)
    pub meta_description: String,

    pub has_meta_description: bool,

    /// All `<h1>` texts in document order, trimmed
    pub h1: Vec<String>,

    /// Exactly one h1 on the page
    pub has_h1: bool,

    /// More than one h1 on the page
    pub multiple_h1s: bool,
}

impl PageSnapshot {
    /// The first h1, or "" when the page has none
    pub fn first_h1(&self) -> &str {
        self.h1.first().map(String::as_str).unwrap_or("")
    }
}

/// Current UTC time as a 14-digit snapshot timestamp
pub fn current_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Timestamp cutoff for the retention purge: now minus `days`
pub fn retention_cutoff(days: i64) -> String {
    (Utc::now() - Duration::days(days))
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Whether a URL denotes a robots.txt resource
pub fn is_robots_url(url: &str) -> bool {
    url.contains("robots.txt")
}

/// Whether a text parses as an absolute http(s) URL
///
/// Used to reject titles that are really just leaked URLs.
pub fn looks_like_url(text: &str) -> bool {
    match Url::parse(text) {
        Ok(url) => url.scheme() == "http" || url.scheme() == "https",
        Err(_) => false,
    }
}
