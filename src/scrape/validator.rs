//! Fetched-content validation
//!
//! Anti-bot interstitials, block pages, and half-rendered shells come back
//! with status 200 and must never reach the diff pipeline. This module
//! classifies a fetched body as usable or not, with an ordered set of
//! short-circuiting checks.

use crate::snapshot::is_robots_url;
use thiserror::Error;

/// Minimum body length for a real page, in characters
pub const MIN_CONTENT_LENGTH: usize = 1000;

/// How many leading characters are scanned for error indicators
const ERROR_SCAN_WINDOW: usize = 5000;

/// Phrases that mark a blocked or broken page
const ERROR_INDICATORS: [&str; 4] = ["error", "blocked", "captcha", "access denied"];

/// Reason a fetched body was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidContent {
    #[error("Empty content")]
    Empty,

    #[error("Content too short (less than 1000 characters)")]
    TooShort,

    #[error("Missing basic HTML structure (html/head/body tags)")]
    MissingStructure,

    #[error("Page contains error indicators")]
    ErrorIndicators,
}

/// Classifies a fetched body as usable or not
///
/// Checks run in order and short-circuit:
///
/// 1. Empty or whitespace-only body
/// 2. Body shorter than [`MIN_CONTENT_LENGTH`] characters
/// 3. robots.txt URLs pass immediately (they are plain text, not HTML)
/// 4. Case-insensitive `<html>`, `<head>`, `<body>` opening tags required
/// 5. The first 5000 characters must not contain an error indicator phrase
///
/// # Arguments
///
/// * `body` - The fetched response body
/// * `url` - The URL the body was fetched from
///
/// # Returns
///
/// * `Ok(())` - Body is usable
/// * `Err(InvalidContent)` - Body was rejected, with the reason
pub fn validate(body: &str, url: &str) -> Result<(), InvalidContent> {
    if body.trim().is_empty() {
        return Err(InvalidContent::Empty);
    }

    if body.chars().count() < MIN_CONTENT_LENGTH {
        return Err(InvalidContent::TooShort);
    }

    // robots.txt is plain text; length checks are all it gets
    if is_robots_url(url) {
        return Ok(());
    }

    let lower = body.to_lowercase();

    if !has_opening_tag(&lower, "html")
        || !has_opening_tag(&lower, "head")
        || !has_opening_tag(&lower, "body")
    {
        return Err(InvalidContent::MissingStructure);
    }

    let window: String = lower.chars().take(ERROR_SCAN_WINDOW).collect();
    if ERROR_INDICATORS
        .iter()
        .any(|indicator| window.contains(indicator))
    {
        return Err(InvalidContent::ErrorIndicators);
    }

    Ok(())
}

/// Checks for an opening tag like `<body ...>` in an already-lowercased body
fn has_opening_tag(haystack: &str, tag: &str) -> bool {
    let needle = format!("<{}", tag);
    match haystack.find(&needle) {
        Some(idx) => haystack[idx..].contains('>'),
        None => false,
    }
}
