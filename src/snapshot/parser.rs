//! HTML to snapshot extraction
//!
//! Turns raw HTML into a [`PageSnapshot`]. Extraction never fails: malformed
//! markup and missing elements yield field defaults, so a degraded page
//! still produces a comparable snapshot.

use crate::snapshot::{looks_like_url, PageSnapshot};
use scraper::{Html, Selector};
use url::Url;

/// Parses raw HTML into a snapshot
///
/// # Arguments
///
/// * `html` - The raw page HTML
/// * `url` - The URL the page was fetched from
/// * `timestamp` - 14-digit `YYYYMMDDhhmmss` fetch time
/// * `status_code` - HTTP status of the fetch, when known
///
/// # Example
///
/// ```
/// use pagewatch::snapshot::parse;
///
/// let html = r#"<html><head><title>Shop</title></head><body><h1>Shop</h1></body></html>"#;
/// let snapshot = parse(html, "https://example.com/", "20260807120000", Some(200));
/// assert_eq!(snapshot.title, "Shop");
/// assert!(snapshot.has_h1);
/// ```
pub fn parse(html: &str, url: &str, timestamp: &str, status_code: Option<u16>) -> PageSnapshot {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let has_title = !title.is_empty() && !looks_like_url(&title);

    let canonical = extract_canonical(&document);
    let is_canonical_self_ref = is_self_referencing(&canonical, url);

    let meta_description = extract_meta_description(&document);
    let has_meta_description = !meta_description.is_empty();

    let h1 = extract_h1s(&document);
    let has_h1 = h1.len() == 1;
    let multiple_h1s = h1.len() > 1;

    PageSnapshot {
        url: url.to_string(),
        timestamp: timestamp.to_string(),
        status_code,
        raw_html: html.to_string(),
        title,
        has_title,
        canonical,
        is_canonical_self_ref,
        meta_description,
        has_meta_description,
        h1,
        has_h1,
        multiple_h1s,
    }
}

/// First `<title>` text, trimmed
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Href of the first `<link rel="canonical">`
fn extract_canonical(document: &Html) -> String {
    let Ok(selector) = Selector::parse(r#"link[rel="canonical"]"#) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .unwrap_or_default()
        .to_string()
}

/// Content of the first `<meta name="description">`
fn extract_meta_description(document: &Html) -> String {
    let Ok(selector) = Selector::parse(r#"meta[name="description"]"#) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .unwrap_or_default()
        .to_string()
}

/// All `<h1>` texts in document order, trimmed
fn extract_h1s(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("h1") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect()
}

/// Whether the canonical href points back at the page itself
///
/// Both sides must parse as URLs; their serializations are compared exactly
/// after stripping a single trailing slash from each. Any parse failure
/// means false.
fn is_self_referencing(canonical: &str, page_url: &str) -> bool {
    if canonical.is_empty() {
        return false;
    }

    let (Ok(canonical_url), Ok(page)) = (Url::parse(canonical), Url::parse(page_url)) else {
        return false;
    };

    let canonical_str = canonical_url.to_string();
    let page_str = page.to_string();

    strip_trailing_slash(&canonical_str) == strip_trailing_slash(&page_str)
}

fn strip_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "20260807120000";

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>  Shop All Shoes  </title></head><body></body></html>"#;
        let snapshot = parse(html, "https://example.com/", TS, Some(200));
        assert_eq!(snapshot.title, "Shop All Shoes");
        assert!(snapshot.has_title);
    }

    #[test]
    fn test_missing_title_yields_default() {
        let snapshot = parse("<html><head></head><body></body></html>", "https://example.com/", TS, None);
        assert_eq!(snapshot.title, "");
        assert!(!snapshot.has_title);
    }

    #[test]
    fn test_url_title_is_not_a_real_title() {
        let html = r#"<html><head><title>https://example.com/page</title></head><body></body></html>"#;
        let snapshot = parse(html, "https://example.com/", TS, None);
        assert_eq!(snapshot.title, "https://example.com/page");
        assert!(!snapshot.has_title);
    }

    #[test]
    fn test_canonical_self_ref_exact() {
        let html = r#"<html><head><link rel="canonical" href="https://example.com/page"></head><body></body></html>"#;
        let snapshot = parse(html, "https://example.com/page", TS, None);
        assert_eq!(snapshot.canonical, "https://example.com/page");
        assert!(snapshot.is_canonical_self_ref);
    }

    #[test]
    fn test_canonical_self_ref_ignores_single_trailing_slash() {
        let html = r#"<html><head><link rel="canonical" href="https://example.com/page/"></head><body></body></html>"#;
        let snapshot = parse(html, "https://example.com/page", TS, None);
        assert!(snapshot.is_canonical_self_ref);
    }

    #[test]
    fn test_canonical_pointing_elsewhere() {
        let html = r#"<html><head><link rel="canonical" href="https://example.com/other"></head><body></body></html>"#;
        let snapshot = parse(html, "https://example.com/page", TS, None);
        assert!(!snapshot.is_canonical_self_ref);
    }

    #[test]
    fn test_unparseable_canonical_is_not_self_ref() {
        let html = r#"<html><head><link rel="canonical" href="/page"></head><body></body></html>"#;
        let snapshot = parse(html, "https://example.com/page", TS, None);
        assert_eq!(snapshot.canonical, "/page");
        assert!(!snapshot.is_canonical_self_ref);
    }

    #[test]
    fn test_missing_canonical_yields_default() {
        let snapshot = parse("<html><head></head><body></body></html>", "https://example.com/", TS, None);
        assert_eq!(snapshot.canonical, "");
        assert!(!snapshot.is_canonical_self_ref);
    }

    #[test]
    fn test_meta_description_presence_only() {
        let html = r#"<html><head><meta name="description" content="A very fine shop"></head><body></body></html>"#;
        let snapshot = parse(html, "https://example.com/", TS, None);
        assert_eq!(snapshot.meta_description, "A very fine shop");
        assert!(snapshot.has_meta_description);
    }

    #[test]
    fn test_missing_meta_description() {
        let snapshot = parse("<html><head></head><body></body></html>", "https://example.com/", TS, None);
        assert_eq!(snapshot.meta_description, "");
        assert!(!snapshot.has_meta_description);
    }

    #[test]
    fn test_single_h1() {
        let html = "<html><body><h1> Main Heading </h1></body></html>";
        let snapshot = parse(html, "https://example.com/", TS, None);
        assert_eq!(snapshot.h1, vec!["Main Heading"]);
        assert!(snapshot.has_h1);
        assert!(!snapshot.multiple_h1s);
    }

    #[test]
    fn test_multiple_h1s() {
        let html = "<html><body><h1>First</h1><h1>Second</h1></body></html>";
        let snapshot = parse(html, "https://example.com/", TS, None);
        assert_eq!(snapshot.h1, vec!["First", "Second"]);
        assert!(!snapshot.has_h1);
        assert!(snapshot.multiple_h1s);
    }

    #[test]
    fn test_no_h1() {
        let snapshot = parse("<html><body></body></html>", "https://example.com/", TS, None);
        assert!(snapshot.h1.is_empty());
        assert!(!snapshot.has_h1);
        assert!(!snapshot.multiple_h1s);
    }

    #[test]
    fn test_malformed_html_never_panics() {
        let html = "<html><head><title>Broken<body><h1>Oops";
        let snapshot = parse(html, "https://example.com/", TS, None);
        assert_eq!(snapshot.url, "https://example.com/");
        assert_eq!(snapshot.timestamp, TS);
    }

    #[test]
    fn test_raw_html_preserved() {
        let html = "<html><head></head><body>content</body></html>";
        let snapshot = parse(html, "https://example.com/", TS, Some(200));
        assert_eq!(snapshot.raw_html, html);
        assert_eq!(snapshot.status_code, Some(200));
    }
}
