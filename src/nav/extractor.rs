//! Navigation link extraction
//!
//! Pulls the same-origin link set out of a homepage's navigation container.
//! Non-homepage paths yield nothing: interior pages repeat the same menu,
//! so diffing it once per site is enough.

use crate::nav::{NavLink, NavLocators};
use scraper::{Html, Selector};
use url::Url;

/// Extracts the navigation link set from a page
///
/// Returns an empty list unless the page URL's path is root (`/` or empty).
/// The navigation container is located through the host-pattern table; no
/// matching container in the document means no links.
///
/// Within the container, each `<a href=…>` is kept when:
/// - the href is absolute http(s), or root-relative (`/…`, resolved against
///   the page's scheme and host) - every other shape is skipped
/// - the anchor has non-empty visible text (whitespace collapsed)
/// - the resolved host equals the page's host (external links dropped)
///
/// Duplicate URLs within one container are preserved, not deduplicated.
pub fn extract_nav(html: &str, page_url: &str, locators: &NavLocators) -> Vec<NavLink> {
    let Ok(page) = Url::parse(page_url) else {
        return Vec::new();
    };

    if page.path() != "/" && !page.path().is_empty() {
        return Vec::new();
    }

    let Some(host) = page.host_str() else {
        return Vec::new();
    };

    let Some(container_css) = locators.resolve(host) else {
        return Vec::new();
    };

    let Ok(container_selector) = Selector::parse(container_css) else {
        return Vec::new();
    };

    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for container in document.select(&container_selector) {
        for anchor in container.select(&anchor_selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            let text = collapse_whitespace(&anchor.text().collect::<String>());
            if text.is_empty() {
                continue;
            }

            let Some(resolved) = resolve_href(href, page.scheme(), host) else {
                continue;
            };

            // Same-origin filter
            let Ok(resolved_url) = Url::parse(&resolved) else {
                continue;
            };
            if resolved_url.host_str() != Some(host) {
                continue;
            }

            links.push(NavLink {
                url: resolved,
                text,
            });
        }
    }

    links
}

/// Resolves an href to an absolute URL string, or drops it
///
/// Absolute http(s) hrefs pass through untouched; root-relative hrefs are
/// joined onto the page's scheme and host; everything else (fragments,
/// mailto:, protocol-relative, bare-relative paths) is skipped.
fn resolve_href(href: &str, scheme: &str, host: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        Some(href.to_string())
    } else if href.starts_with('/') && !href.starts_with("//") {
        Some(format!("{}://{}{}", scheme, host, href))
    } else {
        None
    }
}

/// Trims and collapses internal whitespace runs to single spaces
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
