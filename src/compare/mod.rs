//! Version comparison
//!
//! Produces the ordered list of semantic differences between two snapshots
//! of the same URL. Bulk content is diffed fuzzily (a percent-length
//! threshold tolerates minor rewording), while the high-signal short fields
//! - title, canonical, first h1 - are compared exactly. robots.txt bodies
//! are opaque text and get their own raw comparison.

mod visible;

pub use visible::visible_text;

use crate::nav::{diff_nav, extract_nav, NavLink, NavLocators, NavTextChange};
use crate::snapshot::{is_robots_url, PageSnapshot};

/// Rendering of an empty old/new value in a change record
pub const EMPTY_PLACEHOLDER: &str = "(empty)";

/// Visible-content length change (percent) above which a Content change fires
const CONTENT_CHANGE_THRESHOLD: f64 = 20.0;

/// One classified difference between two snapshots
///
/// Ephemeral: computed per comparison, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Visible content length moved past the threshold
    Content { message: String },

    /// `<title>` text changed
    Title { old: String, new: String },

    /// Canonical URL changed
    Canonical { old: String, new: String },

    /// First h1 changed
    H1 { old: String, new: String },

    /// robots.txt body changed
    RobotsTxt {
        message: String,
        old_content: String,
        new_content: String,
    },

    /// Navigation links present before but gone now
    NavRemoved { links: Vec<NavLink> },

    /// Navigation links new in this version
    NavAdded { links: Vec<NavLink> },

    /// Navigation links whose visible text changed
    NavTextChanged { links: Vec<NavTextChange> },
}

/// Compares two snapshots of the same URL, oldest first
///
/// Both snapshots must be of the same URL; the result is unspecified
/// otherwise. Output order: content, title, canonical, h1, then navigation
/// changes (removed, added, text-changed).
///
/// # Arguments
///
/// * `older` - The previously recorded snapshot
/// * `newer` - The snapshot from the current run
/// * `locators` - Navigation container locator table
pub fn compare(older: &PageSnapshot, newer: &PageSnapshot, locators: &NavLocators) -> Vec<Change> {
    if is_robots_url(&newer.url) {
        return compare_robots(older, newer);
    }

    let mut changes = Vec::new();

    // 1. Fuzzy bulk-content compare; a brand-new page (no old text) is not
    //    a content change
    let old_len = visible_text(&older.raw_html).chars().count();
    let new_len = visible_text(&newer.raw_html).chars().count();
    if old_len > 0 {
        let percent = percent_diff(old_len, new_len);
        if percent > CONTENT_CHANGE_THRESHOLD {
            changes.push(Change::Content {
                message: format!(
                    "{:.1}% of visible content difference vs previous version",
                    percent
                ),
            });
        }
    }

    // 2-4. Exact compares on the short fields
    if older.title != newer.title {
        changes.push(Change::Title {
            old: or_placeholder(&older.title),
            new: or_placeholder(&newer.title),
        });
    }

    if older.canonical != newer.canonical {
        changes.push(Change::Canonical {
            old: or_placeholder(&older.canonical),
            new: or_placeholder(&newer.canonical),
        });
    }

    if older.first_h1() != newer.first_h1() {
        changes.push(Change::H1 {
            old: or_placeholder(older.first_h1()),
            new: or_placeholder(newer.first_h1()),
        });
    }

    // 5. Navigation diff (homepage-only; interior pages contribute nothing)
    let old_nav = extract_nav(&older.raw_html, &older.url, locators);
    let new_nav = extract_nav(&newer.raw_html, &newer.url, locators);
    changes.extend(diff_nav(&old_nav, &new_nav));

    changes
}

/// Raw-body comparison for robots.txt
///
/// The full old/new bodies travel with the change; truncating them for
/// display is the report renderer's concern.
fn compare_robots(older: &PageSnapshot, newer: &PageSnapshot) -> Vec<Change> {
    let old_content = older.raw_html.trim();
    let new_content = newer.raw_html.trim();

    if old_content == new_content {
        return Vec::new();
    }

    let old_len = old_content.chars().count();
    let new_len = new_content.chars().count();
    let percent = if old_len > 0 {
        percent_diff(old_len, new_len)
    } else {
        100.0
    };

    vec![Change::RobotsTxt {
        message: format!("robots.txt content changed ({:.1}% difference)", percent),
        old_content: old_content.to_string(),
        new_content: new_content.to_string(),
    }]
}

fn percent_diff(old_len: usize, new_len: usize) -> f64 {
    (new_len as f64 - old_len as f64).abs() / old_len as f64 * 100.0
}

fn or_placeholder(value: &str) -> String {
    if value.is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::parse;

    const URL: &str = "https://www.example.com/page";
    const OLD_TS: &str = "20260806120000";
    const NEW_TS: &str = "20260807120000";

    fn page_html(title: &str, canonical: &str, h1: &str, body_text: &str) -> String {
        format!(
            r#"<html><head><title>{}</title><link rel="canonical" href="{}"></head><body><h1>{}</h1><p>{}</p></body></html>"#,
            title, canonical, h1, body_text
        )
    }

    fn snapshot_pair(old_html: &str, new_html: &str) -> (PageSnapshot, PageSnapshot) {
        (
            parse(old_html, URL, OLD_TS, Some(200)),
            parse(new_html, URL, NEW_TS, Some(200)),
        )
    }

    #[test]
    fn test_identical_snapshots_no_changes() {
        let html = page_html("Shop", "https://www.example.com/page", "Shop", "Welcome");
        let (older, newer) = snapshot_pair(&html, &html);
        assert!(compare(&older, &newer, &NavLocators::default()).is_empty());
    }

    /// Page whose visible body text is exactly `len` characters
    fn content_page(len: usize) -> String {
        format!(
            "<html><head><title>T</title></head><body>{}</body></html>",
            "x".repeat(len)
        )
    }

    #[test]
    fn test_content_change_over_threshold_emitted() {
        let (older, newer) = snapshot_pair(&content_page(1000), &content_page(1250));

        let changes = compare(&older, &newer, &NavLocators::default());

        assert_eq!(
            changes,
            vec![Change::Content {
                message: "25.0% of visible content difference vs previous version".to_string(),
            }]
        );
    }

    #[test]
    fn test_content_change_at_exactly_threshold_not_emitted() {
        let (older, newer) = snapshot_pair(&content_page(1000), &content_page(1200));

        assert!(compare(&older, &newer, &NavLocators::default()).is_empty());
    }

    #[test]
    fn test_content_change_just_over_threshold_emitted() {
        let (older, newer) = snapshot_pair(&content_page(1000), &content_page(1201));

        let changes = compare(&older, &newer, &NavLocators::default());

        assert_eq!(changes.len(), 1);
        assert!(matches!(&changes[0], Change::Content { message }
            if message.starts_with("20.1%")));
    }

    #[test]
    fn test_shrinking_content_also_counts() {
        let (older, newer) = snapshot_pair(&content_page(1000), &content_page(700));

        let changes = compare(&older, &newer, &NavLocators::default());

        assert_eq!(changes.len(), 1);
        assert!(matches!(&changes[0], Change::Content { message }
            if message.starts_with("30.0%")));
    }

    #[test]
    fn test_empty_old_content_never_emits_content_change() {
        let (older, newer) = snapshot_pair(
            "<html><head><title>T</title></head><body></body></html>",
            &page_html("T", "", "", &"x".repeat(5000)),
        );

        let changes = compare(&older, &newer, &NavLocators::default());
        assert!(!changes
            .iter()
            .any(|c| matches!(c, Change::Content { .. })));
    }

    #[test]
    fn test_title_change_renders_empty_placeholder() {
        let (older, newer) = snapshot_pair(
            &page_html("", "", "H", "same"),
            &page_html("New Title", "", "H", "same"),
        );

        let changes = compare(&older, &newer, &NavLocators::default());

        assert_eq!(
            changes,
            vec![Change::Title {
                old: "(empty)".to_string(),
                new: "New Title".to_string(),
            }]
        );
    }

    #[test]
    fn test_title_cleared_renders_empty_placeholder() {
        let (older, newer) = snapshot_pair(
            &page_html("Old Title", "", "H", "same"),
            &page_html("", "", "H", "same"),
        );

        let changes = compare(&older, &newer, &NavLocators::default());

        assert_eq!(
            changes,
            vec![Change::Title {
                old: "Old Title".to_string(),
                new: "(empty)".to_string(),
            }]
        );
    }

    #[test]
    fn test_canonical_change_emitted() {
        let (older, newer) = snapshot_pair(
            &page_html("T", "https://www.example.com/page", "H", "same"),
            &page_html("T", "https://www.example.com/other", "H", "same"),
        );

        let changes = compare(&older, &newer, &NavLocators::default());

        assert_eq!(
            changes,
            vec![Change::Canonical {
                old: "https://www.example.com/page".to_string(),
                new: "https://www.example.com/other".to_string(),
            }]
        );
    }

    #[test]
    fn test_only_first_h1_is_compared() {
        let old_html = "<html><head><title>T</title></head><body><h1>Same</h1><h1>Old Second</h1></body></html>";
        let new_html = "<html><head><title>T</title></head><body><h1>Same</h1><h1>New Second</h1></body></html>";
        let (older, newer) = snapshot_pair(old_html, new_html);

        assert!(compare(&older, &newer, &NavLocators::default()).is_empty());
    }

    #[test]
    fn test_h1_change_emitted() {
        let (older, newer) = snapshot_pair(
            &page_html("T", "", "Old Heading", "same"),
            &page_html("T", "", "New Heading", "same"),
        );

        let changes = compare(&older, &newer, &NavLocators::default());

        assert_eq!(
            changes,
            vec![Change::H1 {
                old: "Old Heading".to_string(),
                new: "New Heading".to_string(),
            }]
        );
    }

    #[test]
    fn test_robots_txt_raw_compare() {
        let older = parse(
            "User-agent: *\nDisallow: /private\n",
            "https://www.example.com/robots.txt",
            OLD_TS,
            Some(200),
        );
        let newer = parse(
            "User-agent: *\nDisallow: /private\nDisallow: /tmp\n",
            "https://www.example.com/robots.txt",
            NEW_TS,
            Some(200),
        );

        let changes = compare(&older, &newer, &NavLocators::default());

        assert_eq!(changes.len(), 1);
        match &changes[0] {
            Change::RobotsTxt {
                message,
                old_content,
                new_content,
            } => {
                assert!(message.starts_with("robots.txt content changed ("));
                assert!(old_content.contains("/private"));
                assert!(new_content.contains("/tmp"));
            }
            other => panic!("expected RobotsTxt, got {:?}", other),
        }
    }

    #[test]
    fn test_robots_txt_unchanged_is_quiet() {
        let body = "User-agent: *\nAllow: /\n";
        let older = parse(body, "https://www.example.com/robots.txt", OLD_TS, Some(200));
        let newer = parse(body, "https://www.example.com/robots.txt", NEW_TS, Some(200));

        assert!(compare(&older, &newer, &NavLocators::default()).is_empty());
    }

    #[test]
    fn test_robots_txt_from_empty_is_hundred_percent() {
        let older = parse("", "https://www.example.com/robots.txt", OLD_TS, None);
        let newer = parse(
            "User-agent: *\nAllow: /\n",
            "https://www.example.com/robots.txt",
            NEW_TS,
            Some(200),
        );

        let changes = compare(&older, &newer, &NavLocators::default());

        assert_eq!(changes.len(), 1);
        assert!(matches!(&changes[0], Change::RobotsTxt { message, .. }
            if message.contains("(100.0% difference)")));
    }

    #[test]
    fn test_nav_changes_appended_after_field_changes() {
        let home = "https://www.example.com/";
        let old_html = r#"<html><head><title>Old</title></head><body><div id="navigation"><a href="/a">A</a></div></body></html>"#;
        let new_html = r#"<html><head><title>New</title></head><body><div id="navigation"><a href="/b">B</a></div></body></html>"#;
        let older = parse(old_html, home, OLD_TS, Some(200));
        let newer = parse(new_html, home, NEW_TS, Some(200));

        let changes = compare(&older, &newer, &NavLocators::default());

        assert_eq!(changes.len(), 3);
        assert!(matches!(changes[0], Change::Title { .. }));
        assert!(matches!(changes[1], Change::NavRemoved { .. }));
        assert!(matches!(changes[2], Change::NavAdded { .. }));
    }
}
