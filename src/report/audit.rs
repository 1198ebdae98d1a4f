//! Per-page SEO audit
//!
//! Classifies a single snapshot's SEO posture without needing any history:
//! missing or broken fundamentals are critical, quality nits are minor.
//! robots.txt snapshots are plain text and always audit clean.

use crate::snapshot::{is_robots_url, PageSnapshot};

/// Longest title that doesn't draw a finding
pub const MAX_TITLE_LENGTH: usize = 60;

/// Longest meta description that doesn't draw a finding
pub const MAX_META_DESCRIPTION_LENGTH: usize = 160;

/// Severity of one audit finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Minor,
}

/// Classification bucket for summary counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    HttpError,
    MissingTitle,
    LongTitle,
    MissingCanonical,
    NonSelfRefCanonical,
    MissingH1,
    MetaDescription,
    MultipleH1,
}

/// One audit finding for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
}

/// All findings for one page
#[derive(Debug, Clone, Default)]
pub struct PageAudit {
    pub findings: Vec<Finding>,
}

impl PageAudit {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .map(|f| f.message.as_str())
            .collect()
    }
}

/// Audits one snapshot
///
/// Critical findings: non-200 status, missing/invalid title, missing
/// canonical, no h1 at all. Minor findings: overlong title, canonical that
/// is present but not self-referencing, missing or overlong meta
/// description, multiple h1 tags.
pub fn audit_page(page: &PageSnapshot) -> PageAudit {
    if is_robots_url(&page.url) {
        return PageAudit::default();
    }

    let mut findings = Vec::new();

    if let Some(code) = page.status_code {
        if code != 200 {
            findings.push(Finding {
                severity: Severity::Critical,
                category: Category::HttpError,
                message: format!("HTTP Status: {} (expected 200)", code),
            });
        }
    }

    if !page.has_title {
        findings.push(Finding {
            severity: Severity::Critical,
            category: Category::MissingTitle,
            message: "Missing or invalid Title".to_string(),
        });
    } else if page.title.chars().count() > MAX_TITLE_LENGTH {
        findings.push(Finding {
            severity: Severity::Minor,
            category: Category::LongTitle,
            message: format!(
                "Title too long ({} chars): \"{}\"",
                page.title.chars().count(),
                page.title
            ),
        });
    }

    if page.canonical.is_empty() {
        findings.push(Finding {
            severity: Severity::Critical,
            category: Category::MissingCanonical,
            message: "Canonical tag missing".to_string(),
        });
    } else if !page.is_canonical_self_ref {
        findings.push(Finding {
            severity: Severity::Minor,
            category: Category::NonSelfRefCanonical,
            message: format!("Canonical not self-referencing (points to: {})", page.canonical),
        });
    }

    if !page.has_h1 && !page.multiple_h1s {
        findings.push(Finding {
            severity: Severity::Critical,
            category: Category::MissingH1,
            message: "No H1 tag found".to_string(),
        });
    }

    if !page.has_meta_description {
        findings.push(Finding {
            severity: Severity::Minor,
            category: Category::MetaDescription,
            message: "Meta description missing".to_string(),
        });
    } else if page.meta_description.chars().count() > MAX_META_DESCRIPTION_LENGTH {
        findings.push(Finding {
            severity: Severity::Minor,
            category: Category::MetaDescription,
            message: format!(
                "Meta description longer than {} characters",
                MAX_META_DESCRIPTION_LENGTH
            ),
        });
    }

    if page.multiple_h1s {
        findings.push(Finding {
            severity: Severity::Minor,
            category: Category::MultipleH1,
            message: "Multiple H1 tags found".to_string(),
        });
    }

    PageAudit { findings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::parse;

    const TS: &str = "20260807120000";

    fn healthy_page() -> PageSnapshot {
        let html = r#"<html><head>
            <title>Fine Shop</title>
            <link rel="canonical" href="https://example.com/page">
            <meta name="description" content="A fine shop for fine things">
        </head><body><h1>Fine Shop</h1></body></html>"#;
        parse(html, "https://example.com/page", TS, Some(200))
    }

    #[test]
    fn test_healthy_page_is_clean() {
        let audit = audit_page(&healthy_page());
        assert!(audit.is_clean());
    }

    #[test]
    fn test_robots_txt_always_clean() {
        let page = parse("User-agent: *", "https://example.com/robots.txt", TS, Some(500));
        assert!(audit_page(&page).is_clean());
    }

    #[test]
    fn test_non_200_status_is_critical() {
        let mut page = healthy_page();
        page.status_code = Some(404);

        let audit = audit_page(&page);
        assert_eq!(
            audit.messages(Severity::Critical),
            vec!["HTTP Status: 404 (expected 200)"]
        );
    }

    #[test]
    fn test_unknown_status_draws_no_finding() {
        let mut page = healthy_page();
        page.status_code = None;
        assert!(audit_page(&page).is_clean());
    }

    #[test]
    fn test_missing_title_is_critical() {
        let html = r#"<html><head>
            <link rel="canonical" href="https://example.com/page">
            <meta name="description" content="desc">
        </head><body><h1>H</h1></body></html>"#;
        let page = parse(html, "https://example.com/page", TS, Some(200));

        let audit = audit_page(&page);
        assert_eq!(
            audit.messages(Severity::Critical),
            vec!["Missing or invalid Title"]
        );
    }

    #[test]
    fn test_long_title_is_minor() {
        let mut page = healthy_page();
        page.title = "t".repeat(61);

        let audit = audit_page(&page);
        assert!(audit.messages(Severity::Critical).is_empty());
        assert_eq!(audit.messages(Severity::Minor).len(), 1);
        assert!(audit.messages(Severity::Minor)[0].starts_with("Title too long (61 chars)"));
    }

    #[test]
    fn test_missing_canonical_is_critical() {
        let mut page = healthy_page();
        page.canonical = String::new();
        page.is_canonical_self_ref = false;

        let audit = audit_page(&page);
        assert_eq!(
            audit.messages(Severity::Critical),
            vec!["Canonical tag missing"]
        );
    }

    #[test]
    fn test_non_self_ref_canonical_is_minor() {
        let mut page = healthy_page();
        page.canonical = "https://example.com/other".to_string();
        page.is_canonical_self_ref = false;

        let audit = audit_page(&page);
        assert!(audit.messages(Severity::Critical).is_empty());
        assert_eq!(
            audit.messages(Severity::Minor),
            vec!["Canonical not self-referencing (points to: https://example.com/other)"]
        );
    }

    #[test]
    fn test_no_h1_is_critical_but_multiple_is_minor() {
        let mut page = healthy_page();
        page.h1 = vec![];
        page.has_h1 = false;
        page.multiple_h1s = false;
        assert_eq!(
            audit_page(&page).messages(Severity::Critical),
            vec!["No H1 tag found"]
        );

        page.h1 = vec!["A".to_string(), "B".to_string()];
        page.multiple_h1s = true;
        let audit = audit_page(&page);
        assert!(audit.messages(Severity::Critical).is_empty());
        assert_eq!(
            audit.messages(Severity::Minor),
            vec!["Multiple H1 tags found"]
        );
    }

    #[test]
    fn test_meta_description_findings_are_minor() {
        let mut page = healthy_page();
        page.meta_description = String::new();
        page.has_meta_description = false;
        assert_eq!(
            audit_page(&page).messages(Severity::Minor),
            vec!["Meta description missing"]
        );

        page.meta_description = "d".repeat(161);
        page.has_meta_description = true;
        assert_eq!(
            audit_page(&page).messages(Severity::Minor),
            vec!["Meta description longer than 160 characters"]
        );
    }
}
