//! HTML report rendering
//!
//! Renders one run report as a self-contained HTML document: a summary
//! block, then sections ordered by how urgently a reader should care -
//! critical issues and metadata changes, bulk content changes, robots.txt
//! changes, navigation changes, minor issues, notices. A subject line is
//! derived from the most urgent non-empty section.

use crate::compare::Change;
use crate::monitor::{Comparison, RunReport};
use crate::report::audit::{audit_page, Category, Severity};
use crate::report::traits::{ReportResult, ReportSink};
use crate::snapshot::is_robots_url;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// How much of each robots.txt body the report shows
const ROBOTS_PREVIEW_CHARS: usize = 200;

/// A rendered report: subject line plus HTML body
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub subject: String,
    pub html: String,
}

/// [`ReportSink`] writing the rendered HTML to a file
pub struct HtmlFileSink {
    path: PathBuf,
}

impl HtmlFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for HtmlFileSink {
    fn deliver(&self, report: &RunReport) -> ReportResult<()> {
        let rendered = render_report(report);
        tracing::info!(
            "Writing report \"{}\" to {}",
            rendered.subject,
            self.path.display()
        );

        let mut file = File::create(&self.path)?;
        file.write_all(rendered.html.as_bytes())?;
        Ok(())
    }
}

/// Renders a run report into subject + HTML
pub fn render_report(report: &RunReport) -> RenderedReport {
    let mut counts: HashMap<Category, usize> = HashMap::new();
    let mut critical_lines = Vec::new();
    let mut source_change_lines = Vec::new();
    let mut robots_change_lines = Vec::new();
    let mut nav_change_lines = Vec::new();
    let mut minor_lines = Vec::new();
    let mut notice_lines = Vec::new();

    // Scrape failures first: they explain why a URL is absent elsewhere
    for failure in &report.failures {
        notice_lines.push(format!(
            "<li><strong>{}</strong><br>Scrape failed after {} retries: {}</li>",
            failure.url, failure.attempts, failure.reason
        ));
    }

    // Per-page SEO audits
    for page in &report.pages {
        if is_robots_url(&page.url) {
            continue;
        }

        let audit = audit_page(page);
        for finding in &audit.findings {
            *counts.entry(finding.category).or_default() += 1;
        }

        let critical = audit.messages(Severity::Critical);
        if !critical.is_empty() {
            critical_lines.push(format!(
                "<li><strong>{}</strong><br>{}</li>",
                page.url,
                critical.join("<br>")
            ));
        }

        let minor = audit.messages(Severity::Minor);
        if !minor.is_empty() {
            minor_lines.push(format!(
                "<li><strong>{}</strong><br>{}</li>",
                page.url,
                minor.join("<br>")
            ));
        }
    }

    // Version changes
    let mut source_changes = 0usize;
    let mut robots_changes = 0usize;
    let mut nav_changes = 0usize;

    for comparison in &report.comparisons {
        let (url, changes) = match comparison {
            Comparison::FirstScrape { url } => {
                notice_lines.push(format!(
                    "<li><strong>{}</strong><br>First scrape, no previous version to compare</li>",
                    url
                ));
                continue;
            }
            Comparison::Changed { url, changes } => (url, changes),
        };

        let mut metadata_changes = Vec::new();
        let mut page_nav_changes = Vec::new();

        for change in changes {
            match change {
                Change::Content { message } => {
                    source_changes += 1;
                    source_change_lines.push(format!(
                        "<li><strong>{}</strong><br>{}</li>",
                        url, message
                    ));
                }
                Change::RobotsTxt {
                    message,
                    old_content,
                    new_content,
                } => {
                    robots_changes += 1;
                    robots_change_lines.push(format!(
                        "<li><strong>{}</strong><br>{}<div style=\"font-size:0.9em; color:#666; margin-top:5px; background:#f5f5f5; padding:5px;\">Previous: {}...<br>Current: {}...</div></li>",
                        url,
                        message,
                        preview(old_content),
                        preview(new_content)
                    ));
                }
                Change::Title { old, new } => {
                    metadata_changes.push(diff_line("Title changed", old, new));
                }
                Change::Canonical { old, new } => {
                    metadata_changes.push(diff_line("Canonical URL changed", old, new));
                }
                Change::H1 { old, new } => {
                    metadata_changes.push(diff_line("H1 changed", old, new));
                }
                Change::NavRemoved { links } => {
                    nav_changes += 1;
                    page_nav_changes.push(nav_link_block(
                        &format!("Navigation links removed ({})", links.len()),
                        links.iter().map(|l| format!("\"{}\" → {}", l.text, l.url)),
                    ));
                }
                Change::NavAdded { links } => {
                    nav_changes += 1;
                    page_nav_changes.push(nav_link_block(
                        &format!("Navigation links added ({})", links.len()),
                        links.iter().map(|l| format!("\"{}\" → {}", l.text, l.url)),
                    ));
                }
                Change::NavTextChanged { links } => {
                    nav_changes += 1;
                    page_nav_changes.push(nav_link_block(
                        &format!("Navigation link text changed ({})", links.len()),
                        links.iter().map(|l| {
                            format!(
                                "{}<br><span style=\"color:#d9534f\">- \"{}\"</span><br><span style=\"color:#5cb85c\">+ \"{}\"</span>",
                                l.url, l.old_text, l.new_text
                            )
                        }),
                    ));
                }
            }
        }

        if !metadata_changes.is_empty() {
            critical_lines.push(format!(
                "<li><strong>{}</strong><br>{}</li>",
                url,
                metadata_changes.join("<br>")
            ));
        }

        if !page_nav_changes.is_empty() {
            nav_change_lines.push(format!(
                "<li><strong>{}</strong><br>{}</li>",
                url,
                page_nav_changes.join("<br>")
            ));
        }
    }

    // Assemble the document
    let mut html = String::new();
    html.push_str("<div style=\"font-family: Arial, sans-serif; color: #333;\">\n");
    html.push_str("<h2 style=\"color: #2c3e50; border-bottom: 2px solid #eee; padding-bottom: 10px;\">SEO Monitor Report</h2>\n");

    let all_ok = critical_lines.is_empty()
        && source_change_lines.is_empty()
        && robots_change_lines.is_empty()
        && nav_change_lines.is_empty()
        && minor_lines.is_empty()
        && report.failures.is_empty();

    if !all_ok {
        html.push_str(&render_summary(
            &counts,
            source_changes,
            robots_changes,
            nav_changes,
            report.failures.len(),
        ));
    }

    let mut subject = "SEO Monitor - All OK".to_string();

    if !critical_lines.is_empty() {
        html.push_str(&render_section(
            "🚨 Critical Issues & Metadata Changes",
            "#d9534f",
            Some("(HTTP Errors, Missing Titles, Missing Canonicals, Missing H1)"),
            "#fff5f5",
            &critical_lines,
        ));
        subject = "SEO Monitor - Critical Issues Found".to_string();
    }

    if !source_change_lines.is_empty() {
        html.push_str(&render_section(
            "📝 Source Code Changes",
            "#e67e22",
            None,
            "#fffcf5",
            &source_change_lines,
        ));
        if subject == "SEO Monitor - All OK" {
            subject = "SEO Monitor - Source Code Changes".to_string();
        }
    }

    if !robots_change_lines.is_empty() {
        html.push_str(&render_section(
            "🤖 Robots.txt Changes",
            "#9b59b6",
            None,
            "#fbf5fd",
            &robots_change_lines,
        ));
        if subject == "SEO Monitor - All OK" {
            subject = "SEO Monitor - Robots.txt Changes".to_string();
        }
    }

    if !nav_change_lines.is_empty() {
        html.push_str(&render_section(
            "🧭 Navigation Menu Changes",
            "#17a2b8",
            None,
            "#f0f8ff",
            &nav_change_lines,
        ));
        if subject == "SEO Monitor - All OK" {
            subject = "SEO Monitor - Navigation Changes".to_string();
        }
    }

    if !minor_lines.is_empty() {
        html.push_str(&render_section(
            "⚠️ Minor Issues & Changes",
            "#f0ad4e",
            Some("(Meta Descriptions, Long Titles, Non-Self-Ref Canonicals, Multiple H1s)"),
            "#fcf8e3",
            &minor_lines,
        ));
        if subject == "SEO Monitor - All OK" {
            subject = "SEO Monitor - Minor Issues Found".to_string();
        }
    }

    if !notice_lines.is_empty() {
        html.push_str(&render_section(
            "ℹ️ Notices",
            "#5bc0de",
            Some("(Scraping Failures, First Time Scrapes)"),
            "#d9edf7",
            &notice_lines,
        ));
        if subject == "SEO Monitor - All OK" {
            subject = "SEO Monitor - Notices".to_string();
        }
    }

    if all_ok && notice_lines.is_empty() {
        html.push_str(
            "<div style=\"background: #dff0d8; border: 1px solid #d6e9c6; color: #3c763d; padding: 15px; border-radius: 4px; margin-top: 20px;\">\
             <strong>✅ All Good!</strong><br>\
             All pages passed SEO validation with no content changes detected.\
             </div>\n",
        );
    }

    html.push_str("</div>\n");

    RenderedReport { subject, html }
}

fn render_summary(
    counts: &HashMap<Category, usize>,
    source_changes: usize,
    robots_changes: usize,
    nav_changes: usize,
    failures: usize,
) -> String {
    fn push_count(
        items: &mut Vec<String>,
        counts: &HashMap<Category, usize>,
        category: Category,
        label: &str,
        marker: &str,
    ) {
        if let Some(count) = counts.get(&category).filter(|c| **c > 0) {
            items.push(format!(
                "<li>{} {}: <strong>{}</strong> URLs</li>",
                marker, label, count
            ));
        }
    }

    let mut items = Vec::new();

    push_count(&mut items, counts, Category::HttpError, "HTTP Errors", "🔴");
    push_count(&mut items, counts, Category::MissingTitle, "Missing Titles", "🔴");
    push_count(&mut items, counts, Category::MissingCanonical, "Missing Canonicals", "🔴");
    push_count(&mut items, counts, Category::MissingH1, "Missing H1", "🔴");

    if source_changes > 0 {
        items.push(format!(
            "<li>🟠 Source Code Changes: <strong>{}</strong> URLs</li>",
            source_changes
        ));
    }
    if robots_changes > 0 {
        items.push(format!(
            "<li>🟠 Robots.txt Changes: <strong>{}</strong> URLs</li>",
            robots_changes
        ));
    }

    push_count(&mut items, counts, Category::LongTitle, "Long Titles", "🟡");
    push_count(&mut items, counts, Category::NonSelfRefCanonical, "Non-Self-Ref Canonicals", "🟡");
    push_count(&mut items, counts, Category::MetaDescription, "Meta Desc Issues", "🟡");
    push_count(&mut items, counts, Category::MultipleH1, "Multiple H1s", "🟡");

    if nav_changes > 0 {
        items.push(format!(
            "<li>🟡 Nav Menu Changes: <strong>{}</strong> events</li>",
            nav_changes
        ));
    }
    if failures > 0 {
        items.push(format!(
            "<li>🔵 Scraping Failures: <strong>{}</strong> URLs</li>",
            failures
        ));
    }

    format!(
        "<div style=\"background: #f8f9fa; padding: 15px; border-radius: 5px; margin-bottom: 20px; border: 1px solid #e9ecef;\">\
         <h3 style=\"margin-top: 0; color: #495057;\">📊 Summary</h3>\
         <ul style=\"columns: 2; list-style-type: none; padding: 0; margin: 0;\">{}</ul></div>\n",
        items.join("")
    )
}

fn render_section(
    title: &str,
    title_color: &str,
    subtitle: Option<&str>,
    background: &str,
    lines: &[String],
) -> String {
    let mut section = format!(
        "<h3 style=\"color: {}; margin-top: 20px;\">{}</h3>\n",
        title_color, title
    );

    if let Some(subtitle) = subtitle {
        section.push_str(&format!(
            "<p style=\"font-size: 0.9em; color: #666;\">{}</p>\n",
            subtitle
        ));
    }

    section.push_str(&format!(
        "<ul style=\"background: {}; border: 1px solid #ddd; padding: 15px 15px 15px 30px; border-radius: 4px;\">{}</ul>\n",
        background,
        lines.join("")
    ));

    section
}

fn diff_line(label: &str, old: &str, new: &str) -> String {
    format!(
        "{}:<br><span style=\"color:#d9534f\">- \"{}\"</span><br><span style=\"color:#5cb85c\">+ \"{}\"</span>",
        label, old, new
    )
}

fn nav_link_block(heading: &str, items: impl Iterator<Item = String>) -> String {
    let rendered: Vec<String> = items.map(|item| format!("<li>{}</li>", item)).collect();
    format!(
        "{}:<ul style=\"margin-top:0;\">{}</ul>",
        heading,
        rendered.join("")
    )
}

fn preview(content: &str) -> String {
    content.chars().take(ROBOTS_PREVIEW_CHARS).collect()
}
