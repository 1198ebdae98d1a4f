//! Run reporting
//!
//! Turns a finished run into something a human acts on:
//! - Per-page SEO audits (critical vs minor findings)
//! - An HTML report grouping audits, version changes, and failures into
//!   sections by urgency
//! - The [`ReportSink`] trait plus a file-writing implementation

mod audit;
mod html;
mod traits;

pub use audit::{audit_page, Category, Finding, PageAudit, Severity};
pub use audit::{MAX_META_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
pub use html::{render_report, HtmlFileSink, RenderedReport};
pub use traits::{ReportError, ReportResult, ReportSink};
