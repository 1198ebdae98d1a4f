//! Report sink trait and error types

use crate::monitor::RunReport;
use thiserror::Error;

/// Errors that can occur while delivering a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Consumer of a finished run report
///
/// Sinks consume only the report data model; what "delivery" means (a file,
/// an email, a webhook) is up to the implementation.
pub trait ReportSink {
    fn deliver(&self, report: &RunReport) -> ReportResult<()>;
}
