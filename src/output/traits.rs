//! Output sink traits and errors
//!
//! This module defines the trait interface a finished crawl report is handed
//! to, along with the errors persistence can produce.

use crate::output::report::CrawlReport;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for a finalized crawl report
///
/// A sink receives the report exactly once, after every crawl task has
/// terminated. A failing sink does not invalidate the in-memory report.
pub trait ReportSink {
    /// Persists the report
    ///
    /// # Arguments
    ///
    /// * `report` - The finalized crawl report
    fn write_report(&self, report: &CrawlReport) -> OutputResult<()>;

    /// Human-readable description of where reports go, for log lines
    fn destination(&self) -> String;
}
