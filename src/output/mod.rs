//! Output module for crawl reports
//!
//! This module handles:
//! - The `PageRecord` / `CrawlReport` data model and its JSON shape
//! - Persisting the finalized report through a `ReportSink`
//! - Printing end-of-run statistics

mod json;
mod report;
pub mod stats;
mod traits;

pub use json::JsonFileSink;
pub use report::{CrawlReport, PageRecord};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, ReportSink};
