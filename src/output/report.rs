//! Crawl report data model
//!
//! Field names here are the on-disk JSON contract; renaming one breaks
//! every consumer of the results file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One successfully fetched (HTTP 200) page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Absolute URL that was fetched
    pub url: String,

    /// Text of the page's `<title>`, empty if it had none
    pub title: String,

    /// Every outbound link found on the page, in document order,
    /// whether or not it was in scope
    pub links: Vec<String>,

    /// Link distance from the seed (the seed is depth 0)
    pub depth: u32,

    /// When the fetch completed
    pub crawled_at: DateTime<Utc>,

    /// Wall-clock fetch latency in milliseconds
    pub response_time_ms: u64,

    /// HTTP status code of the response
    pub status_code: u16,
}

/// The finalized result of one crawl run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Seed URL the run started from
    pub base_url: String,

    /// Configured maximum depth
    pub max_depth: u32,

    /// When the run started
    pub start_time: DateTime<Utc>,

    /// When the last crawl task finished
    pub end_time: DateTime<Utc>,

    /// Number of entries in `pages`
    pub total_pages: usize,

    /// Page records in completion order
    pub pages: Vec<PageRecord>,
}

impl CrawlReport {
    /// Looks up the record for a URL
    pub fn page(&self, url: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|page| page.url == url)
    }
}
