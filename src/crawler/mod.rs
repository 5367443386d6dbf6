//! Crawler module for domain-scoped page crawling
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and HTML parsing behind collaborator traits
//! - The visitation ledger and global rate limiter shared by all tasks
//! - Result aggregation into a crawl report
//! - The recursive crawl orchestrator and its dynamic task group

mod aggregator;
mod fetcher;
mod ledger;
mod limiter;
mod orchestrator;
mod parser;
mod tasks;

pub use aggregator::ResultAggregator;
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher, HttpFetcher};
pub use ledger::VisitationLedger;
pub use limiter::RateLimiter;
pub use orchestrator::{CompletedCrawl, Crawler};
pub use parser::{HtmlParser, PageParser, ParseError, ParsedPage};
pub use tasks::{TaskGroup, TaskToken};

use crate::config::Config;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the seed URL and request rate
/// 2. Build the HTTP client and HTML parser
/// 3. Crawl every reachable in-scope page up to the depth limit
/// 4. Finalize the report and run statistics
///
/// Must be called from within a Tokio runtime.
///
/// # Arguments
///
/// * `config` - The crawler configuration; `crawler.seed-url` must be set
///
/// # Returns
///
/// * `Ok(CompletedCrawl)` - Crawl finished (individual pages may have failed)
/// * `Err(CrawlError)` - The crawl could not be started
pub async fn crawl(config: Config) -> Result<CompletedCrawl, CrawlError> {
    let crawler = Crawler::from_config(&config)?;
    Ok(crawler.run().await)
}
