//! End-of-run statistics
//!
//! This module condenses a finalized report plus the run's ledger and failure
//! counters into the summary printed when a crawl completes.

use crate::output::report::CrawlReport;
use std::collections::BTreeMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// URLs claimed by a task (fetched or attempted)
    pub pages_visited: usize,

    /// Pages that produced a record
    pub pages_recorded: usize,

    /// Claimed pages whose fetch or parse failed
    pub pages_failed: usize,

    /// Total links found across all recorded pages
    pub total_links: usize,

    /// Recorded pages per depth
    pub pages_by_depth: BTreeMap<u32, usize>,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl CrawlStatistics {
    /// Builds statistics from a finalized report
    ///
    /// # Arguments
    ///
    /// * `report` - The finalized crawl report
    /// * `pages_visited` - The visitation ledger's claim count
    /// * `pages_failed` - Number of tasks that ended in a failure
    pub fn from_report(report: &CrawlReport, pages_visited: usize, pages_failed: usize) -> Self {
        let mut pages_by_depth = BTreeMap::new();
        for page in &report.pages {
            *pages_by_depth.entry(page.depth).or_insert(0) += 1;
        }

        let duration = (report.end_time - report.start_time)
            .to_std()
            .unwrap_or_default();

        Self {
            pages_visited,
            pages_recorded: report.total_pages,
            pages_failed,
            total_links: report.pages.iter().map(|page| page.links.len()).sum(),
            pages_by_depth,
            duration,
        }
    }

    /// Percentage of visited pages that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.pages_recorded as f64 / self.pages_visited as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!();
    println!(
        "Crawling completed. Total pages visited: {}",
        stats.pages_visited
    );
    println!("  Pages recorded: {}", stats.pages_recorded);
    println!("  Pages failed: {}", stats.pages_failed);
    println!("  Links found: {}", stats.total_links);
    println!("  Duration: {:.2}s", stats.duration.as_secs_f64());

    if !stats.pages_by_depth.is_empty() {
        println!("  Pages by depth:");
        for (depth, count) in &stats.pages_by_depth {
            println!("    {}: {}", depth, count);
        }
    }

    println!(
        "  Success rate: {:.1}% ({} / {})",
        stats.success_rate(),
        stats.pages_recorded,
        stats.pages_visited
    );
}
