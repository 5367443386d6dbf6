//! Result aggregator
//!
//! Collects page records from every crawl task into one report. Records are
//! kept in completion order, which varies from run to run.

use crate::output::{CrawlReport, PageRecord};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Concurrency-safe collector of page records for one crawl run
#[derive(Debug)]
pub struct ResultAggregator {
    base_url: String,
    max_depth: u32,
    start_time: DateTime<Utc>,
    pages: Mutex<Vec<PageRecord>>,
    failures: AtomicUsize,
}

impl ResultAggregator {
    /// Starts a new report; the run's start time is taken now
    pub fn new(base_url: impl Into<String>, max_depth: u32) -> Self {
        Self {
            base_url: base_url.into(),
            max_depth,
            start_time: Utc::now(),
            pages: Mutex::new(Vec::new()),
            failures: AtomicUsize::new(0),
        }
    }

    /// Appends a page record, returning the number of records now held
    pub fn record(&self, page: PageRecord) -> usize {
        let mut pages = self.pages.lock().unwrap_or_else(PoisonError::into_inner);
        pages.push(page);
        pages.len()
    }

    /// Notes a task whose fetch or parse failed
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of failed tasks noted so far
    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Produces the finished report
    ///
    /// Call once, after every crawl task has terminated. Sets the end time to
    /// now and the page total from the collected records.
    pub fn finalize(&self) -> CrawlReport {
        let pages = self
            .pages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let end_time = Utc::now().max(self.start_time);

        CrawlReport {
            base_url: self.base_url.clone(),
            max_depth: self.max_depth,
            start_time: self.start_time,
            end_time,
            total_pages: pages.len(),
            pages,
        }
    }
}
