//! Visitation ledger
//!
//! The ledger is the single synchronization point that keeps a URL from
//! being fetched twice. It only ever grows and lives for one crawl run.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// Concurrency-safe set of URLs that have been claimed for fetching
///
/// Lookups take the shared read lock; a claim takes the exclusive write lock
/// and performs its check-and-set as one `HashSet::insert`, so two racing
/// claims on the same URL always yield exactly one `true`.
#[derive(Debug, Default)]
pub struct VisitationLedger {
    claimed: RwLock<HashSet<String>>,
}

impl VisitationLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims a URL
    ///
    /// # Returns
    ///
    /// * `true` - The URL was unclaimed and now belongs to the caller
    /// * `false` - Another caller claimed it first; nothing changed
    pub fn claim(&self, url: &str) -> bool {
        // Cheap rejection for the common case of an already-visited URL
        if self.is_claimed(url) {
            return false;
        }

        self.claimed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string())
    }

    /// Returns whether a URL has already been claimed
    ///
    /// Only a hint: the answer can be stale by the time the caller acts on it.
    pub fn is_claimed(&self, url: &str) -> bool {
        self.claimed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }

    /// Number of URLs claimed so far, including ones whose fetch later failed
    pub fn count(&self) -> usize {
        self.claimed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
