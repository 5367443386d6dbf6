//! Page state definitions for tracking crawl progress
//!
//! This module defines every state a URL can be in from a crawl task's point of view.

use std::fmt;

/// Represents the current state of a URL in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Ledger States =====
    /// URL has not been claimed by any task
    Unclaimed,

    /// URL is owned by exactly one task, which may fetch it
    Claimed,

    // ===== Task States =====
    /// Page is currently being fetched
    Fetching,

    // ===== Terminal Success States =====
    /// Page was fetched with HTTP 200, parsed, and handed to the aggregator
    Recorded,

    // ===== Terminal Error States =====
    /// Fetch or parse failed; no record was produced
    Failed,

    // ===== Terminal Skip States =====
    /// Task was started beyond the maximum crawl depth
    DepthExceeded,

    /// Another task had already claimed the URL
    AlreadyClaimed,
}

impl PageState {
    /// Returns true if this is a terminal state (the task has finished)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Recorded | Self::Failed | Self::DepthExceeded | Self::AlreadyClaimed
        )
    }

    /// Returns true if the task stopped without fetching anything
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::DepthExceeded | Self::AlreadyClaimed)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Checks whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Unclaimed, Self::Claimed)
                | (Self::Unclaimed, Self::DepthExceeded)
                | (Self::Unclaimed, Self::AlreadyClaimed)
                | (Self::Claimed, Self::Fetching)
                | (Self::Fetching, Self::Recorded)
                | (Self::Fetching, Self::Failed)
        )
    }

    /// Returns a stable lowercase name, used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unclaimed => "unclaimed",
            Self::Claimed => "claimed",
            Self::Fetching => "fetching",
            Self::Recorded => "recorded",
            Self::Failed => "failed",
            Self::DepthExceeded => "depth_exceeded",
            Self::AlreadyClaimed => "already_claimed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
