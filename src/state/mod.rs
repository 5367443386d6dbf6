//! State module for tracking crawl progress
//!
//! Every URL handed to a crawl task moves through a small state machine:
//!
//! ```text
//! Unclaimed -> Claimed -> Fetching -> Recorded
//!                                  \-> Failed
//! ```
//!
//! `Unclaimed` and `Claimed` live in the visitation ledger; the remaining
//! states exist only inside one task. A task that stops before claiming ends
//! in `DepthExceeded` or `AlreadyClaimed`.

mod page_state;

// Re-export main types
pub use page_state::PageState;
