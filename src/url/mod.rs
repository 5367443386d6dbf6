//! URL handling module for Scope-Crawler
//!
//! This module provides the two pure URL functions the orchestrator relies on:
//! resolving raw `href` values against the page they were found on, and
//! deciding whether a resolved URL belongs to the crawl's domain.

mod resolve;
mod scope;

// Re-export main functions
pub use resolve::resolve_href;
pub use scope::{in_scope, scope_key};
