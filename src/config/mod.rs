//! Configuration module for Scope-Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; anything left out falls back to the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use scope_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation entry points
pub use validation::{parse_seed_url, validate};
pub(crate) use validation::request_period;
