//! Configuration module for ketab-crawler
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key has a default, so running without a file crawls the
//! built-in category.
//!
//! # Example
//!
//! ```no_run
//! use ketab_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawling pages {}..={}", config.crawler.first_page, config.crawler.last_page);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
