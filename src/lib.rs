//! ketab-crawler: a product catalog crawler for iranketab.ir
//!
//! This crate walks the paginated listing of one catalog category, visits
//! every product page, extracts a fixed set of book fields with Persian
//! text normalization, and writes the deduplicated table as JSON, CSV and
//! XLSX.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;
pub mod state;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for ketab-crawler operations
#[derive(Debug, Error)]
pub enum KetabError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser error: {0}")]
    Browser(#[from] browser::BrowserError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for ketab-crawler operations
pub type Result<T> = std::result::Result<T, KetabError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use browser::{Browser, BrowserError, HttpBrowser};
pub use config::Config;
pub use crawler::{crawl, Coordinator, CrawlOutcome};
pub use record::BookRecord;
pub use state::StopSignal;
