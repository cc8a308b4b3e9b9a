use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for ketab-crawler
///
/// Every section and key is optional; an empty file yields the built-in
/// finance-category crawl.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// The catalog being crawled
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Site root, e.g. `https://www.iranketab.ir`
    pub base_url: String,

    /// Tag slug of the category listing, e.g. `484-finance`
    pub category_slug: String,

    /// Value written to every record's `category` column
    pub category_label: String,
}

impl SiteConfig {
    /// Builds the listing URL for a page number
    pub fn listing_url(&self, page: u32) -> String {
        format!(
            "{}/tag/{}?p={}",
            self.base_url.trim_end_matches('/'),
            self.category_slug,
            page
        )
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.iranketab.ir".to_string(),
            category_slug: "484-finance".to_string(),
            category_label: "مالی".to_string(),
        }
    }
}

/// Crawler pacing and bounds
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// First listing page to visit
    pub first_page: u32,

    /// Last listing page to visit (inclusive)
    pub last_page: u32,

    /// Hard cap for a single page load (seconds)
    pub page_load_timeout_secs: u64,

    /// How long to wait for expected content to appear (seconds)
    pub selector_timeout_secs: u64,

    /// Load attempts per product page before it is skipped
    pub item_attempts: u32,

    /// Pause between product page attempts (milliseconds)
    pub retry_backoff_ms: u64,

    /// Pause after each scroll step (milliseconds)
    pub scroll_pause_ms: u64,

    /// Pause after scrolling finishes, before links are collected (milliseconds)
    pub settle_pause_ms: u64,

    /// Upper bound on scroll steps for one listing page
    pub max_scroll_rounds: u32,
}

impl CrawlerConfig {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_secs(self.selector_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn settle_pause(&self) -> Duration {
        Duration::from_millis(self.settle_pause_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            first_page: 1,
            last_page: 32,
            page_load_timeout_secs: 60,
            selector_timeout_secs: 10,
            item_attempts: 3,
            retry_backoff_ms: 3000,
            scroll_pause_ms: 1000,
            settle_pause_ms: 1000,
            max_scroll_rounds: 50,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "ketab-crawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://www.iranketab.ir/".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory the result files are written to
    pub directory: PathBuf,

    /// File name without extension shared by the JSON, CSV and XLSX outputs
    pub basename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            basename: "books_finance_all".to_string(),
        }
    }
}
