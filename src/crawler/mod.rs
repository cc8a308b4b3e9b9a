//! Crawler module for walking the catalog
//!
//! This module contains the core crawling logic, including:
//! - Page navigation with timeouts and scroll-to-bottom
//! - Product link collection from listing pages
//! - Overall crawl coordination

mod coordinator;
mod links;
mod navigator;

pub use coordinator::{Coordinator, CrawlOutcome};
pub use links::{collect_listing_links, dedup_preserving_order};
pub use navigator::{Navigator, ScrollOutcome};

use crate::browser::HttpBrowser;
use crate::config::Config;
use crate::output::TabularWriter;
use crate::state::StopSignal;
use crate::KetabError;

/// Runs a complete crawl with the bundled HTTP browser
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP browser
/// 2. Walk every configured listing page and product link
/// 3. Release the browser
/// 4. Write the deduplicated records as JSON, CSV and XLSX
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `stop` - Manual stop flag; raise it to end the crawl early
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl finished and output was written
/// * `Err(KetabError)` - The browser could not be built or output failed
pub async fn crawl(config: Config, stop: StopSignal) -> Result<CrawlOutcome, KetabError> {
    let browser = HttpBrowser::new(&config.user_agent, config.crawler.page_load_timeout())?;
    let sink = TabularWriter::new(config.output.directory.clone());

    Coordinator::new(config, browser, sink, stop).run().await
}
