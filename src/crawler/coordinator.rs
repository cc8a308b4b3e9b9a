//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Walking the listing pages in order
//! - Collecting product links and tracking the ones already dispatched
//! - Loading product pages with bounded retry and extracting records
//! - Handling manual interruption
//! - Releasing the browser and writing the final output exactly once

use crate::browser::{Browser, BrowserError, Document};
use crate::config::Config;
use crate::crawler::links::collect_listing_links;
use crate::crawler::navigator::Navigator;
use crate::extract::{extract_book, selectors};
use crate::output::{finalize, CrawlStatistics, FinalizeReport, RecordSink};
use crate::record::BookRecord;
use crate::state::{ItemState, PageState, SeenLinks, StopSignal};
use crate::KetabError;
use url::Url;

/// Everything a finished run produced
#[derive(Debug)]
pub struct CrawlOutcome {
    pub statistics: CrawlStatistics,
    pub report: FinalizeReport,
}

/// Main crawler coordinator structure
///
/// Owns the browser (through its [`Navigator`]), the accumulated records
/// and the [`SeenLinks`] set for the whole run.
pub struct Coordinator<B: Browser, S: RecordSink> {
    config: Config,
    navigator: Navigator<B>,
    sink: S,
    stop: StopSignal,
    seen: SeenLinks,
    records: Vec<BookRecord>,
    stats: CrawlStatistics,
}

impl<B: Browser, S: RecordSink> Coordinator<B, S> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `browser` - Browser used for every page load, released by [`run`](Self::run)
    /// * `sink` - Destination of the final record table
    /// * `stop` - Manual stop flag polled between pages and items
    pub fn new(config: Config, browser: B, sink: S, stop: StopSignal) -> Self {
        Self {
            config,
            navigator: Navigator::new(browser),
            sink,
            stop,
            seen: SeenLinks::new(),
            records: Vec::new(),
            stats: CrawlStatistics::new(),
        }
    }

    /// Runs the crawl to completion
    ///
    /// 1. Visits every listing page in the configured range, in order
    /// 2. Visits each product link not seen before and extracts its record
    /// 3. Releases the browser
    /// 4. Deduplicates and writes the records
    ///
    /// Page and item failures never end the run early; only a manual stop
    /// does. Steps 3 and 4 happen exactly once however the loop ended.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - Statistics and the final write report
    /// * `Err(KetabError)` - The output files could not be written
    pub async fn run(mut self) -> Result<CrawlOutcome, KetabError> {
        tracing::info!(
            "Starting crawl of {} pages {}..={}",
            self.config.site.category_slug,
            self.config.crawler.first_page,
            self.config.crawler.last_page
        );

        self.crawl_pages().await;
        self.stats.finish();

        if let Err(e) = self.navigator.release().await {
            tracing::warn!("Failed to release browser: {}", e);
        }

        let records = std::mem::take(&mut self.records);
        let report = finalize(records, &self.sink, &self.config.output.basename)?;

        Ok(CrawlOutcome {
            statistics: self.stats,
            report,
        })
    }

    /// Walks the listing pages, containing every per-page failure
    async fn crawl_pages(&mut self) {
        let first = self.config.crawler.first_page;
        let last = self.config.crawler.last_page;

        for page in first..=last {
            if self.stop_requested() {
                break;
            }

            let state = match self.process_page(page).await {
                Ok(state) => state,
                Err(KetabError::Browser(e)) if e.is_timeout() => {
                    tracing::warn!("Timed out on page {}: {}", page, e);
                    PageState::TimedOut
                }
                Err(e) => {
                    tracing::error!("Error on page {}: {}", page, e);
                    PageState::Failed
                }
            };
            self.stats.record_page(state);
        }

        // A stop raised during the last page still counts
        self.stop_requested();
    }

    /// Processes one listing page and every new product link on it
    async fn process_page(&mut self, page: u32) -> Result<PageState, KetabError> {
        let crawler = self.config.crawler.clone();
        let url = self.config.site.listing_url(page);
        tracing::info!("Loading page {}: {}", page, url);

        self.navigator
            .open(
                &url,
                selectors::CATALOG_CARD,
                crawler.page_load_timeout(),
                crawler.selector_timeout(),
            )
            .await?;

        self.navigator
            .scroll_to_bottom(crawler.scroll_pause(), crawler.max_scroll_rounds)
            .await?;
        tokio::time::sleep(crawler.settle_pause()).await;

        let source = self.navigator.page_source().await?;
        let page_url = Url::parse(&self.navigator.current_url().await?)?;
        let links = {
            let doc = Document::parse(&source);
            collect_listing_links(&doc, &page_url)?
        };

        tracing::info!("{} links found on page {}", links.len(), page);
        self.stats.add_links(links.len());

        if links.is_empty() {
            tracing::info!("Page {} was empty", page);
            return Ok(PageState::Empty);
        }

        for link in &links {
            if self.stop_requested() {
                break;
            }
            let state = self.process_item(link).await;
            self.stats.record_item(state);
        }

        Ok(PageState::Loaded)
    }

    /// Visits one product link and appends its record
    async fn process_item(&mut self, link: &str) -> ItemState {
        // Marked before loading so a failing link is never retried on a later page
        if !self.seen.insert(link) {
            tracing::debug!("Already seen: {}", link);
            return ItemState::AlreadySeen;
        }

        if let Err(e) = self.load_item(link).await {
            tracing::warn!("Skipped {}: {}", link, e);
            return ItemState::Skipped;
        }

        let source = match self.navigator.page_source().await {
            Ok(source) => source,
            Err(e) => {
                tracing::debug!("No page source for {}, using defaults: {}", link, e);
                String::new()
            }
        };

        let record = {
            let doc = Document::parse(&source);
            extract_book(&doc, &self.config.site.category_label)
        };

        tracing::info!("Saved: {}", record.name);
        self.records.push(record);
        ItemState::Saved
    }

    /// Loads a product page, retrying with a fixed pause between attempts
    async fn load_item(&mut self, link: &str) -> Result<(), BrowserError> {
        let crawler = &self.config.crawler;
        let attempts = crawler.item_attempts.max(1);
        let mut attempt = 1;

        loop {
            let result = self
                .navigator
                .open(
                    link,
                    selectors::DETAIL_READY,
                    crawler.page_load_timeout(),
                    crawler.selector_timeout(),
                )
                .await;

            match result {
                Ok(()) => return Ok(()),
                Err(e) if attempt >= attempts => return Err(e),
                Err(e) => {
                    tracing::debug!("Attempt {}/{} for {} failed: {}", attempt, attempts, link, e);
                    tokio::time::sleep(crawler.retry_backoff()).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Checks the stop flag and records an early stop
    fn stop_requested(&mut self) -> bool {
        if !self.stop.is_requested() {
            return false;
        }
        if !self.stats.stopped_early {
            tracing::info!("Manual stop requested, ending crawl early");
            self.stats.stopped_early = true;
        }
        true
    }
}
