//! Run statistics collected while crawling
//!
//! This module counts page and item outcomes during a run and prints the
//! final report next to the deduplication counts.

use crate::output::FinalizeReport;
use crate::state::{ItemState, PageState};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the crawl loop ended
    pub finished_at: Option<DateTime<Utc>>,

    /// Count of listing pages by outcome
    pub pages_by_state: HashMap<PageState, u64>,

    /// Count of product links by outcome
    pub items_by_state: HashMap<ItemState, u64>,

    /// Product links collected across all listing pages
    pub links_found: u64,

    /// Whether the crawl ended because of a manual stop
    pub stopped_early: bool,
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlStatistics {
    /// Starts a new statistics record stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_by_state: HashMap::new(),
            items_by_state: HashMap::new(),
            links_found: 0,
            stopped_early: false,
        }
    }

    pub fn record_page(&mut self, state: PageState) {
        *self.pages_by_state.entry(state).or_insert(0) += 1;
    }

    pub fn record_item(&mut self, state: ItemState) {
        *self.items_by_state.entry(state).or_insert(0) += 1;
    }

    pub fn add_links(&mut self, count: usize) {
        self.links_found += count as u64;
    }

    /// Stamps the end of the crawl loop
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn pages(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }

    pub fn items(&self, state: ItemState) -> u64 {
        self.items_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Listing pages the crawl started on
    pub fn pages_attempted(&self) -> u64 {
        self.pages_by_state.values().sum()
    }

    /// Listing pages that timed out or failed
    pub fn pages_failed(&self) -> u64 {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Wall-clock duration of the crawl loop, once finished
    pub fn duration_seconds(&self) -> Option<u64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds().max(0) as u64)
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics, report: &FinalizeReport) {
    println!("=== Crawl Statistics ===\n");

    println!("Listing pages:");
    println!("  Attempted: {}", stats.pages_attempted());
    println!("  With products: {}", stats.pages(PageState::Loaded));
    println!("  Empty: {}", stats.pages(PageState::Empty));
    println!("  Timed out: {}", stats.pages(PageState::TimedOut));
    println!("  Failed: {}", stats.pages(PageState::Failed));
    println!();

    println!("Products:");
    println!("  Links found: {}", stats.links_found);
    println!("  Already seen: {}", stats.items(ItemState::AlreadySeen));
    println!("  Skipped after retries: {}", stats.items(ItemState::Skipped));
    println!("  Saved: {}", stats.items(ItemState::Saved));
    println!();

    println!("Records:");
    println!("  Before removing duplicates: {}", report.before);
    println!("  After removing duplicates: {}", report.after);
    for file in &report.files {
        println!("  Wrote {}", file.display());
    }
    println!();

    if stats.stopped_early {
        println!("Crawl was stopped manually.");
    }
    if let Some(seconds) = stats.duration_seconds() {
        println!("Duration: {}s", seconds);
    }
}
