//! Page navigation on top of a [`Browser`]
//!
//! The navigator owns the browser handle for the whole run. It adds the
//! timeout-bounded load, the readiness wait, the scroll loop that makes
//! lazily loaded cards appear, and release-once semantics.

use crate::browser::{Browser, BrowserError, BrowserResult};
use std::time::Duration;

/// Scrolls the viewport to the current bottom of the document
const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// How a scroll-to-bottom pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOutcome {
    /// Scroll steps performed
    pub rounds: u32,

    /// False if the round limit was hit while the page was still growing
    pub converged: bool,
}

/// Drives a single browser for the crawler
pub struct Navigator<B: Browser> {
    browser: B,
    released: bool,
}

impl<B: Browser> Navigator<B> {
    pub fn new(browser: B) -> Self {
        Self {
            browser,
            released: false,
        }
    }

    /// Loads `url`, bounded by `timeout`
    ///
    /// Navigation failures and load timeouts are returned as distinct
    /// [`BrowserError`] variants; a page that loads but is empty is `Ok`.
    pub async fn load(&mut self, url: &str, timeout: Duration) -> BrowserResult<()> {
        self.ensure_open()?;
        self.browser.navigate(url, timeout).await
    }

    /// Waits until `selector` matches at least one element
    pub async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> BrowserResult<()> {
        self.ensure_open()?;
        self.browser.wait_for_selector(selector, timeout).await
    }

    /// Loads `url` and waits for `ready_selector`
    pub async fn open(
        &mut self,
        url: &str,
        ready_selector: &str,
        load_timeout: Duration,
        wait_timeout: Duration,
    ) -> BrowserResult<()> {
        self.load(url, load_timeout).await?;
        self.wait_for_selector(ready_selector, wait_timeout).await
    }

    /// Scrolls to the bottom until the document height stops growing
    ///
    /// After each scroll the navigator pauses for `pause` and measures the
    /// height again. The loop ends when two consecutive measurements are
    /// equal, or after `max_rounds` scrolls.
    pub async fn scroll_to_bottom(
        &mut self,
        pause: Duration,
        max_rounds: u32,
    ) -> BrowserResult<ScrollOutcome> {
        self.ensure_open()?;
        let mut last_height = self.browser.document_height().await?;

        for round in 1..=max_rounds {
            self.browser.execute_script(SCROLL_TO_BOTTOM_JS).await?;
            tokio::time::sleep(pause).await;

            let new_height = self.browser.document_height().await?;
            tracing::debug!("Scroll round {}: height {} -> {}", round, last_height, new_height);

            if new_height == last_height {
                return Ok(ScrollOutcome {
                    rounds: round,
                    converged: true,
                });
            }
            last_height = new_height;
        }

        tracing::warn!(
            "Page still growing after {} scroll rounds, continuing with what is loaded",
            max_rounds
        );
        Ok(ScrollOutcome {
            rounds: max_rounds,
            converged: false,
        })
    }

    /// Rendered HTML of the current page
    pub async fn page_source(&mut self) -> BrowserResult<String> {
        self.ensure_open()?;
        self.browser.page_source().await
    }

    /// URL of the current page
    pub async fn current_url(&mut self) -> BrowserResult<String> {
        self.ensure_open()?;
        self.browser.current_url().await
    }

    /// Releases the browser
    ///
    /// Only the first call reaches the browser; later calls are no-ops.
    pub async fn release(&mut self) -> BrowserResult<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.browser.quit().await
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// The wrapped browser
    pub fn browser(&self) -> &B {
        &self.browser
    }

    fn ensure_open(&self) -> BrowserResult<()> {
        if self.released {
            Err(BrowserError::Closed)
        } else {
            Ok(())
        }
    }
}
