//! Browser collaborator used to load and inspect catalog pages
//!
//! The crawler only talks to a [`Browser`]: it navigates, waits for content,
//! scrolls, and asks for the rendered page source. DOM queries run on a
//! [`Document`] snapshot parsed from that source, so no DOM handle ever
//! crosses an await point.
//!
//! [`HttpBrowser`] is the bundled implementation for server-rendered pages.

mod document;
mod http;

pub use document::{Document, Element};
pub use http::{build_http_client, format_user_agent, HttpBrowser};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors reported by a browser collaborator
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Page load timed out for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("No element matching '{selector}' appeared within {timeout:?}")]
    SelectorTimeout { selector: String, timeout: Duration },

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("No document loaded")]
    NoDocument,

    #[error("Browser has been closed")]
    Closed,

    #[error("Failed to start browser: {0}")]
    Startup(String),
}

impl BrowserError {
    /// Returns true if the error means "the page did not become ready in time"
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::SelectorTimeout { .. })
    }
}

/// Result type alias for browser operations
pub type BrowserResult<T> = std::result::Result<T, BrowserError>;

/// The rendering engine the crawler drives
///
/// Implementations own one page/tab. Calls are sequential; the crawler never
/// issues a call while another is in flight.
#[async_trait]
pub trait Browser: Send {
    /// Loads `url`, failing if the page does not finish loading within `timeout`
    async fn navigate(&mut self, url: &str, timeout: Duration) -> BrowserResult<()>;

    /// Waits until at least one element matches `selector`
    ///
    /// Returns [`BrowserError::SelectorTimeout`] when `timeout` elapses first.
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> BrowserResult<()>;

    /// Current height of the rendered document in pixels
    async fn document_height(&mut self) -> BrowserResult<u64>;

    /// Runs a script in the page and returns its result
    async fn execute_script(&mut self, script: &str) -> BrowserResult<serde_json::Value>;

    /// The current rendered HTML of the page
    async fn page_source(&mut self) -> BrowserResult<String>;

    /// URL of the loaded page, after redirects
    async fn current_url(&mut self) -> BrowserResult<String>;

    /// Releases the browser; later calls return [`BrowserError::Closed`]
    async fn quit(&mut self) -> BrowserResult<()>;
}
