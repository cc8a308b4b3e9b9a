//! HTTP-backed browser for server-rendered catalogs
//!
//! `HttpBrowser` fetches pages with `reqwest` and serves DOM queries from
//! the fetched HTML. It has no script engine: the loaded document never
//! changes after navigation, so waits resolve immediately and the height
//! measured for scroll convergence is stable.

use crate::browser::{Browser, BrowserError, BrowserResult, Document};
use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Maximum number of redirects followed per navigation
const MAX_REDIRECTS: usize = 10;

/// The page currently held by the browser
struct LoadedPage {
    url: String,
    body: String,
}

/// A [`Browser`] that renders nothing and reads what the server sends
pub struct HttpBrowser {
    client: Option<Client>,
    page: Option<LoadedPage>,
}

/// Formats the User-Agent header value
///
/// Format: `CrawlerName/Version (+ContactURL)`
pub fn format_user_agent(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    )
}

/// Builds the HTTP client used by [`HttpBrowser`]
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `page_load_timeout` - Hard cap applied to every request
///
/// # Example
///
/// ```no_run
/// use ketab_crawler::browser::build_http_client;
/// use ketab_crawler::config::UserAgentConfig;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(60)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    page_load_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format_user_agent(config))
        .timeout(page_load_timeout)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

impl HttpBrowser {
    /// Creates a browser with a freshly built client
    pub fn new(config: &UserAgentConfig, page_load_timeout: Duration) -> BrowserResult<Self> {
        let client = build_http_client(config, page_load_timeout)
            .map_err(|e| BrowserError::Startup(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client: Some(client),
            page: None,
        }
    }

    fn client(&self) -> BrowserResult<&Client> {
        self.client.as_ref().ok_or(BrowserError::Closed)
    }

    fn page(&self) -> BrowserResult<&LoadedPage> {
        if self.client.is_none() {
            return Err(BrowserError::Closed);
        }
        self.page.as_ref().ok_or(BrowserError::NoDocument)
    }

    async fn fetch(client: &Client, url: &str) -> BrowserResult<LoadedPage> {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        Ok(LoadedPage {
            url: final_url,
            body,
        })
    }
}

fn classify_request_error(url: &str, error: reqwest::Error) -> BrowserError {
    if error.is_timeout() {
        BrowserError::Timeout {
            url: url.to_string(),
        }
    } else {
        BrowserError::Navigation {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl Browser for HttpBrowser {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> BrowserResult<()> {
        // A failed navigation must not leave the previous page queryable
        self.page = None;

        let client = self.client()?;
        let page = match tokio::time::timeout(timeout, Self::fetch(client, url)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(BrowserError::Timeout {
                    url: url.to_string(),
                })
            }
        };

        tracing::trace!("Loaded {} ({} bytes)", page.url, page.body.len());
        self.page = Some(page);
        Ok(())
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> BrowserResult<()> {
        let page = self.page()?;
        let found = Document::parse(&page.body).contains(selector)?;

        if found {
            Ok(())
        } else {
            Err(BrowserError::SelectorTimeout {
                selector: selector.to_string(),
                timeout,
            })
        }
    }

    async fn document_height(&mut self) -> BrowserResult<u64> {
        Ok(self.page()?.body.len() as u64)
    }

    async fn execute_script(&mut self, _script: &str) -> BrowserResult<serde_json::Value> {
        self.page()?;
        Ok(serde_json::Value::Null)
    }

    async fn page_source(&mut self) -> BrowserResult<String> {
        Ok(self.page()?.body.clone())
    }

    async fn current_url(&mut self) -> BrowserResult<String> {
        Ok(self.page()?.url.clone())
    }

    async fn quit(&mut self) -> BrowserResult<()> {
        if self.client.take().is_none() {
            return Err(BrowserError::Closed);
        }
        self.page = None;
        Ok(())
    }
}
