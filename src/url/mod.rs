//! Link handling for catalog pages
//!
//! Listing pages expose product links as raw `href` values. They are
//! resolved against the page they were found on and normalized so the same
//! product page always produces the same string.

mod normalize;

pub use normalize::normalize_url;

use url::Url;

/// Resolves an `href` to a normalized absolute URL
///
/// Returns None if the link should be ignored:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel:, data: links
/// - hrefs that do not resolve to an HTTP(S) URL
///
/// # Examples
///
/// ```
/// use ketab_crawler::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://www.iranketab.ir/tag/484-finance?p=2").unwrap();
/// assert_eq!(
///     resolve_link("/book/7-money#top", &base).as_deref(),
///     Some("https://www.iranketab.ir/book/7-money")
/// );
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    match normalize_url(absolute.as_str()) {
        Ok(normalized) => Some(normalized.to_string()),
        Err(e) => {
            tracing::debug!("Ignoring link {}: {}", href, e);
            None
        }
    }
}
