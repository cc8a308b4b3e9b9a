//! Product link collection from listing pages

use crate::browser::{BrowserResult, Document};
use crate::extract::selectors::CATALOG_CARD;
use crate::url::resolve_link;
use std::collections::HashSet;
use url::Url;

/// Collects product links from a listing page
///
/// Takes the `href` of every catalog card, resolves it against `page_url`,
/// and removes in-page duplicates while keeping first-seen order. Cards
/// without a usable `href` are skipped.
///
/// # Arguments
///
/// * `doc` - Snapshot of the listing page after scrolling
/// * `page_url` - URL the listing page was loaded from
pub fn collect_listing_links(doc: &Document, page_url: &Url) -> BrowserResult<Vec<String>> {
    let hrefs = doc
        .query_all(CATALOG_CARD)?
        .into_iter()
        .filter_map(|card| card.attribute("href"))
        .filter_map(|href| resolve_link(href, page_url));

    Ok(dedup_preserving_order(hrefs))
}

/// Removes repeated items, keeping the first occurrence of each
pub fn dedup_preserving_order(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
