//! Field extraction for product detail pages
//!
//! Every extractor returns its field's final value. Missing elements,
//! unparsable text and query failures all resolve to the field's default
//! (see [`crate::text::UNKNOWN`]); nothing here returns an error.

pub mod selectors;

use crate::browser::{BrowserResult, Document};
use crate::record::BookRecord;
use crate::text::{clean_or_default, extract_integer, extract_shamsi_year, UNKNOWN};
use selectors::labels;

/// Builds the full record for a loaded detail page
///
/// # Arguments
///
/// * `doc` - Snapshot of the detail page
/// * `category` - Tag stored in the record's `category` column
pub fn extract_book(doc: &Document, category: &str) -> BookRecord {
    BookRecord {
        name: extract_title(doc),
        writer: extract_writer(doc),
        translator: extract_translators(doc),
        publisher: clean_or_default(label_value(doc, labels::PUBLISHER).as_deref()),
        sku: clean_or_default(label_value(doc, labels::SKU).as_deref()),
        price: extract_price(doc),
        pages: extract_integer(label_value(doc, labels::PAGES).as_deref()),
        year_shamsi: extract_shamsi_year(label_value(doc, labels::YEAR_SHAMSI).as_deref()),
        year_gregorian: extract_integer(label_value(doc, labels::YEAR_GREGORIAN).as_deref()),
        print_run: extract_integer(label_value(doc, labels::PRINT_RUN).as_deref()),
        trim_size: clean_or_default(label_value(doc, labels::TRIM_SIZE).as_deref()),
        binding: clean_or_default(label_value(doc, labels::BINDING).as_deref()),
        description: extract_description(doc),
        category: category.to_string(),
    }
}

/// Book title
///
/// Falls back to the document title without the site suffix, then to
/// [`UNKNOWN`]. Never empty.
pub fn extract_title(doc: &Document) -> String {
    if let Some(title) = text_of(doc, selectors::TITLE) {
        return title;
    }

    let from_document = doc
        .title()
        .map(|title| title.replace(selectors::TITLE_SUFFIX, ""));
    clean_or_default(from_document.as_deref())
}

/// Author name, or [`UNKNOWN`]
pub fn extract_writer(doc: &Document) -> String {
    clean_or_default(text_of(doc, selectors::WRITER).as_deref())
}

/// Translator names joined with `، `, or [`UNKNOWN`] when none are listed
pub fn extract_translators(doc: &Document) -> String {
    let names = recover(doc.anchors_after_label(labels::TRANSLATOR), "translators");

    match names {
        Some(names) if !names.is_empty() => names.join(selectors::TRANSLATOR_SEPARATOR),
        _ => UNKNOWN.to_string(),
    }
}

/// Price in Toman, or 0 when the price element is missing or has no digits
pub fn extract_price(doc: &Document) -> u64 {
    extract_integer(text_of(doc, selectors::PRICE).as_deref()).unwrap_or(0)
}

/// Description text, or [`UNKNOWN`]
pub fn extract_description(doc: &Document) -> String {
    clean_or_default(text_of(doc, selectors::DESCRIPTION).as_deref())
}

/// Value of the specification row whose label contains `label`
pub fn label_value(doc: &Document, label: &str) -> Option<String> {
    recover(doc.value_for_label(selectors::LABEL_ROW, label), label).flatten()
}

/// Trimmed text of the first element matching `selector`, if non-empty
fn text_of(doc: &Document, selector: &str) -> Option<String> {
    recover(doc.query_one(selector), selector)
        .flatten()
        .map(|element| element.text())
        .filter(|text| !text.is_empty())
}

/// Turns a failed query into an absent value
fn recover<T>(result: BrowserResult<T>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Lookup of {} failed, using default: {}", what, e);
            None
        }
    }
}
