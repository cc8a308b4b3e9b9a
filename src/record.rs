//! The output row produced for every visited product page

use serde::{Deserialize, Serialize};

/// One book scraped from a product detail page
///
/// Field order is the column order of every output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Title, never empty
    pub name: String,

    /// Author
    pub writer: String,

    /// Translators joined with `، `
    pub translator: String,

    pub publisher: String,

    /// Catalog identifier (ISBN), not guaranteed unique
    pub sku: String,

    /// Price in Toman, 0 when it could not be read
    pub price: u64,

    pub pages: Option<u64>,

    /// Publication year in the Solar Hijri calendar, 1300..=1449
    pub year_shamsi: Option<u64>,

    pub year_gregorian: Option<u64>,

    pub print_run: Option<u64>,

    pub trim_size: String,

    pub binding: String,

    pub description: String,

    /// Constant tag of the crawled category
    pub category: String,
}

impl BookRecord {
    /// Returns the natural key used to drop duplicate rows
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.name, &self.sku)
    }
}

/// Column names in declaration order
pub const COLUMNS: [&str; 14] = [
    "name",
    "writer",
    "translator",
    "publisher",
    "sku",
    "price",
    "pages",
    "year_shamsi",
    "year_gregorian",
    "print_run",
    "trim_size",
    "binding",
    "description",
    "category",
];

#[cfg(test)]
pub(crate) fn sample_record(name: &str, sku: &str, price: u64) -> BookRecord {
    use crate::text::UNKNOWN;

    BookRecord {
        name: name.to_string(),
        writer: UNKNOWN.to_string(),
        translator: UNKNOWN.to_string(),
        publisher: UNKNOWN.to_string(),
        sku: sku.to_string(),
        price,
        pages: None,
        year_shamsi: None,
        year_gregorian: None,
        print_run: None,
        trim_size: UNKNOWN.to_string(),
        binding: UNKNOWN.to_string(),
        description: UNKNOWN.to_string(),
        category: "مالی".to_string(),
    }
}
