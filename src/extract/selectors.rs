//! Fixed selectors and labels of the catalog's page templates

/// Anchor of a product card on a listing page
pub const CATALOG_CARD: &str = "a.card.product-card-simple";

/// Element whose presence marks a detail page as loaded
pub const DETAIL_READY: &str = "body";

pub const TITLE: &str = "h5.text-sm.font-bold.truncate.pt-2";

pub const WRITER: &str = "h6.text-xs.truncate.pt-1";

pub const PRICE: &str = "strong.toman";

pub const DESCRIPTION: &str = ".text-justify.leading-6";

/// Two-column rows of the specification table
pub const LABEL_ROW: &str = "div.flex.gap-1";

/// Suffix the site appends to every document title, removed before trimming
pub const TITLE_SUFFIX: &str = "| ایران کتاب";

/// Separator placed between translator names
pub const TRANSLATOR_SEPARATOR: &str = "، ";

/// Row labels, matched as substrings of the first column
pub mod labels {
    /// Exact text of the span preceding translator links
    pub const TRANSLATOR: &str = "مترجم:";
    pub const PUBLISHER: &str = "انتشارات";
    pub const SKU: &str = "شابک";
    pub const PAGES: &str = "تعداد صفحه";
    pub const YEAR_SHAMSI: &str = "سال انتشار شمسی";
    pub const YEAR_GREGORIAN: &str = "سال انتشار میلادی";
    pub const PRINT_RUN: &str = "سری چاپ";
    pub const TRIM_SIZE: &str = "قطع";
    pub const BINDING: &str = "نوع جلد";
}
