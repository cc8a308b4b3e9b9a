//! Text normalization for values scraped from Persian product pages
//!
//! The catalog renders numbers with Persian (and occasionally Arabic-Indic)
//! digit glyphs and uses free-form labels around them. Everything in this
//! module is pure: no I/O, no failure modes beyond "value absent".

mod digits;
mod normalize;

pub use digits::locale_digits_to_ascii;
pub use normalize::{clean_or_default, extract_integer, extract_shamsi_year, UNKNOWN};
