use crate::text::locale_digits_to_ascii;

/// Placeholder stored for any textual field that is missing or blank
pub const UNKNOWN: &str = "نامشخص";

/// Lowest accepted Shamsi publication year
const SHAMSI_YEAR_MIN: u64 = 1300;

/// Highest accepted Shamsi publication year
const SHAMSI_YEAR_MAX: u64 = 1449;

/// Extracts an integer from free text
///
/// Digits are normalized to ASCII first, then every non-digit character is
/// dropped and the remainder is parsed in base 10. Thousands separators,
/// currency words and labels therefore disappear.
///
/// # Returns
///
/// * `Some(n)` - The digits found in the text
/// * `None` - The input was absent, contained no digits, or overflowed
///
/// # Examples
///
/// ```
/// use ketab_crawler::text::extract_integer;
///
/// assert_eq!(extract_integer(Some("قیمت: ۱۲۳۴۵ تومان")), Some(12345));
/// assert_eq!(extract_integer(Some("---")), None);
/// assert_eq!(extract_integer(None), None);
/// ```
pub fn extract_integer(text: Option<&str>) -> Option<u64> {
    let text = text.filter(|t| !t.is_empty())?;

    let digits: String = locale_digits_to_ascii(text)
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse().ok()
}

/// Extracts a Shamsi (Solar Hijri) publication year
///
/// The trimmed, digit-normalized text must be exactly four digits in the
/// range 1300..=1449. Anything else, including years embedded in longer
/// text, yields `None` rather than a raw value.
///
/// # Examples
///
/// ```
/// use ketab_crawler::text::extract_shamsi_year;
///
/// assert_eq!(extract_shamsi_year(Some(" ۱۴۰۳ ")), Some(1403));
/// assert_eq!(extract_shamsi_year(Some("1250")), None);
/// ```
pub fn extract_shamsi_year(text: Option<&str>) -> Option<u64> {
    let cleaned = locale_digits_to_ascii(text.unwrap_or_default().trim());

    if cleaned.len() != 4 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    cleaned
        .parse::<u64>()
        .ok()
        .filter(|year| (SHAMSI_YEAR_MIN..=SHAMSI_YEAR_MAX).contains(year))
}

/// Returns the trimmed text, or [`UNKNOWN`] when absent or blank
pub fn clean_or_default(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(cleaned) if !cleaned.is_empty() => cleaned.to_string(),
        _ => UNKNOWN.to_string(),
    }
}
