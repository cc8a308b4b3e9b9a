/// Persian digit glyphs, indexed by their value
const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Arabic-Indic digit glyphs, indexed by their value
const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Converts locale-specific digit glyphs to ASCII digits
///
/// Every character from the Persian or Arabic-Indic digit alphabets is
/// replaced with the ASCII digit of the same value. All other characters
/// pass through unchanged, so the function is total and idempotent.
///
/// # Examples
///
/// ```
/// use ketab_crawler::text::locale_digits_to_ascii;
///
/// assert_eq!(locale_digits_to_ascii("۱۴۰۲"), "1402");
/// assert_eq!(locale_digits_to_ascii("چاپ ٣"), "چاپ 3");
/// ```
pub fn locale_digits_to_ascii(text: &str) -> String {
    text.chars().map(to_ascii_digit).collect()
}

fn to_ascii_digit(ch: char) -> char {
    let position = PERSIAN_DIGITS
        .iter()
        .position(|&d| d == ch)
        .or_else(|| ARABIC_INDIC_DIGITS.iter().position(|&d| d == ch));

    match position {
        // position is always < 10
        Some(value) => char::from(b'0' + value as u8),
        None => ch,
    }
}
