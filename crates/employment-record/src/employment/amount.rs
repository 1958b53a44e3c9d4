//! Currency-like amount handling for free-form income input.
//!
//! Formatting is forgiving: anything that is not a digit or decimal point is
//! dropped so the field can be re-rendered on every keystroke. Parsing only
//! removes the currency symbol and grouping separators and leaves numeric
//! well-formedness to the validation rules.

/// Maximum number of fractional digits kept by [`format_amount`].
pub const MAX_FRACTION_DIGITS: usize = 2;

/// Formats raw input as a US-grouped amount (`"1000000"` -> `"1,000,000"`).
///
/// Fractional digits are truncated, never rounded. A trailing decimal point is
/// preserved so partially typed values such as `"12."` survive reformatting.
pub fn format_amount(raw: &str) -> String {
    let numeric: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();

    if numeric.is_empty() || numeric == "." {
        return String::new();
    }

    let mut parts = numeric.split('.');
    let integer_digits = parts.next().unwrap_or_default();
    let fraction_digits = parts.next();

    let stripped = integer_digits.trim_start_matches('0');
    let integer = if stripped.is_empty() { "0" } else { stripped };

    let mut formatted = group_thousands(integer);
    if let Some(fraction) = fraction_digits {
        formatted.push('.');
        formatted.extend(fraction.chars().take(MAX_FRACTION_DIGITS));
    }

    formatted
}

/// Removes `$` and `,` from a formatted amount, leaving everything else intact.
pub fn parse_amount(formatted: &str) -> String {
    formatted
        .chars()
        .filter(|ch| !matches!(ch, '$' | ','))
        .collect()
}

/// Numeric value of an income string such as `"$100,000.50"`.
///
/// Blank input is zero. Returns `None` when the cleaned text is not a decimal
/// literal.
pub fn parse_income(value: &str) -> Option<f64> {
    let cleaned = parse_amount(value);
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let literal = trimmed
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '+' | '-' | 'e' | 'E'));
    if !literal {
        return None;
    }

    trimmed.parse::<f64>().ok()
}

/// Inserts `,` every three digits counting from the ones place.
pub(crate) fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integer_part_in_threes() {
        assert_eq!(format_amount("1000000"), "1,000,000");
        assert_eq!(format_amount("100"), "100");
        assert_eq!(format_amount("1234.5"), "1,234.5");
        assert_eq!(format_amount("12345"), "12,345");
    }

    #[test]
    fn strips_noise_and_leading_zeros() {
        assert_eq!(format_amount("$00120,000"), "120,000");
        assert_eq!(format_amount("000"), "0");
        assert_eq!(format_amount(".75"), "0.75");
        assert_eq!(format_amount("abc"), "");
        assert_eq!(format_amount("."), "");
    }

    #[test]
    fn truncates_fraction_instead_of_rounding() {
        assert_eq!(format_amount("99.999"), "99.99");
        assert_eq!(format_amount("1.2.3"), "1.2");
        assert_eq!(format_amount("12."), "12.");
    }

    #[test]
    fn formatting_is_idempotent() {
        for raw in ["1234567.891", "$5,000", "0.5", "12.", "007"] {
            let once = format_amount(raw);
            assert_eq!(format_amount(&once), once, "input {raw}");
        }
    }

    #[test]
    fn parse_reverses_format_up_to_truncation() {
        for (raw, expected) in [("1234567.891", 1_234_567.89), ("42", 42.0), ("0.5", 0.5)] {
            let parsed = parse_amount(&format_amount(raw));
            let value: f64 = parsed.parse().expect("numeric after parse");
            assert!((value - expected).abs() < 1e-9, "input {raw} parsed {value}");
        }
    }

    #[test]
    fn parse_amount_only_removes_symbol_and_separators() {
        assert_eq!(parse_amount("$1,234.56"), "1234.56");
        assert_eq!(parse_amount("12ab"), "12ab");
    }

    #[test]
    fn parse_income_rejects_non_numeric_text() {
        assert_eq!(parse_income("$100,000"), Some(100_000.0));
        assert_eq!(parse_income(""), Some(0.0));
        assert_eq!(parse_income("1e3"), Some(1000.0));
        assert_eq!(parse_income("12abc"), None);
        assert_eq!(parse_income("inf"), None);
        assert_eq!(parse_income("1..2"), None);
    }
}
