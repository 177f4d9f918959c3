use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::parse_amount;

static BLIND_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:blinds?|bl)\s*:?\s*\$?(?P<sb>[\d,]+(?:\.\d{1,2})?)\s*[/\\|]\s*\$?(?P<bb>[\d,]+(?:\.\d{1,2})?)",
    )
    .expect("blind pattern compiles")
});

/// Extracts `(small_blind, big_blind)` from raw OCR text.
///
/// Matches patterns like `Blinds: 50/100`, `BL 25/50`, or `Blind $100/$200`.
pub fn parse_blinds(text: &str) -> Option<(f64, f64)> {
    let caps = BLIND_PATTERN.captures(text)?;
    let sb = parse_amount(caps.name("sb")?.as_str())?;
    let bb = parse_amount(caps.name("bb")?.as_str())?;
    Some((sb, bb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_format() {
        assert_eq!(parse_blinds("Blinds: 50/100"), Some((50.0, 100.0)));
    }

    #[test]
    fn parses_abbreviated_and_dollar_forms() {
        assert_eq!(parse_blinds("BL 25/50"), Some((25.0, 50.0)));
        assert_eq!(parse_blinds("Blind $100/$200"), Some((100.0, 200.0)));
    }

    #[test]
    fn parses_commas_and_decimals() {
        assert_eq!(parse_blinds("blinds 1,000/2,000"), Some((1000.0, 2000.0)));
        assert_eq!(parse_blinds("Blinds: 0.50/1.00"), Some((0.5, 1.0)));
    }

    #[test]
    fn tolerates_ocr_slash_confusion() {
        // A misread backslash or pipe still separates the pair.
        assert_eq!(parse_blinds(r"Blinds 50\100"), Some((50.0, 100.0)));
        assert_eq!(parse_blinds("Blinds 50|100"), Some((50.0, 100.0)));
    }

    #[test]
    fn absent_blinds_yield_none() {
        assert_eq!(parse_blinds("Pot: 350 Alice 5000"), None);
        assert_eq!(parse_blinds(""), None);
    }
}
