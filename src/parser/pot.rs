use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::parse_amount;

static POT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:pot|total)\s*:?\s*\$?(?P<amount>[\d,]+(?:\.\d{1,2})?)")
        .expect("pot pattern compiles")
});

/// Extracts the pot size from raw OCR text.
///
/// Matches patterns like `Pot: 350`, `Total $1,200`, or `Pot 500.50`.
pub fn parse_pot(text: &str) -> Option<f64> {
    let caps = POT_PATTERN.captures(text)?;
    parse_amount(caps.name("amount")?.as_str())
}
