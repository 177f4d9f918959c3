use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::parse_amount;

static STACK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<name>[A-Za-z]\w*)\s*[$:]?\s*(?P<amount>[\d,]+(?:\.\d{1,2})?)")
        .expect("stack pattern compiles")
});

/// Extracts player-name to chip-stack mappings from raw OCR text.
///
/// Matches patterns like `Alice 5,000`, `Bob: $3200`, or `Carol 1234.56`.
/// Labels such as `Pot: 350` also match here; the sanitizer strips them by
/// keyword afterwards.
pub fn parse_stacks(text: &str) -> HashMap<String, f64> {
    let mut stacks = HashMap::new();
    for caps in STACK_PATTERN.captures_iter(text) {
        if let Some(amount) = parse_amount(&caps["amount"]) {
            stacks.insert(caps["name"].to_string(), amount);
        }
    }
    stacks
}
