use serde::Deserialize;

const BB_DECIMAL_PLACES: usize = 1;
const COMPACT_THRESHOLD_BB: f64 = 100.0;

/// How BB values are rendered by the display sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// e.g. `2.5bb`
    Decimal,
    /// e.g. `3bb` (rounded)
    Integer,
    /// e.g. `100+bb` for deep stacks
    Compact,
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Decimal
    }
}

/// Formats a BB value for display.
pub fn format_bb(value: f64, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Compact if value >= COMPACT_THRESHOLD_BB => {
            format!("{}+bb", COMPACT_THRESHOLD_BB as i64)
        }
        DisplayMode::Integer => format!("{}bb", value.round() as i64),
        _ => format!("{value:.prec$}bb", prec = BB_DECIMAL_PLACES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_mode_keeps_one_place() {
        assert_eq!(format_bb(2.5, DisplayMode::Decimal), "2.5bb");
        assert_eq!(format_bb(10.0, DisplayMode::Decimal), "10.0bb");
    }

    #[test]
    fn integer_mode_rounds() {
        assert_eq!(format_bb(2.5, DisplayMode::Integer), "3bb");
        assert_eq!(format_bb(2.4, DisplayMode::Integer), "2bb");
    }

    #[test]
    fn compact_mode_caps_deep_stacks() {
        assert_eq!(format_bb(250.0, DisplayMode::Compact), "100+bb");
        assert_eq!(format_bb(100.0, DisplayMode::Compact), "100+bb");
        // Below the threshold compact falls back to decimal.
        assert_eq!(format_bb(42.24, DisplayMode::Compact), "42.2bb");
    }
}
