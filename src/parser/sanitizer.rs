use crate::models::TableState;
use crate::parser::ValidationError;

/// Words the stack parser inevitably picks up that are never player names.
const KEYWORD_NAMES: [&str; 13] = [
    "blinds", "blind", "pot", "total", "seat", "bl", "dealer", "button", "fold", "check", "call",
    "raise", "bet",
];

/// Validates and cleans a parsed table state.
///
/// Drops stack entries named after parser keywords (case-insensitive) or
/// carrying negative amounts; rejects states with negative blinds or pot.
pub fn sanitize(state: TableState) -> Result<TableState, ValidationError> {
    if state.small_blind < 0.0 || state.big_blind < 0.0 {
        return Err(ValidationError::NegativeBlinds {
            small_blind: state.small_blind,
            big_blind: state.big_blind,
        });
    }
    if state.pot < 0.0 {
        return Err(ValidationError::NegativePot(state.pot));
    }

    let TableState {
        small_blind,
        big_blind,
        pot,
        stacks,
    } = state;
    let stacks = stacks
        .into_iter()
        .filter(|(name, amount)| *amount >= 0.0 && !is_keyword(name))
        .collect();

    Ok(TableState {
        small_blind,
        big_blind,
        pot,
        stacks,
    })
}

fn is_keyword(name: &str) -> bool {
    KEYWORD_NAMES
        .iter()
        .any(|keyword| name.eq_ignore_ascii_case(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn state(stacks: &[(&str, f64)]) -> TableState {
        TableState {
            small_blind: 50.0,
            big_blind: 100.0,
            pot: 350.0,
            stacks: stacks
                .iter()
                .map(|(name, amount)| (name.to_string(), *amount))
                .collect(),
        }
    }

    #[test]
    fn keyword_entries_are_removed_case_insensitively() {
        let cleaned = sanitize(state(&[
            ("Pot", 350.0),
            ("pot", 350.0),
            ("POT", 350.0),
            ("Alice", 5000.0),
        ]))
        .unwrap();
        assert_eq!(cleaned.stacks.len(), 1);
        assert_eq!(cleaned.stacks.get("Alice"), Some(&5000.0));
    }

    #[test]
    fn negative_stacks_are_dropped_but_valid_entries_survive_unchanged() {
        let cleaned = sanitize(state(&[("Alice", -5.0), ("Bob", 3200.0)])).unwrap();
        assert_eq!(
            cleaned.stacks,
            HashMap::from([("Bob".to_string(), 3200.0)])
        );
    }

    #[test]
    fn negative_blinds_fail_validation() {
        let mut bad = state(&[]);
        bad.small_blind = -1.0;
        assert_eq!(
            sanitize(bad).unwrap_err(),
            ValidationError::NegativeBlinds {
                small_blind: -1.0,
                big_blind: 100.0
            }
        );
    }

    #[test]
    fn negative_pot_fails_validation() {
        let mut bad = state(&[]);
        bad.pot = -10.0;
        assert_eq!(sanitize(bad).unwrap_err(), ValidationError::NegativePot(-10.0));
    }

    #[test]
    fn zero_big_blind_passes_validation() {
        let mut between_hands = state(&[("Alice", 5000.0)]);
        between_hands.big_blind = 0.0;
        between_hands.small_blind = 0.0;
        assert!(sanitize(between_hands).is_ok());
    }
}
