use crate::models::{BbState, TableState};

/// Converts every chip value in a table state to big blind units.
///
/// A non-positive big blind is not an error here: between hands the table
/// legitimately reports no blind level, so the result is zeroed out while
/// keeping the same stack keys. The scalar form in [`super::core`] raises
/// instead; the asymmetry is intentional.
pub fn convert_table(state: &TableState) -> BbState {
    if state.big_blind <= 0.0 {
        return BbState {
            pot_bb: 0.0,
            stacks_bb: state.stacks.keys().map(|name| (name.clone(), 0.0)).collect(),
        };
    }
    BbState {
        pot_bb: state.pot / state.big_blind,
        stacks_bb: state
            .stacks
            .iter()
            .map(|(name, chips)| (name.clone(), chips / state.big_blind))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table(big_blind: f64) -> TableState {
        TableState {
            small_blind: big_blind / 2.0,
            big_blind,
            pot: 350.0,
            stacks: HashMap::from([
                ("Alice".to_string(), 5000.0),
                ("Bob".to_string(), 3200.0),
            ]),
        }
    }

    #[test]
    fn converts_pot_and_stacks() {
        let bb = convert_table(&table(100.0));
        assert_eq!(bb.pot_bb, 3.5);
        assert_eq!(bb.stacks_bb.get("Alice"), Some(&50.0));
        assert_eq!(bb.stacks_bb.get("Bob"), Some(&32.0));
    }

    #[test]
    fn zero_big_blind_degrades_to_zeroed_state_with_same_keys() {
        let bb = convert_table(&table(0.0));
        assert_eq!(bb.pot_bb, 0.0);
        assert_eq!(bb.stacks_bb.len(), 2);
        assert_eq!(bb.stacks_bb.get("Alice"), Some(&0.0));
        assert_eq!(bb.stacks_bb.get("Bob"), Some(&0.0));
    }

    #[test]
    fn negative_big_blind_also_degrades_instead_of_raising() {
        let bb = convert_table(&table(-1.0));
        assert_eq!(bb.pot_bb, 0.0);
    }
}
