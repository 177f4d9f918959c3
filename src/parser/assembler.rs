use crate::models::TableState;
use crate::parser::{parse_blinds, parse_pot, parse_stacks, ParseError};

/// Combines the sub-parsers into a complete [`TableState`].
///
/// The blind pair is required; a missing pot defaults to 0 (no hand in
/// progress is a normal condition, a table without blind levels is not).
pub fn assemble_table_state(text: &str) -> Result<TableState, ParseError> {
    let (small_blind, big_blind) = parse_blinds(text).ok_or(ParseError::MissingBlinds)?;
    let pot = parse_pot(text).unwrap_or(0.0);
    let stacks = parse_stacks(text);
    Ok(TableState {
        small_blind,
        big_blind,
        pot,
        stacks,
    })
}
