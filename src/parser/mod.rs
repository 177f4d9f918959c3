mod assembler;
mod blinds;
mod pot;
mod sanitizer;
mod stacks;

pub use assembler::assemble_table_state;
pub use blinds::parse_blinds;
pub use pot::parse_pot;
pub use sanitizer::sanitize;
pub use stacks::parse_stacks;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("could not extract blind levels from text")]
    MissingBlinds,
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("negative blind values: sb={small_blind}, bb={big_blind}")]
    NegativeBlinds { small_blind: f64, big_blind: f64 },
    #[error("negative pot value: {0}")]
    NegativePot(f64),
}

/// Parses an OCR amount like `5,000` or `1234.56`.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}
