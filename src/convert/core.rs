use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("big blind must be positive, got {0}")]
    NonPositiveBigBlind(f64),
}

/// Converts a chip amount to big blind units.
///
/// This scalar form treats a non-positive big blind as a caller contract
/// violation; the batch form in [`super::batch`] degrades to zero instead,
/// because a zero big blind between hands is an expected transient.
pub fn chips_to_bb(chips: f64, big_blind: f64) -> Result<f64, ConversionError> {
    if big_blind <= 0.0 {
        return Err(ConversionError::NonPositiveBigBlind(big_blind));
    }
    Ok(chips / big_blind)
}
