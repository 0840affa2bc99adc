use thiserror::Error;

/// Errors the valuation engine surfaces to its caller.
///
/// Every other bad input is clamped rather than rejected; these two are the
/// only conditions where the caller has to fix what it passed in.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    #[error("weights must be non-negative and sum to 1.0 (got sum {sum})")]
    InvalidWeights { sum: f64 },

    #[error("exchange rate must be a positive number (got {rate})")]
    InvalidExchangeRate { rate: f64 },
}
