use super::error::ValuationError;

/// Convert an amount in base currency into the secondary unit
/// (e.g. KRW into ETH, with `exchange_rate` in KRW per ETH).
pub fn to_secondary_unit(amount: f64, exchange_rate: f64) -> Result<f64, ValuationError> {
    check_rate(exchange_rate)?;
    Ok(amount / exchange_rate)
}

/// Convert an amount in the secondary unit back into base currency.
pub fn from_secondary_unit(amount: f64, exchange_rate: f64) -> Result<f64, ValuationError> {
    check_rate(exchange_rate)?;
    Ok(amount * exchange_rate)
}

fn check_rate(exchange_rate: f64) -> Result<(), ValuationError> {
    if exchange_rate.is_finite() && exchange_rate > 0.0 {
        Ok(())
    } else {
        Err(ValuationError::InvalidExchangeRate {
            rate: exchange_rate,
        })
    }
}
