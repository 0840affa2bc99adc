use super::config::ValuationConfig;
use super::currency::to_secondary_unit;

/// Validate valuation configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &ValuationConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Weights: each non-negative, sum to 1.0
    let weights = &config.weights;
    for (name, value) in [
        ("artist", weights.artist),
        ("artwork", weights.artwork),
        ("certification", weights.certification),
        ("expert", weights.expert),
        ("popularity", weights.popularity),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!(
                "valuation.weights.{}: must be a non-negative number (got {})",
                name, value
            ));
        }
    }
    if let Err(e) = weights.validate() {
        errors.push(format!("valuation.weights: {}", e));
    }

    // Pricing
    let pricing = &config.pricing;
    if !pricing.base_price_unit.is_finite() || pricing.base_price_unit <= 0.0 {
        errors.push(format!(
            "valuation.pricing.base_price_unit: must be positive (got {})",
            pricing.base_price_unit
        ));
    }
    if pricing.currency.trim().is_empty() {
        errors.push("valuation.pricing.currency: must not be empty".to_string());
    }

    if let Some(ref secondary) = pricing.secondary {
        if let Err(e) = to_secondary_unit(0.0, secondary.exchange_rate) {
            errors.push(format!("valuation.pricing.secondary.exchange_rate: {}", e));
        }
        if secondary.symbol.trim().is_empty() {
            errors.push("valuation.pricing.secondary.symbol: must not be empty".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
