use serde::{Deserialize, Serialize};

use super::curve::DEFAULT_BASE_PRICE_UNIT;
use super::weights::WeightSet;

/// Valuation settings: category weights and pricing.
///
/// Every section is optional in the YAML file and falls back to its default.
///
/// Example YAML:
/// ```yaml
/// weights: { artist: 0.2, artwork: 0.2, certification: 0.2, expert: 0.2, popularity: 0.2 }
/// pricing:
///   base_price_unit: 4500000
///   currency: KRW
///   secondary: { symbol: ETH, exchange_rate: 4500000 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValuationConfig {
    #[serde(default)]
    pub weights: WeightSet,

    #[serde(default)]
    pub pricing: PricingConfig,
}

/// How final scores become money.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Price of one curve unit in base currency (default: 4,500,000)
    #[serde(default = "default_base_price_unit")]
    pub base_price_unit: f64,

    /// Base currency code, used for display only (default: KRW)
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Optional secondary unit the estimate is also quoted in.
    /// Defaults to ETH; write `secondary: null` to turn it off.
    #[serde(default = "default_secondary")]
    pub secondary: Option<SecondaryUnit>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_price_unit: DEFAULT_BASE_PRICE_UNIT,
            currency: default_currency(),
            secondary: default_secondary(),
        }
    }
}

/// A second unit of account with a fixed rate against the base currency.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SecondaryUnit {
    /// Display symbol, e.g. "ETH"
    pub symbol: String,

    /// Base currency per one secondary unit
    pub exchange_rate: f64,
}

impl Default for SecondaryUnit {
    fn default() -> Self {
        Self {
            symbol: "ETH".to_string(),
            exchange_rate: DEFAULT_BASE_PRICE_UNIT,
        }
    }
}

fn default_base_price_unit() -> f64 {
    DEFAULT_BASE_PRICE_UNIT
}

fn default_secondary() -> Option<SecondaryUnit> {
    Some(SecondaryUnit::default())
}

fn default_currency() -> String {
    "KRW".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_valuation_config() {
        let config = ValuationConfig::default();
        assert_eq!(config.weights, WeightSet::balanced());
        assert_eq!(config.pricing.base_price_unit, 4_500_000.0);
        assert_eq!(config.pricing.currency, "KRW");
        assert_eq!(config.pricing.secondary.unwrap().symbol, "ETH");
    }

    #[test]
    fn test_valuation_config_serde_roundtrip() {
        let config = ValuationConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ValuationConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: ValuationConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ValuationConfig::default());
    }

    #[test]
    fn test_partial_pricing_parse() {
        let yaml = r#"
pricing:
  base_price_unit: 3000000
"#;
        let config: ValuationConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.pricing.base_price_unit, 3_000_000.0);
        assert_eq!(config.pricing.currency, "KRW");
        // A partial pricing block keeps the default secondary quote
        assert_eq!(config.pricing.secondary, Some(SecondaryUnit::default()));
        assert_eq!(config.weights, WeightSet::balanced());
    }

    #[test]
    fn test_partial_and_omitted_pricing_agree() {
        let partial: ValuationConfig =
            serde_saphyr::from_str("pricing: { currency: KRW }").unwrap();
        let omitted: ValuationConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(partial.pricing, omitted.pricing);
    }

    #[test]
    fn test_secondary_can_be_disabled() {
        let yaml = r#"
pricing:
  secondary: null
"#;
        let config: ValuationConfig = serde_saphyr::from_str(yaml).unwrap();
        assert!(config.pricing.secondary.is_none());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
weights:
  artist: 0.4
  artwork: 0.2
  certification: 0.1
  expert: 0.2
  popularity: 0.1
pricing:
  base_price_unit: 4500000
  currency: KRW
  secondary:
    symbol: ETH
    exchange_rate: 4200000
"#;
        let config: ValuationConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.weights, WeightSet::artist_focused());
        let secondary = config.pricing.secondary.unwrap();
        assert_eq!(secondary.symbol, "ETH");
        assert_eq!(secondary.exchange_rate, 4_200_000.0);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<ValuationConfig, _> = serde_saphyr::from_str("curve: quadratic");
        assert!(result.is_err());
    }
}
