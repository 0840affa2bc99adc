use serde::{Deserialize, Serialize};

use super::config::ValuationConfig;
use super::currency::to_secondary_unit;
use super::curve::{score_to_price, score_to_units};
use super::error::ValuationError;
use super::factors::{compute_sub_scores, SubScores};
use super::input::ValuationInput;
use super::weights::WeightSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryContribution {
    pub label: String,     // e.g. "Artist", "Expert"
    pub sub_score: u8,     // Sub-score on 0..=100
    pub weight: f64,       // Weight applied to it
    pub contribution: f64, // sub_score * weight
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub categories: Vec<CategoryContribution>,
}

/// Estimate quoted in the secondary unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryValue {
    pub symbol: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub id: Option<String>,
    pub title: Option<String>,
    pub sub_scores: SubScores,
    /// Weighted score on [0, 100], unrounded
    pub final_score: f64,
    /// Curve units before multiplying by the base price
    pub units: f64,
    /// Estimate in base currency
    pub estimated_value: u64,
    pub currency: String,
    pub secondary: Option<SecondaryValue>,
    pub breakdown: ScoreBreakdown,
}

impl ValuationResult {
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("(untitled)")
    }
}

/// Weighted sum of the five sub-scores.
///
/// Fails with [`ValuationError::InvalidWeights`] unless the weights are
/// non-negative and sum to 1.0 within tolerance. The result is not rounded.
pub fn combine_scores(scores: &SubScores, weights: &WeightSet) -> Result<f64, ValuationError> {
    weights.validate()?;
    let total: f64 = weighted(scores, weights).iter().map(|(_, _, w, c)| c * w).sum();
    // Weight sums may exceed 1.0 by up to the tolerance
    Ok(total.clamp(0.0, 100.0))
}

/// Score, price and break down one artwork.
pub fn evaluate(
    input: &ValuationInput,
    config: &ValuationConfig,
    current_year: i32,
) -> Result<ValuationResult, ValuationError> {
    let sub_scores = compute_sub_scores(input, current_year);
    let final_score = combine_scores(&sub_scores, &config.weights)?;

    let pricing = &config.pricing;
    let estimated_value = score_to_price(final_score, pricing.base_price_unit);

    let secondary = match pricing.secondary {
        Some(ref unit) => Some(SecondaryValue {
            symbol: unit.symbol.clone(),
            amount: to_secondary_unit(estimated_value as f64, unit.exchange_rate)?,
        }),
        None => None,
    };

    let categories = weighted(&sub_scores, &config.weights)
        .into_iter()
        .map(|(label, sub_score, weight, value)| CategoryContribution {
            label: label.to_string(),
            sub_score,
            weight,
            contribution: value * weight,
        })
        .collect();

    tracing::debug!(
        artwork = input.display_name(),
        final_score,
        estimated_value,
        "evaluated artwork"
    );

    Ok(ValuationResult {
        id: input.id.clone(),
        title: input.title.clone(),
        sub_scores,
        final_score,
        units: score_to_units(final_score),
        estimated_value,
        currency: pricing.currency.clone(),
        secondary,
        breakdown: ScoreBreakdown { categories },
    })
}

/// Evaluate a batch; the first invalid configuration error aborts the batch.
pub fn evaluate_all(
    inputs: &[ValuationInput],
    config: &ValuationConfig,
    current_year: i32,
) -> Result<Vec<ValuationResult>, ValuationError> {
    inputs
        .iter()
        .map(|input| evaluate(input, config, current_year))
        .collect()
}

/// Sort by final score descending, then by display name for ties.
pub fn rank(results: &mut [ValuationResult]) {
    results.sort_by(|a, b| {
        let score_cmp = b
            .final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal);
        if score_cmp != std::cmp::Ordering::Equal {
            return score_cmp;
        }
        a.display_name().cmp(b.display_name())
    });
}

fn weighted(scores: &SubScores, weights: &WeightSet) -> [(&'static str, u8, f64, f64); 5] {
    let labeled = scores.labeled();
    let w = weights.as_array();
    std::array::from_fn(|i| {
        let (label, score) = labeled[i];
        (label, score, w[i], f64::from(score))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::config::{PricingConfig, SecondaryUnit};
    use crate::valuation::input::{ArtistFacts, ArtworkRatings, CertificationFacts};
    use proptest::prelude::*;

    fn uniform(score: u8) -> SubScores {
        SubScores {
            artist: score,
            artwork: score,
            certification: score,
            expert: score,
            popularity: score,
        }
    }

    fn sample_input(title: &str) -> ValuationInput {
        ValuationInput {
            id: None,
            title: Some(title.to_string()),
            artist: ArtistFacts {
                solo_exhibitions: 3,
                group_exhibitions: 5,
                awards: 1,
                latest_exhibition_year: Some(2026),
            },
            artwork: ArtworkRatings {
                depth: 50.0,
                expression: 50.0,
                originality: 50.0,
                collection_value: 50.0,
            },
            certification: CertificationFacts {
                blockchain_hash: true,
                copyright: false,
                license: false,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_combine_all_max() {
        let score = combine_scores(&uniform(100), &WeightSet::balanced()).unwrap();
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_combine_all_zero() {
        let score = combine_scores(&uniform(0), &WeightSet::balanced()).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_combine_weighted_sum() {
        let scores = SubScores {
            artist: 70,
            artwork: 50,
            certification: 40,
            expert: 0,
            popularity: 0,
        };
        // (70 + 50 + 40) * 0.2 = 32
        let score = combine_scores(&scores, &WeightSet::balanced()).unwrap();
        assert!((score - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_combine_skewed_weights() {
        let weights = WeightSet {
            artist: 0.8,
            artwork: 0.05,
            certification: 0.05,
            expert: 0.05,
            popularity: 0.05,
        };
        let scores = SubScores {
            artist: 100,
            ..Default::default()
        };
        let score = combine_scores(&scores, &weights).unwrap();
        assert!((score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_combine_rejects_invalid_weights() {
        let weights = WeightSet {
            popularity: 0.3,
            ..WeightSet::balanced()
        };
        let result = combine_scores(&uniform(50), &weights);
        assert!(matches!(result, Err(ValuationError::InvalidWeights { .. })));
    }

    #[test]
    fn test_evaluate_full_flow() {
        let config = ValuationConfig::default();
        let result = evaluate(&sample_input("Moonlit Harbor"), &config, 2026).unwrap();

        assert_eq!(result.sub_scores.artist, 70);
        assert_eq!(result.sub_scores.artwork, 50);
        assert_eq!(result.sub_scores.certification, 40);
        assert!((result.final_score - 32.0).abs() < 1e-9);
        // 32 / 50 = 0.64 units * 4.5M
        assert_eq!(result.estimated_value, 2_880_000);
        assert_eq!(result.currency, "KRW");

        let secondary = result.secondary.unwrap();
        assert_eq!(secondary.symbol, "ETH");
        assert!((secondary.amount - 0.64).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_breakdown_sums_to_final_score() {
        let config = ValuationConfig {
            weights: WeightSet::artist_focused(),
            ..Default::default()
        };
        let result = evaluate(&sample_input("A"), &config, 2026).unwrap();
        assert_eq!(result.breakdown.categories.len(), 5);
        assert_eq!(result.breakdown.categories[0].label, "Artist");
        let sum: f64 = result
            .breakdown
            .categories
            .iter()
            .map(|c| c.contribution)
            .sum();
        assert!((sum - result.final_score).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_without_secondary_unit() {
        let config = ValuationConfig {
            pricing: PricingConfig {
                secondary: None,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = evaluate(&sample_input("A"), &config, 2026).unwrap();
        assert!(result.secondary.is_none());
    }

    #[test]
    fn test_evaluate_surfaces_invalid_exchange_rate() {
        let config = ValuationConfig {
            pricing: PricingConfig {
                secondary: Some(SecondaryUnit {
                    symbol: "ETH".to_string(),
                    exchange_rate: 0.0,
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = evaluate(&sample_input("A"), &config, 2026);
        assert_eq!(
            result,
            Err(ValuationError::InvalidExchangeRate { rate: 0.0 })
        );
    }

    #[test]
    fn test_evaluate_all_stops_on_invalid_weights() {
        let config = ValuationConfig {
            weights: WeightSet {
                artist: 0.0,
                ..WeightSet::balanced()
            },
            ..Default::default()
        };
        let inputs = vec![sample_input("A"), sample_input("B")];
        assert!(evaluate_all(&inputs, &config, 2026).is_err());
    }

    #[test]
    fn test_rank_orders_by_score_then_title() {
        let config = ValuationConfig::default();
        let mut strong = sample_input("Zenith");
        strong.certification.copyright = true;
        strong.certification.license = true;

        let inputs = vec![sample_input("Beta"), strong, sample_input("Alpha")];
        let mut results = evaluate_all(&inputs, &config, 2026).unwrap();
        rank(&mut results);

        let names: Vec<_> = results.iter().map(|r| r.display_name()).collect();
        assert_eq!(names, vec!["Zenith", "Alpha", "Beta"]);
    }

    proptest! {
        #[test]
        fn prop_combine_is_deterministic_and_bounded(
            a in 0u8..=100, b in 0u8..=100, c in 0u8..=100, d in 0u8..=100, e in 0u8..=100,
            raw in proptest::array::uniform5(0.0f64..1.0),
        ) {
            let total: f64 = raw.iter().sum();
            prop_assume!(total > 1e-3);
            let weights = WeightSet {
                artist: raw[0] / total,
                artwork: raw[1] / total,
                certification: raw[2] / total,
                expert: raw[3] / total,
                popularity: raw[4] / total,
            };
            prop_assume!(weights.validate().is_ok());
            let scores = SubScores {
                artist: a,
                artwork: b,
                certification: c,
                expert: d,
                popularity: e,
            };

            let first = combine_scores(&scores, &weights).unwrap();
            let second = combine_scores(&scores, &weights).unwrap();
            prop_assert_eq!(first.to_bits(), second.to_bits());
            prop_assert!((0.0..=100.0).contains(&first));
        }

        #[test]
        fn prop_combine_rejects_sums_off_by_more_than_tolerance(
            delta in 1e-5f64..0.5,
            sign in proptest::bool::ANY,
        ) {
            let shift = if sign { delta } else { -delta };
            let weights = WeightSet {
                artist: 0.2 + shift,
                ..WeightSet::balanced()
            };
            let result = combine_scores(&uniform(50), &weights);
            prop_assert!(
                matches!(result, Err(ValuationError::InvalidWeights { .. })),
                "expected InvalidWeights for shift {}",
                shift
            );
        }
    }
}
