use serde::{Deserialize, Serialize};

use super::error::ValuationError;

/// Allowed deviation of the weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Coefficients applied to the five sub-scores.
///
/// Weights are expressed as fractions and must sum to 1.0. A set that does
/// not is rejected by [`WeightSet::validate`]; it is never rescaled.
///
/// Example YAML:
/// ```yaml
/// weights:
///   artist: 0.3
///   artwork: 0.25
///   certification: 0.15
///   expert: 0.2
///   popularity: 0.1
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeightSet {
    pub artist: f64,
    pub artwork: f64,
    pub certification: f64,
    pub expert: f64,
    pub popularity: f64,
}

impl Default for WeightSet {
    fn default() -> Self {
        Self::balanced()
    }
}

impl WeightSet {
    /// Equal 20% share for every category
    pub fn balanced() -> Self {
        Self {
            artist: 0.2,
            artwork: 0.2,
            certification: 0.2,
            expert: 0.2,
            popularity: 0.2,
        }
    }

    /// Leans on the artist's track record and the expert panel
    pub fn artist_focused() -> Self {
        Self {
            artist: 0.4,
            artwork: 0.2,
            certification: 0.1,
            expert: 0.2,
            popularity: 0.1,
        }
    }

    /// Leans on audience traction and provenance paperwork
    pub fn market_focused() -> Self {
        Self {
            artist: 0.1,
            artwork: 0.15,
            certification: 0.25,
            expert: 0.1,
            popularity: 0.4,
        }
    }

    /// Look up a preset by name (case-insensitive)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "balanced" => Some(Self::balanced()),
            "artist" | "artist_focused" | "artist-focused" => Some(Self::artist_focused()),
            "market" | "market_focused" | "market-focused" => Some(Self::market_focused()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> [f64; 5] {
        [
            self.artist,
            self.artwork,
            self.certification,
            self.expert,
            self.popularity,
        ]
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Reject negative or non-finite weights and sums outside `1.0 ± 1e-6`.
    pub fn validate(&self) -> Result<(), ValuationError> {
        let sum = self.total();
        let each_ok = self.as_array().iter().all(|w| w.is_finite() && *w >= 0.0);
        if !each_ok || !sum.is_finite() || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ValuationError::InvalidWeights { sum });
        }
        Ok(())
    }
}
