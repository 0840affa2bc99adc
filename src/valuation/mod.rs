pub mod config;
pub mod currency;
pub mod curve;
pub mod engine;
pub mod error;
pub mod factors;
pub mod input;
pub mod validation;
pub mod weights;

pub use config::{PricingConfig, SecondaryUnit, ValuationConfig};
pub use currency::{from_secondary_unit, to_secondary_unit};
pub use curve::{score_to_price, score_to_units};
pub use engine::{
    combine_scores, evaluate, evaluate_all, rank, CategoryContribution, ScoreBreakdown,
    SecondaryValue, ValuationResult,
};
pub use error::ValuationError;
pub use factors::{compute_sub_scores, SubScores};
pub use input::{
    ArtistFacts, ArtworkBatch, ArtworkRatings, CertificationFacts, ExpertRatings,
    PopularityFacts, ValuationInput,
};
pub use validation::validate_config;
pub use weights::WeightSet;
