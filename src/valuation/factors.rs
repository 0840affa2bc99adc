//! Sub-score calculators.
//!
//! Each calculator maps one group of [`ValuationInput`] facts onto an integer
//! score in `0..=100`. They are total: out-of-range values are clamped and
//! logged at debug level, never rejected.

use serde::{Deserialize, Serialize};

use super::input::{
    ArtistFacts, ArtworkRatings, CertificationFacts, ExpertRatings, PopularityFacts,
    ValuationInput,
};

pub const SOLO_EXHIBITION_POINTS: f64 = 10.0;
pub const GROUP_EXHIBITION_POINTS: f64 = 5.0;
pub const AWARD_POINTS: f64 = 15.0;

/// Exhibitions within this many years keep full weight
pub const RECENCY_GRACE_YEARS: i64 = 5;
// Decay is tracked in whole tenths so .5 totals stay exact
const RECENCY_FULL_TENTHS: i64 = 10;
const RECENCY_FLOOR_TENTHS: i64 = 2;

pub const BLOCKCHAIN_HASH_POINTS: u8 = 40;
pub const COPYRIGHT_POINTS: u8 = 40;
pub const LICENSE_POINTS: u8 = 20;

// Saturation thresholds: raw counter / divisor, capped at 100
const VIDEO_VIEWS_DIVISOR: f64 = 10_000.0;
const SOCIAL_ENGAGEMENT_DIVISOR: f64 = 1_000.0;
const PLATFORM_ACTIVITY_DIVISOR: f64 = 100.0;
const MEDIA_MENTION_POINTS: f64 = 10.0;

/// The five normalized category scores for one artwork.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub artist: u8,
    pub artwork: u8,
    pub certification: u8,
    pub expert: u8,
    pub popularity: u8,
}

impl SubScores {
    /// Scores paired with their category labels, in display order
    pub fn labeled(&self) -> [(&'static str, u8); 5] {
        [
            ("Artist", self.artist),
            ("Artwork", self.artwork),
            ("Certification", self.certification),
            ("Expert", self.expert),
            ("Popularity", self.popularity),
        ]
    }
}

/// Compute all five sub-scores. `current_year` anchors the recency decay.
pub fn compute_sub_scores(input: &ValuationInput, current_year: i32) -> SubScores {
    let scores = SubScores {
        artist: artist_score(&input.artist, current_year),
        artwork: artwork_score(&input.artwork),
        certification: certification_score(&input.certification),
        expert: expert_score(&input.expert),
        popularity: popularity_score(&input.popularity),
    };
    tracing::debug!(
        artwork = input.display_name(),
        artist = scores.artist,
        content = scores.artwork,
        certification = scores.certification,
        expert = scores.expert,
        popularity = scores.popularity,
        "computed sub-scores"
    );
    scores
}

/// Decay factor for exhibition points when the latest show is stale.
///
/// 1.0 up to five years back, then 0.1 less per extra year, never below 0.2.
/// Unknown or future years do not decay.
pub fn recency_multiplier(latest_exhibition_year: Option<i32>, current_year: i32) -> f64 {
    recency_tenths(latest_exhibition_year, current_year) as f64 / 10.0
}

fn recency_tenths(latest_exhibition_year: Option<i32>, current_year: i32) -> i64 {
    let Some(latest) = latest_exhibition_year else {
        return RECENCY_FULL_TENTHS;
    };
    let years_since = i64::from(current_year) - i64::from(latest);
    if years_since <= RECENCY_GRACE_YEARS {
        return RECENCY_FULL_TENTHS;
    }
    let years_past_grace = years_since - RECENCY_GRACE_YEARS;
    (RECENCY_FULL_TENTHS - years_past_grace).max(RECENCY_FLOOR_TENTHS)
}

pub fn artist_score(facts: &ArtistFacts, current_year: i32) -> u8 {
    let solo = non_negative_count("artist.solo_exhibitions", facts.solo_exhibitions);
    let group = non_negative_count("artist.group_exhibitions", facts.group_exhibitions);
    let awards = non_negative_count("artist.awards", facts.awards);

    let exhibition_score = solo * SOLO_EXHIBITION_POINTS + group * GROUP_EXHIBITION_POINTS;
    let tenths = recency_tenths(facts.latest_exhibition_year, current_year);
    let award_score = awards * AWARD_POINTS;

    to_score(exhibition_score * tenths as f64 / 10.0 + award_score)
}

pub fn artwork_score(ratings: &ArtworkRatings) -> u8 {
    mean_rating("artwork", ratings.as_array())
}

/// Exact sum of the held certificates; always one of 0, 20, 40, 60, 80, 100.
pub fn certification_score(facts: &CertificationFacts) -> u8 {
    let mut score = 0;
    if facts.blockchain_hash {
        score += BLOCKCHAIN_HASH_POINTS;
    }
    if facts.copyright {
        score += COPYRIGHT_POINTS;
    }
    if facts.license {
        score += LICENSE_POINTS;
    }
    score
}

pub fn expert_score(ratings: &ExpertRatings) -> u8 {
    mean_rating("expert", ratings.as_array())
}

pub fn popularity_score(facts: &PopularityFacts) -> u8 {
    let channels = [
        saturate("popularity.video_views", facts.video_views, VIDEO_VIEWS_DIVISOR),
        saturate(
            "popularity.social_engagement",
            facts.social_engagement,
            SOCIAL_ENGAGEMENT_DIVISOR,
        ),
        saturate(
            "popularity.platform_activity",
            facts.platform_activity,
            PLATFORM_ACTIVITY_DIVISOR,
        ),
        clamp_rating("popularity.trend_index", facts.trend_index),
        (non_negative("popularity.media_mentions", facts.media_mentions) * MEDIA_MENTION_POINTS)
            .min(100.0),
    ];
    to_score(channels.iter().sum::<f64>() / channels.len() as f64)
}

/// Clamp to [0, 100] and round half up. NaN maps to 0.
fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}

fn mean_rating(group: &str, ratings: [f64; 4]) -> u8 {
    let sum: f64 = ratings.iter().map(|&r| clamp_rating(group, r)).sum();
    to_score(sum / ratings.len() as f64)
}

fn clamp_rating(field: &str, value: f64) -> f64 {
    if value.is_nan() {
        tracing::debug!(field, "rating is NaN, treating as 0");
        return 0.0;
    }
    let clamped = value.clamp(0.0, 100.0);
    if clamped != value {
        tracing::debug!(field, value, "rating outside 0..=100, clamped");
    }
    clamped
}

fn non_negative(field: &str, value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        tracing::debug!(field, value, "negative counter, treating as 0");
        0.0
    } else {
        value
    }
}

fn non_negative_count(field: &str, value: i64) -> f64 {
    if value < 0 {
        tracing::debug!(field, value, "negative count, treating as 0");
        0.0
    } else {
        value as f64
    }
}

fn saturate(field: &str, value: f64, divisor: f64) -> f64 {
    (non_negative(field, value) / divisor).min(100.0)
}
