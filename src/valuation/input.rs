use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Raw facts about one artwork and its artist.
///
/// Every group defaults to zero/false so a partially filled document still
/// parses. Nothing here is validated on load; the calculators clamp noisy
/// values instead.
///
/// Example YAML:
/// ```yaml
/// title: "Moonlit Harbor"
/// artist:
///   solo_exhibitions: 3
///   group_exhibitions: 5
///   awards: 1
///   latest_exhibition_year: 2026
/// artwork: { depth: 80, expression: 75, originality: 90, collection_value: 60 }
/// certification: { blockchain_hash: true, copyright: true, license: false }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValuationInput {
    /// Optional identifier assigned by the host application
    #[serde(default)]
    pub id: Option<String>,

    /// Display title of the artwork
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub artist: ArtistFacts,

    #[serde(default)]
    pub artwork: ArtworkRatings,

    #[serde(default)]
    pub certification: CertificationFacts,

    #[serde(default)]
    pub expert: ExpertRatings,

    #[serde(default)]
    pub popularity: PopularityFacts,
}

impl ValuationInput {
    /// Title for display, falling back to the id and then a placeholder
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("(untitled)")
    }
}

/// Artist achievement record.
///
/// Counts are signed so that negative values coming from upstream data entry
/// can be clamped to zero instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ArtistFacts {
    pub solo_exhibitions: i64,
    pub group_exhibitions: i64,
    pub awards: i64,
    /// Year of the most recent exhibition, if the artist has exhibited
    pub latest_exhibition_year: Option<i32>,
}

/// Four content ratings, each on [0, 100].
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ArtworkRatings {
    pub depth: f64,
    pub expression: f64,
    pub originality: f64,
    pub collection_value: f64,
}

impl ArtworkRatings {
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.depth,
            self.expression,
            self.originality,
            self.collection_value,
        ]
    }
}

/// Provenance and rights paperwork attached to the artwork.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct CertificationFacts {
    pub blockchain_hash: bool,
    pub copyright: bool,
    pub license: bool,
}

/// Four expert panel ratings, each on [0, 100].
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ExpertRatings {
    pub technique: f64,
    pub art_historical: f64,
    pub marketability: f64,
    pub development_potential: f64,
}

impl ExpertRatings {
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.technique,
            self.art_historical,
            self.marketability,
            self.development_potential,
        ]
    }
}

/// Engagement counters from the five tracked channels.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct PopularityFacts {
    pub video_views: f64,
    pub social_engagement: f64,
    pub platform_activity: f64,
    /// Trend index, already on [0, 100]
    pub trend_index: f64,
    pub media_mentions: f64,
}

/// A document listing several artworks for batch evaluation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArtworkBatch {
    pub artworks: Vec<ValuationInput>,
}

/// Serialization format of an artwork document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

/// Parse an artwork document: either a batch (`artworks: [...]`) or a
/// single artwork at the top level.
///
/// The shape is decided from the top-level keys before the typed parse, so
/// errors point at the offending field inside the chosen shape.
pub fn parse_artworks(content: &str, format: DocumentFormat) -> Result<Vec<ValuationInput>> {
    let shape: serde_json::Value = match format {
        DocumentFormat::Json => serde_json::from_str(content).context("Invalid JSON")?,
        DocumentFormat::Yaml => serde_saphyr::from_str(content).context("Invalid YAML")?,
    };
    let is_batch = shape.get("artworks").is_some();

    if is_batch {
        let batch: ArtworkBatch = match format {
            DocumentFormat::Json => serde_json::from_str(content).map_err(anyhow::Error::from),
            DocumentFormat::Yaml => serde_saphyr::from_str(content).map_err(anyhow::Error::from),
        }
        .context("Failed to parse artwork batch")?;
        Ok(batch.artworks)
    } else {
        let single: ValuationInput = match format {
            DocumentFormat::Json => serde_json::from_str(content).map_err(anyhow::Error::from),
            DocumentFormat::Yaml => serde_saphyr::from_str(content).map_err(anyhow::Error::from),
        }
        .context("Failed to parse artwork")?;
        Ok(vec![single])
    }
}
