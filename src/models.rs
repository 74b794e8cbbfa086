use serde::{Deserialize, Serialize};

/// Host star spectral class. Anything outside F/G/K/M falls into the
/// `Other` bucket so encoding stays total over arbitrary catalogue input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpectralType {
    F,
    G,
    K,
    M,
    Other,
}

impl SpectralType {
    /// Case-insensitive parse with `Other` as the catch-all.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "F" => SpectralType::F,
            "G" => SpectralType::G,
            "K" => SpectralType::K,
            "M" => SpectralType::M,
            _ => SpectralType::Other,
        }
    }

    pub fn one_hot_index(self) -> usize {
        match self {
            SpectralType::F => 0,
            SpectralType::G => 1,
            SpectralType::K => 2,
            SpectralType::M => 3,
            SpectralType::Other => 4,
        }
    }
}

/// Planet size class. No catch-all bucket exists in the trained schema,
/// so an unknown value is a validation error rather than a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetType {
    Rocky,
    SuperEarth,
    Neptune,
    Jupiter,
}

impl PlanetType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rocky" => Some(PlanetType::Rocky),
            "super_earth" => Some(PlanetType::SuperEarth),
            "neptune" => Some(PlanetType::Neptune),
            "jupiter" => Some(PlanetType::Jupiter),
            _ => None,
        }
    }

    pub fn one_hot_index(self) -> usize {
        match self {
            PlanetType::Rocky => 0,
            PlanetType::SuperEarth => 1,
            PlanetType::Neptune => 2,
            PlanetType::Jupiter => 3,
        }
    }
}

/// A fully validated observation, every numeric field already
/// range-checked against the physical bounds table.
#[derive(Debug, Clone)]
pub struct PlanetObservation {
    pub planet_name: String,
    pub pl_orbper: f64,
    pub pl_orbsmax: f64,
    pub pl_bmasse: f64,
    pub st_met: f64,
    pub st_logg: f64,
    pub disc_year: i64,
    pub st_type: SpectralType,
    pub pl_type: PlanetType,
}

#[derive(Debug, Serialize)]
pub struct Prediction {
    pub habitable: bool,
    pub probability: f64,
    /// probability expressed on a 0-100 scale
    pub score: f64,
    pub category: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Confidence {
    pub level: &'static str,
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct Recommendation {
    pub observe: bool,
    /// Percentile bucket against the pre-computed ranking distribution,
    /// absent when the ranking table is not loaded.
    pub priority_rank: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HabitabilityResult {
    pub status: &'static str,
    pub planet_name: String,
    pub prediction: Prediction,
    pub confidence: Confidence,
    pub recommendation: Recommendation,
}

/// One row of the pre-computed ranking, rank assigned after sorting.
#[derive(Debug, Clone, Serialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub planet_name: String,
    pub habitability_probability: f64,
    pub predicted_habitable: bool,
    pub disc_year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub planets: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct BatchFailure {
    pub status: &'static str,
    pub planet_name: String,
    pub error: String,
}

/// Per-item batch outcome, positionally matching the input sequence.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Success(HabitabilityResult),
    Failure(BatchFailure),
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub status: &'static str,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<BatchItem>,
}
