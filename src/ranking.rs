//! Read-only store of pre-computed habitability rankings, loaded once
//! from CSV at startup and shared across all request handlers.

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::models::RankingEntry;

/// Largest slice a single /rank request may return.
pub const MAX_TOP: usize = 100;

#[derive(Debug, Deserialize)]
struct RankingRow {
    planet_name: String,
    habitability_probability: f64,
    #[serde(deserialize_with = "de_flexible_bool")]
    predicted_habitable: bool,
    #[serde(default)]
    discovery_year: Option<i32>,
}

// The ranking CSV comes out of an offline pandas job, which writes
// booleans as "True"/"False".
fn de_flexible_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(d)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean value: {other}"
        ))),
    }
}

#[derive(Debug)]
pub struct RankingStore {
    entries: Vec<RankingEntry>,
}

impl RankingStore {
    /// Load the ranking table, sort by probability descending (stable
    /// on ties) and assign 1-based ranks.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = reader
            .deserialize::<RankingRow>()
            .collect::<Result<Vec<_>, _>>()?;
        rows.sort_by(|a, b| {
            b.habitability_probability
                .partial_cmp(&a.habitability_probability)
                .unwrap_or(Ordering::Equal)
        });
        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| RankingEntry {
                rank: i + 1,
                planet_name: row.planet_name,
                habitability_probability: row.habitability_probability,
                predicted_habitable: row.predicted_habitable,
                disc_year: row.discovery_year,
            })
            .collect();
        Ok(RankingStore { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` highest-ranked entries with probability >= `threshold`.
    /// `n` is clamped to [1, MAX_TOP]; an empty result is not an error.
    pub fn top(&self, n: usize, threshold: f64) -> Vec<RankingEntry> {
        let n = n.clamp(1, MAX_TOP);
        self.entries
            .iter()
            .filter(|e| e.habitability_probability >= threshold)
            .take(n)
            .cloned()
            .collect()
    }

    /// Share of stored probabilities strictly above `probability`, used
    /// to place a live prediction within the ranked distribution.
    pub fn fraction_above(&self, probability: f64) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let above = self
            .entries
            .iter()
            .filter(|e| e.habitability_probability > probability)
            .count();
        Some(above as f64 / self.entries.len() as f64)
    }
}
