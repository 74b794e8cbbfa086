//! Turns a raw model probability into the shaped habitability verdict:
//! category band, confidence wording and observation recommendation.

use crate::models::{Confidence, HabitabilityResult, Prediction, Recommendation};
use crate::ranking::RankingStore;

/// Probability at or above which a planet is called habitable.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Category band edges. Together with 0.0 and 1.0 these partition the
/// probability range: Low [0, 0.4), Moderate [0.4, 0.7), High [0.7, 1].
pub const HIGH_PRIORITY_MIN: f64 = 0.7;
pub const MODERATE_PRIORITY_MIN: f64 = 0.4;

/// Confidence level edges on the distance |p - 0.5|.
const HIGH_CONFIDENCE_DISTANCE: f64 = 0.3;
const MODERATE_CONFIDENCE_DISTANCE: f64 = 0.15;

pub fn category(probability: f64) -> &'static str {
    if probability >= HIGH_PRIORITY_MIN {
        "High Priority"
    } else if probability >= MODERATE_PRIORITY_MIN {
        "Moderate Priority"
    } else {
        "Low Priority"
    }
}

pub fn confidence(probability: f64) -> Confidence {
    let distance = (probability - DECISION_THRESHOLD).abs();
    let level = if distance >= HIGH_CONFIDENCE_DISTANCE {
        "high"
    } else if distance >= MODERATE_CONFIDENCE_DISTANCE {
        "moderate"
    } else {
        "low"
    };
    let verdict = if probability >= DECISION_THRESHOLD {
        "habitable"
    } else {
        "not habitable"
    };
    Confidence {
        level,
        explanation: format!(
            "Model is {:.1}% confident this planet is {verdict}",
            distance * 2.0 * 100.0
        ),
    }
}

/// Percentile bucket for the share of ranked candidates scoring above
/// this probability.
pub fn priority_rank(fraction_above: f64) -> &'static str {
    if fraction_above < 0.01 {
        "Top 1%"
    } else if fraction_above < 0.05 {
        "Top 5%"
    } else if fraction_above < 0.10 {
        "Top 10%"
    } else if fraction_above < 0.25 {
        "Top 25%"
    } else if fraction_above < 0.50 {
        "Top 50%"
    } else {
        "Bottom 50%"
    }
}

/// Pure shaping function: same probability and same ranking snapshot
/// always yield the same result.
pub fn compose(
    planet_name: &str,
    probability: f64,
    ranking: Option<&RankingStore>,
) -> HabitabilityResult {
    let habitable = probability >= DECISION_THRESHOLD;
    HabitabilityResult {
        status: "success",
        planet_name: planet_name.to_string(),
        prediction: Prediction {
            habitable,
            probability: round4(probability),
            score: round2(probability * 100.0),
            category: category(probability),
        },
        confidence: confidence(probability),
        recommendation: Recommendation {
            observe: habitable,
            priority_rank: ranking
                .and_then(|r| r.fraction_above(probability))
                .map(priority_rank),
        },
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}
