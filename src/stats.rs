//! Leaderboard aggregation: a full recompute over the record set on every
//! request. Nothing here is cached or maintained incrementally.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Prediction, PredictionState};
use crate::scoring::{self, ScoringError};

#[derive(Debug, Serialize)]
pub struct LeaderboardStats {
    pub total_predictions: i64,
    pub resolved_predictions: i64,
    pub average_brier_score: Option<f64>,
    pub accuracy_rate: Option<f64>,
    pub categories: HashMap<String, i64>,
}

/// Compute leaderboard statistics over all predictions.
///
/// A `ScoringError` here means a stored record carries out-of-contract
/// values, which the write path is supposed to make impossible.
pub fn compute_leaderboard(predictions: &[Prediction]) -> Result<LeaderboardStats, ScoringError> {
    let total_predictions = predictions.len() as i64;

    let mut categories: HashMap<String, i64> = HashMap::new();
    for prediction in predictions {
        *categories.entry(prediction.category.clone()).or_insert(0) += 1;
    }

    let mut resolved_predictions = 0i64;
    let mut brier_sum = 0.0;
    let mut correct = 0i64;

    for prediction in predictions {
        if let PredictionState::Resolved { outcome } = prediction.state {
            resolved_predictions += 1;
            brier_sum += scoring::brier_score(prediction.confidence, outcome)?;
            if is_correct(prediction.confidence, outcome) {
                correct += 1;
            }
        }
    }

    let (average_brier_score, accuracy_rate) = if resolved_predictions > 0 {
        (
            Some(brier_sum / resolved_predictions as f64),
            Some(correct as f64 / resolved_predictions as f64),
        )
    } else {
        (None, None)
    };

    Ok(LeaderboardStats {
        total_predictions,
        resolved_predictions,
        average_brier_score,
        accuracy_rate,
        categories,
    })
}

/// A prediction counts as correct when its confidence made a directional call
/// that matched the outcome. Exactly 0.5 is no call and never correct.
fn is_correct(confidence: f64, outcome: i64) -> bool {
    (confidence > 0.5 && outcome == 1) || (confidence < 0.5 && outcome == 0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
