//! Brier score: squared error between a stated probability and the realized
//! binary outcome. Lower is better calibrated.

/// Lowest confidence a prediction may carry. 0.0 is excluded so the score
/// never degenerates to a certainty claim.
pub const MIN_CONFIDENCE: f64 = 0.01;
/// Highest confidence a prediction may carry.
pub const MAX_CONFIDENCE: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("probability must be within [0.01, 0.99], got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("outcome must be 0 or 1, got {0}")]
    OutcomeOutOfRange(i64),
}

/// Compute the Brier score `(p - o)^2` for probability `p` and outcome `o`.
///
/// Inputs are a programming contract, not user input: callers hand in already
/// validated records, so an error here is a defect upstream.
pub fn brier_score(p: f64, o: i64) -> Result<f64, ScoringError> {
    if !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&p) {
        return Err(ScoringError::ProbabilityOutOfRange(p));
    }

    if o != 0 && o != 1 {
        return Err(ScoringError::OutcomeOutOfRange(o));
    }

    let diff = p - o as f64;
    Ok(diff * diff)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
