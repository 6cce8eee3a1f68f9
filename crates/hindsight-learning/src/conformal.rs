//! Split-conformal uncertainty: a conservative quantile over held-out
//! nonconformity scores yields distribution-free prediction intervals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hindsight_core::errors::{CalibrationError, HindsightResult};

/// Symmetric prediction interval with its nominal coverage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInterval {
    pub lower: f64,
    pub upper: f64,
    /// Nominal coverage 1 − α.
    pub coverage: f64,
}

/// Conformal quantile over calibration scores.
///
/// Sorts ascending and picks index ⌈(n+1)(1−α)⌉ − 1, clamped into range —
/// the ceiling makes the quantile conservative, so empirical coverage is at
/// least 1 − α in expectation. Always returns an element of `scores`.
pub fn calibrate(scores: &[f64], alpha: f64) -> HindsightResult<f64> {
    if scores.is_empty() {
        return Err(CalibrationError::EmptyScores.into());
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(CalibrationError::InvalidAlpha { alpha }.into());
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let rank = ((n + 1.0) * (1.0 - alpha)).ceil() as usize;
    let idx = rank.saturating_sub(1).min(sorted.len() - 1);
    Ok(sorted[idx])
}

/// Symmetric interval around a point prediction.
pub fn interval(prediction: f64, quantile: f64, alpha: f64) -> PredictionInterval {
    PredictionInterval {
        lower: prediction - quantile,
        upper: prediction + quantile,
        coverage: 1.0 - alpha,
    }
}

/// Conformal prediction set: every label whose nonconformity score is at
/// or below the calibrated quantile.
pub fn prediction_set(
    label_scores: &BTreeMap<String, f64>,
    calibration_scores: &[f64],
    alpha: f64,
) -> HindsightResult<Vec<String>> {
    let quantile = calibrate(calibration_scores, alpha)?;
    Ok(label_scores
        .iter()
        .filter(|(_, &score)| score <= quantile)
        .map(|(label, _)| label.clone())
        .collect())
}
