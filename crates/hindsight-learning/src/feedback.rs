//! Prediction outcome tracking: observed results accumulate into a score /
//! label log the host can refit the calibrator from.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::platt::PlattModel;

/// Outcome of a prediction that was surfaced to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionOutcome {
    /// The prediction turned out correct.
    Confirmed,
    /// The prediction turned out wrong.
    Refuted,
}

/// Accumulated (raw score, label) pairs from observed prediction outcomes.
///
/// Scores are recorded on the raw [0, 1] similarity scale the matcher uses
/// before confidence scaling, so a fitted model plugs straight into
/// [`crate::calibrate_confidence`].
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct OutcomeLog {
    scores: Vec<f64>,
    labels: Vec<f64>,
}

impl OutcomeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed outcome for a prediction with the given raw score.
    pub fn record(&mut self, raw_score: f64, outcome: PredictionOutcome) {
        self.scores.push(raw_score);
        self.labels.push(match outcome {
            PredictionOutcome::Confirmed => 1.0,
            PredictionOutcome::Refuted => 0.0,
        });
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Fit a Platt model from everything recorded so far. With one-class or
    /// empty data this falls back to the default model, same as the fit
    /// itself.
    pub fn fit_calibrator(&self) -> PlattModel {
        let model = PlattModel::fit(&self.scores, &self.labels);
        debug!(
            samples = self.scores.len(),
            a = model.a,
            b = model.b,
            "calibrator refit from outcome log"
        );
        model
    }

    /// Raw scores recorded so far — usable as a conformal calibration set.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }
}
