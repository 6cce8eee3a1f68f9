//! Platt scaling: logistic calibration from raw scores to probabilities.

use serde::{Deserialize, Serialize};

/// Gradient-descent learning rate.
const LEARNING_RATE: f64 = 0.01;
/// Iteration cap for the fit.
const MAX_ITERATIONS: usize = 100;
/// Stop once |Δa| + |Δb| falls below this.
const CONVERGENCE_EPS: f64 = 1e-6;

/// Logistic calibration model: P(y=1 | s) = 1 / (1 + exp(a·s + b)).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlattModel {
    pub a: f64,
    pub b: f64,
}

impl Default for PlattModel {
    /// The uncalibrated identity-ish starting point: higher score, higher
    /// probability.
    fn default() -> Self {
        Self { a: -1.0, b: 0.0 }
    }
}

impl PlattModel {
    /// Apply the model to a raw score. Output is always in (0, 1).
    pub fn apply(&self, score: f64) -> f64 {
        1.0 / (1.0 + (self.a * score + self.b).exp())
    }

    /// Fit from scores and binary-ish labels (label >= 0.5 counts positive).
    ///
    /// One-class or empty input returns the default model rather than
    /// failing. Targets are smoothed per Platt's original prescription.
    pub fn fit(scores: &[f64], labels: &[f64]) -> Self {
        let n = scores.len().min(labels.len());
        let scores = &scores[..n];
        let labels = &labels[..n];

        let positives = labels.iter().filter(|&&l| l >= 0.5).count();
        let negatives = n - positives;
        if positives == 0 || negatives == 0 {
            return Self::default();
        }

        let target_pos = (positives as f64 + 1.0) / (positives as f64 + 2.0);
        let target_neg = 1.0 / (negatives as f64 + 2.0);

        let mut model = Self::default();
        for _ in 0..MAX_ITERATIONS {
            let mut grad_a = 0.0;
            let mut grad_b = 0.0;
            for (&s, &l) in scores.iter().zip(labels) {
                let predicted = model.apply(s);
                let target = if l >= 0.5 { target_pos } else { target_neg };
                grad_a += (predicted - target) * s;
                grad_b += predicted - target;
            }

            let next_a = model.a - LEARNING_RATE * grad_a;
            let next_b = model.b - LEARNING_RATE * grad_b;
            let delta = (next_a - model.a).abs() + (next_b - model.b).abs();
            model.a = next_a;
            model.b = next_b;
            if delta < CONVERGENCE_EPS {
                break;
            }
        }
        model
    }
}

/// Map a raw confidence to [0, 100], through the model when one is present.
pub fn calibrate_confidence(raw: f64, model: Option<&PlattModel>) -> f64 {
    match model {
        Some(m) => m.apply(raw) * 100.0,
        None => raw.clamp(0.0, 100.0),
    }
}
