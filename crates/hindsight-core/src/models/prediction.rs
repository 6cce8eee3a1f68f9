use serde::{Deserialize, Serialize};

use super::search_plan::SearchPlan;

/// How a prediction was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Synthesized from retrieved trajectories — the engine's success label.
    TrajectoryMatching,
    /// Reserved for hosts that re-label merged multi-source answers.
    Synthesis,
    /// Reserved for hosts that route to an external fallback.
    Fallback,
    /// The engine could not produce a confident answer.
    LowConfidence,
}

/// A scored span surfaced alongside a prediction for explainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    /// Span id this evidence came from.
    pub id: String,
    /// Cosine similarity to the query embedding.
    pub score: f64,
    /// The outcome text (or span text) the evidence contributes.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// The engine's answer to a query: an output string, a calibratable
/// confidence in [0, 100], and the evidence trail behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub output: String,
    /// Confidence in [0.0, 100.0].
    pub confidence: f64,
    /// Number of evidence trajectories backing the output.
    pub trajectories_used: usize,
    pub method: MatchMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<Evidence>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<SearchPlan>,
}

impl Prediction {
    /// A degraded result the host can route to fallback. Never an error.
    pub fn low_confidence(output: impl Into<String>, confidence: f64) -> Self {
        Self {
            output: output.into(),
            confidence,
            trajectories_used: 0,
            method: MatchMethod::LowConfidence,
            evidence: None,
            plan: None,
        }
    }
}
