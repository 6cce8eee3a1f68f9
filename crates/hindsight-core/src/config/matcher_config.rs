use serde::{Deserialize, Serialize};

use super::defaults;

/// Matcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Plans requesting fewer than this many candidates short-circuit.
    pub min_top_k: usize,
    /// Minimum cosine similarity for a candidate to count as evidence.
    pub min_score: f64,
    /// Predictions below this confidence are labelled low-confidence.
    pub min_confidence: f64,
    /// Embedding dimensionality.
    pub embedding_dim: usize,
    /// Candidates kept when the plan does not say otherwise.
    pub default_top_k: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_top_k: defaults::DEFAULT_MIN_TOP_K,
            min_score: defaults::DEFAULT_MIN_SCORE,
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
            embedding_dim: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            default_top_k: defaults::DEFAULT_TOP_K,
        }
    }
}
