use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Inclusive time range in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn contains(&self, ts_ms: i64) -> bool {
        ts_ms >= self.start && ts_ms <= self.end
    }
}

/// Per-query retrieval controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPlan {
    /// How many candidates to keep after ranking.
    pub top_k: usize,
    /// Minimum span quality to admit as evidence.
    pub min_quality: f64,
    /// Restrict candidates to spans recorded in this range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    /// Extra exact-match field filters (field → value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, String>>,
}

impl Default for SearchPlan {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            min_quality: defaults::DEFAULT_MIN_QUALITY,
            time_range: None,
            filters: None,
        }
    }
}
