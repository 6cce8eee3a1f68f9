use serde::{Deserialize, Serialize};

use super::defaults;

/// Graph (layered proximity) index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphIndexConfig {
    /// Per-node neighbor cap per layer (layer 0 allows 2M).
    pub m: usize,
    /// Beam width during insertion.
    pub ef_construction: usize,
    /// Beam width during search.
    pub ef_search: usize,
    /// Seed for the level-assignment RNG. Fixed so builds are reproducible.
    pub seed: u64,
}

impl Default for GraphIndexConfig {
    fn default() -> Self {
        Self {
            m: defaults::DEFAULT_GRAPH_M,
            ef_construction: defaults::DEFAULT_EF_CONSTRUCTION,
            ef_search: defaults::DEFAULT_EF_SEARCH,
            seed: defaults::DEFAULT_GRAPH_SEED,
        }
    }
}
