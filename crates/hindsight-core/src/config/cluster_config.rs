use serde::{Deserialize, Serialize};

use super::defaults;

/// Cluster (inverted-file) index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterIndexConfig {
    /// Target cluster count; capped at the vector count during build.
    pub n_clusters: usize,
    /// Nearest clusters scanned per search.
    pub n_probe: usize,
    /// Lloyd iteration cap.
    pub max_iter: usize,
    /// Seed for k-means++ sampling. Fixed so builds are reproducible.
    pub seed: u64,
}

impl Default for ClusterIndexConfig {
    fn default() -> Self {
        Self {
            n_clusters: defaults::DEFAULT_N_CLUSTERS,
            n_probe: defaults::DEFAULT_N_PROBE,
            max_iter: defaults::DEFAULT_KMEANS_MAX_ITER,
            seed: defaults::DEFAULT_CLUSTER_SEED,
        }
    }
}
