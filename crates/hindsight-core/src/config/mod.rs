pub mod defaults;

mod cluster_config;
mod graph_config;
mod matcher_config;

pub use cluster_config::ClusterIndexConfig;
pub use graph_config::GraphIndexConfig;
pub use matcher_config::MatcherConfig;

use serde::{Deserialize, Serialize};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HindsightConfig {
    pub matcher: MatcherConfig,
    pub graph: GraphIndexConfig,
    pub cluster: ClusterIndexConfig,
}
