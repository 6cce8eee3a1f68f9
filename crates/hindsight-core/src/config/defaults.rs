// Single source of truth for all default values.

// --- Matcher ---
pub const DEFAULT_MIN_TOP_K: usize = 3;
pub const DEFAULT_MIN_SCORE: f64 = 0.3;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 20.0;
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_MIN_QUALITY: f64 = 60.0;

// --- Graph index ---
pub const DEFAULT_GRAPH_M: usize = 16;
pub const DEFAULT_EF_CONSTRUCTION: usize = 200;
pub const DEFAULT_EF_SEARCH: usize = 50;
pub const DEFAULT_GRAPH_SEED: u64 = 0x4853_5741; // "HSWA"

// --- Cluster index ---
pub const DEFAULT_N_CLUSTERS: usize = 16;
pub const DEFAULT_N_PROBE: usize = 10;
pub const DEFAULT_KMEANS_MAX_ITER: usize = 20;
pub const DEFAULT_CLUSTER_SEED: u64 = 0x4956_4621; // "IVF!"
