use serde::{Deserialize, Serialize};

use crate::errors::HindsightResult;

/// A single approximate-nearest-neighbor hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: String,
    /// Cosine distance (1 − similarity), ascending in result lists.
    pub distance: f32,
    /// Cosine similarity to the query.
    pub similarity: f32,
}

/// Approximate-nearest-neighbor index over span embeddings.
///
/// Implemented by both the graph (HNSW) and cluster (IVF) indices so the
/// matcher stays agnostic to which one it was handed.
pub trait IVectorIndex: Send + Sync {
    /// Insert a vector under the given id.
    fn insert(&mut self, id: &str, vector: &[f32]) -> HindsightResult<()>;

    /// Return up to `k` nearest neighbors, distance-ascending.
    /// An empty index yields an empty result, not an error.
    fn search(&self, query: &[f32], k: usize) -> HindsightResult<Vec<Neighbor>>;

    /// Number of vectors currently indexed.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
