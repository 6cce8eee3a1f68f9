/// Index subsystem errors (graph, cluster, inverted).
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("dimension mismatch: index holds {expected}-dimensional vectors, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
