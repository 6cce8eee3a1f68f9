pub mod embedding;
pub mod quality_index;
pub mod temporal_index;
pub mod vector_index;

pub use embedding::IEmbeddingProvider;
pub use quality_index::IQualityIndex;
pub use temporal_index::ITemporalIndex;
pub use vector_index::{IVectorIndex, Neighbor};
