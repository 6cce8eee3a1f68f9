//! # hindsight-index
//!
//! The retrieval indices behind the trajectory matcher:
//!
//! - [`GraphIndex`] — layered proximity graph (HNSW) for dynamic insert and
//!   approximate k-NN search under cosine distance.
//! - [`ClusterIndex`] — k-means++ clustered inverted-file (IVF) index for
//!   coarse-to-fine search.
//! - [`InvertedIndex`] — multi-field categorical postings with exact, fuzzy,
//!   AND, and OR filtering.
//! - [`TemporalIndex`] / [`QualityIndex`] — timestamp-range and
//!   quality-threshold lookups consumed by the matcher's plan filters.
//!
//! All state is in-memory; none of the indices perform I/O.

pub mod cluster;
pub mod graph;
pub mod inverted;
mod metric;
pub mod quality;
pub mod temporal;

pub use cluster::ClusterIndex;
pub use graph::{GraphIndex, GraphStats};
pub use inverted::InvertedIndex;
pub use quality::QualityIndex;
pub use temporal::TemporalIndex;
