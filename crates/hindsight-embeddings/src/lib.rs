//! # hindsight-embeddings
//!
//! Deterministic text embedding for the trajectory-matching engine.
//!
//! The embedder maps text to a fixed-dimension unit vector with the hashing
//! trick: tokens are hashed into buckets through three signed hash streams
//! and weighted by term frequency. No model files, no network — the same
//! input always produces the same bytes, on every platform.

pub mod hashing;
pub mod transport;
pub mod vector;

pub use hashing::HashingEmbedder;
pub use transport::{from_base64, to_base64};
pub use vector::{cosine, euclidean_sq, l2_norm, normalize};
