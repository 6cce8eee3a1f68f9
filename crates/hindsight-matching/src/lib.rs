//! # hindsight-matching
//!
//! The query engine. A [`Matcher`] answers (context, action) queries by
//! embedding the query, gathering candidates from an attached vector index,
//! intersecting them through the inverted / temporal / quality filters,
//! scoring survivors by cosine similarity, and synthesizing an output with a
//! confidence score and an evidence trail.
//!
//! ## Pipeline
//!
//! ```text
//! Matcher (predict)
//! ├── Embed          query text → unit vector
//! ├── Gather         vector index (3 × topK over-fetch) | span store
//! ├── Filter         fuzzy action → plan filters → time range → quality
//! ├── Score          cosine against span embeddings, minScore floor
//! ├── Synthesize     top-score | mode-of-contents
//! └── Score result   avg / volume / agreement → confidence [0, 100]
//! ```
//!
//! Degraded queries short-circuit into `low_confidence` predictions rather
//! than errors, so hosts can route them to a fallback.

pub mod engine;
mod store;
mod synthesis;

pub use engine::{IndexSet, Matcher};
