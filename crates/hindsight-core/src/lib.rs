//! # hindsight-core
//!
//! Shared foundation for the hindsight trajectory-matching engine: the span
//! data model, prediction shapes, subsystem errors, configuration, and the
//! capability traits the matcher uses to talk to its collaborators.
//!
//! Leaf crates (`hindsight-embeddings`, `hindsight-index`,
//! `hindsight-learning`, `hindsight-matching`) depend on this crate and
//! nothing else in the workspace.

pub mod config;
pub mod errors;
pub mod models;
pub mod span;
pub mod traits;

pub use errors::{HindsightError, HindsightResult};
pub use models::{Evidence, MatchMethod, Prediction, SearchPlan, TimeRange};
pub use span::{Quality, Span, SpanContext, SpanMetadata, SpanStatus};
