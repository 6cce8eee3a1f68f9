pub mod base;
pub mod quality;
pub mod status;

pub use base::{Span, SpanContext, SpanMetadata};
pub use quality::Quality;
pub use status::SpanStatus;
