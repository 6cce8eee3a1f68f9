use serde::{Deserialize, Serialize};

/// Span lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}
