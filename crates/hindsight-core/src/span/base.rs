use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::quality::Quality;
use super::status::SpanStatus;

/// A recorded past event: who did what, in which context, with what outcome.
///
/// Spans are the evidence base of the engine. Once inserted into a matcher
/// they are treated as immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// Unique span identifier.
    pub id: String,
    /// Actor that performed the action.
    pub who: String,
    /// The action performed.
    pub did: String,
    /// The object the action was performed on.
    pub this: String,
    /// Outcome on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_ok: Option<String>,
    /// Outcome on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_not: Option<String>,
    /// Confirmation requirement, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<String>,
    /// Environment the span ran in.
    #[serde(default)]
    pub context: SpanContext,
    /// Provenance and quality.
    #[serde(default)]
    pub metadata: SpanMetadata,
    /// Lifecycle status.
    #[serde(default)]
    pub status: SpanStatus,
}

impl Span {
    /// The text embedded for similarity search: `who did this if_ok
    /// environment`, single-space joined, absent fields omitted.
    pub fn text(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.who, &self.did, &self.this];
        if let Some(ok) = &self.if_ok {
            parts.push(ok);
        }
        if let Some(env) = &self.context.environment {
            parts.push(env);
        }
        parts.join(" ")
    }

    /// The evidence content surfaced for this span: success outcome,
    /// else failure outcome, else the span text.
    pub fn outcome_text(&self) -> String {
        self.if_ok
            .clone()
            .or_else(|| self.if_not.clone())
            .unwrap_or_else(|| self.text())
    }
}

/// Context a span (or an incoming query) ran in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stakes: Option<String>,
    /// Ids or action strings of preceding spans.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previous: Vec<String>,
}

/// Span provenance: quality score, wall-clock timestamp, provider fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanMetadata {
    /// Quality score in [0, 100].
    #[serde(default)]
    pub quality: Quality,
    /// When the span was recorded.
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl SpanMetadata {
    /// Timestamp as epoch milliseconds (the temporal index key).
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

impl Default for SpanMetadata {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            provider: None,
            model: None,
        }
    }
}
