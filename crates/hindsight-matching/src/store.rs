//! In-memory span store owned by the matcher.

use rustc_hash::FxHashMap;

use hindsight_core::span::Span;

/// A span plus its cached embedding, computed once at insertion.
#[derive(Debug, Clone)]
pub(crate) struct StoredSpan {
    pub span: Span,
    pub embedding: Vec<f32>,
}

/// Id-keyed span storage that remembers insertion order, so candidate
/// fallback scans are reproducible.
#[derive(Debug, Default)]
pub(crate) struct SpanStore {
    spans: FxHashMap<String, StoredSpan>,
    order: Vec<String>,
}

impl SpanStore {
    pub fn insert(&mut self, span: Span, embedding: Vec<f32>) {
        let id = span.id.clone();
        if self
            .spans
            .insert(id.clone(), StoredSpan { span, embedding })
            .is_none()
        {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&StoredSpan> {
        self.spans.get(id)
    }

    pub fn ids_in_order(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }
}
