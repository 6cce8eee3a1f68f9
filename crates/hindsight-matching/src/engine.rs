//! The matcher: orchestrates embed → gather → filter → rank → synthesize.

use rustc_hash::FxHashSet;
use tracing::debug;

use hindsight_core::config::MatcherConfig;
use hindsight_core::errors::HindsightResult;
use hindsight_core::models::{Evidence, MatchMethod, Prediction, SearchPlan};
use hindsight_core::span::{Span, SpanContext};
use hindsight_core::traits::{IEmbeddingProvider, IQualityIndex, ITemporalIndex, IVectorIndex};

use hindsight_embeddings::{cosine, HashingEmbedder};
use hindsight_index::InvertedIndex;

use crate::store::SpanStore;
use crate::synthesis::{score_confidence, synthesize_output};

/// Over-fetch multiplier for the vector-index candidate pool.
const CANDIDATE_FACTOR: usize = 3;

/// Short-circuit confidences for degraded queries.
const CONF_PLAN_TOO_NARROW: f64 = 10.0;
const CONF_NO_CANDIDATES: f64 = 5.0;
const CONF_NO_EVIDENCE: f64 = 15.0;

/// Collaborator indices handed to the matcher. Absent members simply skip
/// their pipeline stage.
#[derive(Default)]
pub struct IndexSet {
    pub vector: Option<Box<dyn IVectorIndex>>,
    pub inverted: Option<InvertedIndex>,
    pub temporal: Option<Box<dyn ITemporalIndex>>,
    pub quality: Option<Box<dyn IQualityIndex>>,
}

/// Trajectory matcher. Owns the span store and whatever collaborator
/// indices were attached; all state is in-memory and mutation happens only
/// through `&mut self`.
pub struct Matcher {
    config: MatcherConfig,
    embedder: Box<dyn IEmbeddingProvider>,
    store: SpanStore,
    vector: Option<Box<dyn IVectorIndex>>,
    inverted: Option<InvertedIndex>,
    temporal: Option<Box<dyn ITemporalIndex>>,
    quality: Option<Box<dyn IQualityIndex>>,
}

impl Matcher {
    /// Matcher with the built-in deterministic hashing embedder.
    pub fn new(config: MatcherConfig) -> Self {
        let embedder = Box::new(HashingEmbedder::new(config.embedding_dim));
        Self::with_embedder(config, embedder)
    }

    /// Matcher with a caller-supplied embedding provider.
    pub fn with_embedder(config: MatcherConfig, embedder: Box<dyn IEmbeddingProvider>) -> Self {
        Self {
            config,
            embedder,
            store: SpanStore::default(),
            vector: None,
            inverted: None,
            temporal: None,
            quality: None,
        }
    }

    /// Attach collaborator indices. Replaces the full set.
    pub fn set_indices(&mut self, indices: IndexSet) {
        self.vector = indices.vector;
        self.inverted = indices.inverted;
        self.temporal = indices.temporal;
        self.quality = indices.quality;
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn span_count(&self) -> usize {
        self.store.len()
    }

    /// Insert a span: store it, index its embedding, and notify the
    /// categorical / temporal / quality collaborators.
    ///
    /// A failed insert leaves the span "not inserted"; callers must not
    /// retry the same id.
    pub fn add_span(&mut self, span: Span) -> HindsightResult<()> {
        let embedding = self.embedder.embed(&span.text())?;

        if let Some(vector) = &mut self.vector {
            vector.insert(&span.id, &embedding)?;
        }
        if let Some(inverted) = &mut self.inverted {
            inverted.add(&span.id, "action", &span.did);
            if let Some(environment) = &span.context.environment {
                inverted.add(&span.id, "domain", environment);
            }
        }
        if let Some(temporal) = &mut self.temporal {
            temporal.add(&span.id, span.metadata.timestamp_ms());
        }
        if let Some(quality) = &mut self.quality {
            quality.add(&span.id, span.metadata.quality.value());
        }

        self.store.insert(span, embedding);
        Ok(())
    }

    /// Answer a query. Degraded paths return `low_confidence` predictions;
    /// the only errors are argument-validation failures.
    pub fn predict(
        &self,
        context: &SpanContext,
        action: &str,
        plan: Option<SearchPlan>,
    ) -> HindsightResult<Prediction> {
        let plan = plan.unwrap_or_default();

        if plan.top_k < self.config.min_top_k {
            debug!(top_k = plan.top_k, "plan below matcher minimum; short-circuit");
            return Ok(Prediction::low_confidence(
                format!(
                    "Cannot match trajectories: topK {} is below the minimum {}",
                    plan.top_k, self.config.min_top_k
                ),
                CONF_PLAN_TOO_NARROW,
            ));
        }

        let query = self.embedder.embed(&build_query_text(action, context))?;

        // Candidate pool: ANN over-fetch when a vector index is attached,
        // otherwise every stored span.
        let mut candidates: Vec<String> = match &self.vector {
            Some(vector) if !vector.is_empty() => vector
                .search(&query, CANDIDATE_FACTOR * plan.top_k)?
                .into_iter()
                .map(|n| n.id)
                .collect(),
            _ => self.store.ids_in_order().to_vec(),
        };

        if let Some(inverted) = &self.inverted {
            candidates = inverted.filter_by_action(Some(&candidates), action, true);
            if let Some(filters) = &plan.filters {
                if !filters.is_empty() {
                    candidates = retain_in(candidates, inverted.find_all(filters));
                }
            }
        }
        if let (Some(temporal), Some(range)) = (&self.temporal, &plan.time_range) {
            candidates = retain_in(candidates, temporal.find_in_range(range));
        }
        if let Some(quality) = &self.quality {
            candidates = retain_in(candidates, quality.find_above(plan.min_quality));
        }

        if candidates.is_empty() {
            debug!("no candidates survived filtering; short-circuit");
            return Ok(Prediction::low_confidence(
                "No matching trajectories found",
                CONF_NO_CANDIDATES,
            ));
        }

        // Score the leading candidates; stale ids with no stored span are
        // tolerated and skipped.
        let mut evidence: Vec<Evidence> = Vec::new();
        for id in candidates.iter().take(plan.top_k) {
            let Some(stored) = self.store.get(id) else {
                continue;
            };
            let score = f64::from(cosine(&query, &stored.embedding)?);
            if score < self.config.min_score {
                continue;
            }
            evidence.push(Evidence {
                id: id.clone(),
                score,
                content: stored.span.outcome_text(),
                metadata: serde_json::to_value(&stored.span.metadata).ok(),
            });
        }

        if evidence.is_empty() {
            debug!("no candidate cleared the score floor; short-circuit");
            return Ok(Prediction::low_confidence(
                "No sufficiently similar trajectories",
                CONF_NO_EVIDENCE,
            ));
        }

        // Stable sort keeps first-seen order among score ties.
        evidence.sort_by(|a, b| b.score.total_cmp(&a.score));

        let output = synthesize_output(&evidence);
        let scores: Vec<f64> = evidence.iter().map(|e| e.score).collect();
        let confidence = score_confidence(&scores);

        if confidence < self.config.min_confidence {
            return Ok(Prediction {
                output: format!("Low confidence ({confidence:.0}%): {output}"),
                confidence,
                trajectories_used: evidence.len(),
                method: MatchMethod::LowConfidence,
                evidence: Some(evidence),
                plan: Some(plan),
            });
        }

        Ok(Prediction {
            output,
            confidence,
            trajectories_used: evidence.len(),
            method: MatchMethod::TrajectoryMatching,
            evidence: Some(evidence),
            plan: Some(plan),
        })
    }
}

/// Query text: action, environment, stakes, then previous actions, joined
/// by single spaces.
fn build_query_text(action: &str, context: &SpanContext) -> String {
    let mut parts: Vec<&str> = vec![action];
    if let Some(environment) = &context.environment {
        parts.push(environment);
    }
    if let Some(stakes) = &context.stakes {
        parts.push(stakes);
    }
    for previous in &context.previous {
        parts.push(previous);
    }
    parts.join(" ")
}

/// Keep `candidates` (in order) whose ids appear in `allowed`.
fn retain_in(candidates: Vec<String>, allowed: Vec<String>) -> Vec<String> {
    let allowed: FxHashSet<String> = allowed.into_iter().collect();
    candidates
        .into_iter()
        .filter(|id| allowed.contains(id))
        .collect()
}
