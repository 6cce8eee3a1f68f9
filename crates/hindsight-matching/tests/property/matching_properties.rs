//! Property tests for the matcher: determinism and short-circuit bounds.

use proptest::prelude::*;

use hindsight_core::config::MatcherConfig;
use hindsight_core::models::SearchPlan;
use hindsight_core::span::{Quality, Span, SpanContext, SpanMetadata, SpanStatus};
use hindsight_matching::Matcher;

fn make_span(id: usize, did: &str, outcome: &str) -> Span {
    Span {
        id: format!("s{id}"),
        who: "agent".into(),
        did: did.to_string(),
        this: "target".into(),
        if_ok: Some(outcome.to_string()),
        if_not: None,
        confirm: None,
        context: SpanContext {
            environment: Some("testing".into()),
            stakes: None,
            previous: vec![],
        },
        metadata: SpanMetadata {
            quality: Quality::new(75.0),
            ..SpanMetadata::default()
        },
        status: SpanStatus::Completed,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_predict_is_deterministic(
        actions in prop::collection::vec("[a-z]{3,10}", 1..12),
        query in "[a-z]{3,10} [a-z]{3,10}",
    ) {
        let mut matcher = Matcher::new(MatcherConfig::default());
        for (i, action) in actions.iter().enumerate() {
            matcher.add_span(make_span(i, action, &format!("{action} completed"))).unwrap();
        }

        let context = SpanContext {
            environment: Some("testing".into()),
            ..SpanContext::default()
        };
        let a = matcher.predict(&context, &query, None).unwrap();
        let b = matcher.predict(&context, &query, None).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn prop_confidence_always_in_range(
        actions in prop::collection::vec("[a-z]{3,10}", 0..12),
        query in "[a-z]{3,10}( [a-z]{3,10}){0,3}",
        top_k in 0usize..12,
    ) {
        let mut matcher = Matcher::new(MatcherConfig::default());
        for (i, action) in actions.iter().enumerate() {
            matcher.add_span(make_span(i, action, &format!("{action} completed"))).unwrap();
        }

        let plan = SearchPlan { top_k, ..SearchPlan::default() };
        let p = matcher.predict(&SpanContext::default(), &query, Some(plan)).unwrap();
        prop_assert!(p.confidence >= 0.0 && p.confidence <= 100.0);
        prop_assert!(p.trajectories_used <= top_k.max(1));
    }
}
