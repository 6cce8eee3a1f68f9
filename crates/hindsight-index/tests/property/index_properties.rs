//! Property tests for the graph, cluster, and inverted indices.

use proptest::prelude::*;

use hindsight_core::config::{ClusterIndexConfig, GraphIndexConfig};
use hindsight_index::{ClusterIndex, GraphIndex, InvertedIndex};

/// Random unit vectors in a small dimension keep the search space dense
/// enough that pruning actually fires.
fn unit_vectors(len: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-1.0f32..1.0, 4), 1..len).prop_map(|vs| {
        vs.into_iter()
            .map(|v| {
                let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm > 0.0 {
                    v.into_iter().map(|x| x / norm).collect()
                } else {
                    vec![1.0, 0.0, 0.0, 0.0]
                }
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_graph_invariants_after_any_insert_sequence(
        vectors in unit_vectors(48),
        seed in 0u64..1000,
    ) {
        let mut graph = GraphIndex::with_seed(GraphIndexConfig {
            m: 4,
            ef_construction: 16,
            ef_search: 8,
            ..GraphIndexConfig::default()
        }, seed);
        for (i, v) in vectors.iter().enumerate() {
            graph.insert_vector(&format!("n{i}"), v).unwrap();
        }
        prop_assert!(graph.validate_invariants().is_ok());
    }

    #[test]
    fn prop_graph_search_deterministic(vectors in unit_vectors(32), seed in 0u64..1000) {
        let mut graph = GraphIndex::with_seed(GraphIndexConfig::default(), seed);
        for (i, v) in vectors.iter().enumerate() {
            graph.insert_vector(&format!("n{i}"), v).unwrap();
        }
        let q = &vectors[0];
        let a: Vec<String> = graph.search_vector(q, 5).unwrap().into_iter().map(|n| n.id).collect();
        let b: Vec<String> = graph.search_vector(q, 5).unwrap().into_iter().map(|n| n.id).collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_cluster_postings_partition_ids(
        vectors in unit_vectors(40),
        n_clusters in 1usize..8,
        seed in 0u64..1000,
    ) {
        let mut cluster = ClusterIndex::with_seed(ClusterIndexConfig {
            n_clusters,
            ..ClusterIndexConfig::default()
        }, seed);
        for (i, v) in vectors.iter().enumerate() {
            cluster.add_vector(&format!("v{i}"), v).unwrap();
        }
        cluster.build();
        prop_assert!(cluster.is_built());
        prop_assert!(cluster.validate_invariants().is_ok());
        prop_assert_eq!(cluster.size(), vectors.len());
    }

    #[test]
    fn prop_find_all_single_filter_equals_find(ids in prop::collection::vec(0usize..20, 1..40)) {
        let mut idx = InvertedIndex::new();
        for id in &ids {
            idx.add(&format!("s{id}"), "action", "deploy");
        }
        let mut filters = std::collections::BTreeMap::new();
        filters.insert("action".to_string(), "deploy".to_string());
        prop_assert_eq!(idx.find_all(&filters), idx.find("action", "deploy"));
    }

    #[test]
    fn prop_seed_intersection_commutes_as_sets(
        left in prop::collection::vec(0usize..12, 0..24),
        right in prop::collection::vec(0usize..12, 0..24),
    ) {
        let mut idx = InvertedIndex::new();
        for id in &right {
            idx.add(&format!("s{id}"), "domain", "prod");
        }
        let seed: Vec<String> = left.iter().map(|id| format!("s{id}")).collect();

        let filtered = idx.filter_by_domain(Some(&seed), "prod");

        let mut expected: Vec<String> = seed
            .iter()
            .filter(|id| right.iter().any(|r| &format!("s{r}") == *id))
            .cloned()
            .collect();
        expected.dedup();
        let mut filtered_sorted = filtered.clone();
        filtered_sorted.sort();
        filtered_sorted.dedup();
        let mut expected_sorted = expected;
        expected_sorted.sort();
        expected_sorted.dedup();
        prop_assert_eq!(filtered_sorted, expected_sorted);
    }
}
