//! Best-first layer traversal shared by insertion and query paths.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::metric::cosine_distance;

use super::node::{Candidate, GraphNode};

/// Best-first search within one layer.
///
/// Maintains a min-heap frontier and a bounded result set of size <= `ef`
/// kept distance-ascending. Terminates once the closest frontier entry is
/// farther than the worst kept result and the result set is full.
pub(crate) fn search_layer(
    nodes: &FxHashMap<String, GraphNode>,
    query: &[f32],
    entries: &[Candidate],
    layer: usize,
    ef: usize,
) -> Vec<Candidate> {
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut frontier: BinaryHeap<Reverse<Candidate>> = BinaryHeap::new();
    let mut results: Vec<Candidate> = Vec::with_capacity(ef + 1);

    for entry in entries {
        if !visited.insert(entry.id.as_str()) {
            continue;
        }
        frontier.push(Reverse(entry.clone()));
        insert_sorted(&mut results, entry.clone(), ef);
    }

    while let Some(Reverse(current)) = frontier.pop() {
        if results.len() >= ef {
            if let Some(worst) = results.last() {
                if current.distance > worst.distance {
                    break;
                }
            }
        }

        let Some(node) = nodes.get(&current.id) else {
            continue;
        };
        if layer >= node.neighbors.len() {
            continue;
        }

        for neighbor_id in &node.neighbors[layer] {
            if visited.contains(neighbor_id.as_str()) {
                continue;
            }
            let Some(neighbor) = nodes.get(neighbor_id) else {
                continue;
            };
            // The borrow of `neighbor_id` lives as long as `nodes`, so the
            // visited set can hold it directly.
            visited.insert(neighbor_id.as_str());

            let candidate = Candidate {
                id: neighbor_id.clone(),
                distance: cosine_distance(query, &neighbor.vector),
            };

            let admit = results.len() < ef
                || results
                    .last()
                    .is_some_and(|worst| candidate.distance < worst.distance);
            if admit {
                frontier.push(Reverse(candidate.clone()));
                insert_sorted(&mut results, candidate, ef);
            }
        }
    }

    results
}

/// Keep `results` distance-ascending and truncated to `ef`.
fn insert_sorted(results: &mut Vec<Candidate>, candidate: Candidate, ef: usize) {
    let pos = results
        .binary_search(&candidate)
        .unwrap_or_else(|insert_at| insert_at);
    results.insert(pos, candidate);
    results.truncate(ef);
}

/// Simple greedy neighbor selection: distance-ascending prefix of the
/// candidate set. Candidates arrive sorted from [`search_layer`].
pub(crate) fn select_neighbors_simple(candidates: &[Candidate], max: usize) -> Vec<Candidate> {
    candidates.iter().take(max).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(vector: Vec<f32>, neighbors: &[&str]) -> GraphNode {
        let mut n = GraphNode::new(vector, 0);
        n.neighbors[0] = neighbors.iter().map(|s| s.to_string()).collect();
        n
    }

    fn sample_graph() -> FxHashMap<String, GraphNode> {
        // A line: a — b — c, with c closest to the query used below.
        let mut nodes = FxHashMap::default();
        nodes.insert("a".to_string(), node(vec![1.0, 0.0], &["b"]));
        nodes.insert("b".to_string(), node(vec![0.7, 0.7], &["a", "c"]));
        nodes.insert("c".to_string(), node(vec![0.0, 1.0], &["b"]));
        nodes
    }

    #[test]
    fn traverses_to_the_closest_node() {
        let nodes = sample_graph();
        let entry = Candidate {
            id: "a".into(),
            distance: cosine_distance(&[0.0, 1.0], &[1.0, 0.0]),
        };
        let results = search_layer(&nodes, &[0.0, 1.0], &[entry], 0, 3);
        assert_eq!(results[0].id, "c");
        assert!(results[0].distance.abs() < 1e-6);
    }

    #[test]
    fn result_set_is_bounded_by_ef() {
        let nodes = sample_graph();
        let entry = Candidate {
            id: "a".into(),
            distance: 2.0,
        };
        let results = search_layer(&nodes, &[0.0, 1.0], &[entry], 0, 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn select_neighbors_takes_prefix() {
        let cands = vec![
            Candidate {
                id: "x".into(),
                distance: 0.1,
            },
            Candidate {
                id: "y".into(),
                distance: 0.2,
            },
        ];
        let picked = select_neighbors_simple(&cands, 1);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, "x");
    }
}
