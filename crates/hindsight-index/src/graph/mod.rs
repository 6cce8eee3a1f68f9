//! Layered proximity graph (HNSW) for dynamic insert and approximate k-NN
//! search under cosine distance.
//!
//! Nodes keep per-layer neighbor id lists capped at M (2M at layer 0); every
//! edge is bidirectional at its layer, and the entry point always carries the
//! maximum top layer. Insertion draws node levels from a seeded RNG so
//! builds are reproducible; search on a frozen graph is fully deterministic.

mod node;
mod search;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use tracing::debug;

use hindsight_core::config::GraphIndexConfig;
use hindsight_core::errors::{HindsightResult, IndexError};
use hindsight_core::traits::{IVectorIndex, Neighbor};

use crate::metric::cosine_distance;

use node::{Candidate, GraphNode};
use search::{search_layer, select_neighbors_simple};

/// Hard ceiling on sampled layers; with M = 16 the expected top layer for
/// millions of nodes stays well below this.
const MAX_LAYER: usize = 16;

/// Aggregate shape of the graph, for observability.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStats {
    pub nodes: usize,
    /// Max top layer + 1; 0 when the graph is empty.
    pub layers: usize,
    /// Mean neighbor-list length across all (node, layer) slots.
    pub mean_degree: f64,
}

/// Hierarchical navigable small-world index.
pub struct GraphIndex {
    config: GraphIndexConfig,
    nodes: FxHashMap<String, GraphNode>,
    entry_point: Option<String>,
    dimensions: Option<usize>,
    /// Level multiplier 1/ln(M).
    ml: f64,
    rng: ChaCha8Rng,
}

impl GraphIndex {
    pub fn new(config: GraphIndexConfig) -> Self {
        let ml = 1.0 / (config.m.max(2) as f64).ln();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            nodes: FxHashMap::default(),
            entry_point: None,
            dimensions: None,
            ml,
            rng,
        }
    }

    /// Seed override for reproducible test builds.
    pub fn with_seed(mut config: GraphIndexConfig, seed: u64) -> Self {
        config.seed = seed;
        Self::new(config)
    }

    /// Insert a vector under `id`. Re-inserting an existing id replaces the
    /// stored vector without re-wiring edges.
    pub fn insert_vector(&mut self, id: &str, vector: &[f32]) -> HindsightResult<()> {
        self.check_dimensions(vector)?;
        if self.dimensions.is_none() {
            self.dimensions = Some(vector.len());
        }

        if let Some(existing) = self.nodes.get_mut(id) {
            debug!(id, "re-inserting existing id; replacing vector only");
            existing.vector = vector.to_vec();
            return Ok(());
        }

        let level = self.sample_level();
        self.nodes
            .insert(id.to_string(), GraphNode::new(vector.to_vec(), level));

        let Some(entry_id) = self.entry_point.clone() else {
            self.entry_point = Some(id.to_string());
            return Ok(());
        };

        let entry_layer = self
            .nodes
            .get(&entry_id)
            .map(|n| n.top_layer)
            .unwrap_or_default();

        let mut best = vec![Candidate {
            distance: self.distance_to(vector, &entry_id),
            id: entry_id.clone(),
        }];

        // Greedy descent through layers above the new node's top layer.
        if entry_layer > level {
            for layer in ((level + 1)..=entry_layer).rev() {
                best = search_layer(&self.nodes, vector, &best, layer, 1);
            }
        }

        // Wire the node into every layer it participates in.
        for layer in (0..=level.min(entry_layer)).rev() {
            let candidates = search_layer(
                &self.nodes,
                vector,
                &best,
                layer,
                self.config.ef_construction,
            );
            let chosen = select_neighbors_simple(&candidates, self.layer_cap(layer));

            for neighbor in &chosen {
                if neighbor.id == id {
                    continue;
                }
                if let Some(new_node) = self.nodes.get_mut(id) {
                    new_node.neighbors[layer].push(neighbor.id.clone());
                }
                self.link_and_prune(&neighbor.id, id, layer);
            }

            best = candidates;
        }

        if level > entry_layer {
            self.entry_point = Some(id.to_string());
        }
        Ok(())
    }

    /// Approximate k-nearest search, distance-ascending.
    pub fn search_vector(&self, query: &[f32], k: usize) -> HindsightResult<Vec<Neighbor>> {
        if self.nodes.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        self.check_dimensions(query)?;

        let entry_id = match &self.entry_point {
            Some(id) if self.nodes.len() > 1 => id.clone(),
            // Singleton graph, or no entry point: exact scan.
            _ => return Ok(self.linear_scan(query, k)),
        };

        let entry_layer = self
            .nodes
            .get(&entry_id)
            .map(|n| n.top_layer)
            .unwrap_or_default();

        let mut best = vec![Candidate {
            distance: self.distance_to(query, &entry_id),
            id: entry_id,
        }];
        for layer in (1..=entry_layer).rev() {
            best = search_layer(&self.nodes, query, &best, layer, 1);
        }

        let ef = self.config.ef_search.max(k);
        let results = search_layer(&self.nodes, query, &best, 0, ef);

        Ok(results
            .into_iter()
            .take(k)
            .map(|c| Neighbor {
                similarity: 1.0 - c.distance,
                distance: c.distance,
                id: c.id,
            })
            .collect())
    }

    pub fn stats(&self) -> GraphStats {
        let layers = self
            .nodes
            .values()
            .map(|n| n.top_layer + 1)
            .max()
            .unwrap_or(0);
        let mut slots = 0usize;
        let mut edges = 0usize;
        for node in self.nodes.values() {
            slots += node.neighbors.len();
            edges += node.neighbors.iter().map(|l| l.len()).sum::<usize>();
        }
        GraphStats {
            nodes: self.nodes.len(),
            layers,
            mean_degree: if slots == 0 {
                0.0
            } else {
                edges as f64 / slots as f64
            },
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn check_dimensions(&self, vector: &[f32]) -> HindsightResult<()> {
        match self.dimensions {
            Some(expected) if expected != vector.len() => Err(IndexError::DimensionMismatch {
                expected,
                actual: vector.len(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    /// Draw a top layer from the exponential level distribution.
    fn sample_level(&mut self) -> usize {
        let u: f64 = self.rng.gen::<f64>().max(f64::MIN_POSITIVE);
        (((-u.ln()) * self.ml).floor() as usize).min(MAX_LAYER)
    }

    fn layer_cap(&self, layer: usize) -> usize {
        if layer == 0 {
            self.config.m * 2
        } else {
            self.config.m
        }
    }

    fn distance_to(&self, query: &[f32], id: &str) -> f32 {
        self.nodes
            .get(id)
            .map(|n| cosine_distance(query, &n.vector))
            .unwrap_or(f32::MAX)
    }

    /// Add the reverse edge `to -> from` at `layer`, pruning `to`'s list to
    /// the layer cap. Pruned edges are removed from both endpoints so every
    /// surviving edge stays bidirectional.
    fn link_and_prune(&mut self, to: &str, from: &str, layer: usize) {
        let cap = self.layer_cap(layer);

        let within_cap = match self.nodes.get_mut(to) {
            Some(node) if layer < node.neighbors.len() => {
                node.neighbors[layer].push(from.to_string());
                node.neighbors[layer].len() <= cap
            }
            _ => return,
        };
        if within_cap {
            return;
        }

        let Some(to_node) = self.nodes.get(to) else {
            return;
        };
        let to_vector = to_node.vector.clone();
        let mut scored: Vec<Candidate> = to_node.neighbors[layer]
            .iter()
            .filter_map(|nid| {
                self.nodes.get(nid).map(|n| Candidate {
                    id: nid.clone(),
                    distance: cosine_distance(&to_vector, &n.vector),
                })
            })
            .collect();
        scored.sort();

        let kept: Vec<String> = scored.iter().take(cap).map(|c| c.id.clone()).collect();
        let dropped: Vec<String> = scored.iter().skip(cap).map(|c| c.id.clone()).collect();

        if let Some(node) = self.nodes.get_mut(to) {
            node.neighbors[layer] = kept.into_iter().collect();
        }
        for dropped_id in dropped {
            if let Some(node) = self.nodes.get_mut(&dropped_id) {
                if layer < node.neighbors.len() {
                    node.neighbors[layer].retain(|x| x.as_str() != to);
                }
            }
        }
    }

    fn linear_scan(&self, query: &[f32], k: usize) -> Vec<Neighbor> {
        let mut all: Vec<Candidate> = self
            .nodes
            .iter()
            .map(|(id, node)| Candidate {
                id: id.clone(),
                distance: cosine_distance(query, &node.vector),
            })
            .collect();
        all.sort();
        all.into_iter()
            .take(k)
            .map(|c| Neighbor {
                similarity: 1.0 - c.distance,
                distance: c.distance,
                id: c.id,
            })
            .collect()
    }

    /// Test-facing invariant check: every edge bidirectional at its layer,
    /// no list over its cap, entry point at the maximum top layer.
    #[doc(hidden)]
    pub fn validate_invariants(&self) -> Result<(), String> {
        for (id, node) in &self.nodes {
            for (layer, list) in node.neighbors.iter().enumerate() {
                if list.len() > self.layer_cap(layer) {
                    return Err(format!(
                        "node {id} layer {layer} degree {} exceeds cap",
                        list.len()
                    ));
                }
                for neighbor_id in list {
                    let ok = self.nodes.get(neighbor_id).is_some_and(|n| {
                        layer < n.neighbors.len() && n.neighbors[layer].iter().any(|x| x == id)
                    });
                    if !ok {
                        return Err(format!(
                            "edge {id} -> {neighbor_id} at layer {layer} is not bidirectional"
                        ));
                    }
                }
            }
        }
        if let Some(entry_id) = &self.entry_point {
            let max_layer = self.nodes.values().map(|n| n.top_layer).max().unwrap_or(0);
            let entry_layer = self.nodes.get(entry_id).map(|n| n.top_layer);
            if entry_layer != Some(max_layer) {
                return Err(format!(
                    "entry point {entry_id} at layer {entry_layer:?}, expected {max_layer}"
                ));
            }
        } else if !self.nodes.is_empty() {
            return Err("non-empty graph without an entry point".to_string());
        }
        Ok(())
    }
}

impl IVectorIndex for GraphIndex {
    fn insert(&mut self, id: &str, vector: &[f32]) -> HindsightResult<()> {
        self.insert_vector(id, vector)
    }

    fn search(&self, query: &[f32], k: usize) -> HindsightResult<Vec<Neighbor>> {
        self.search_vector(query, k)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> GraphIndex {
        GraphIndex::with_seed(GraphIndexConfig::default(), 7)
    }

    fn unit(x: f32, y: f32) -> Vec<f32> {
        let n = (x * x + y * y).sqrt();
        vec![x / n, y / n]
    }

    #[test]
    fn empty_search_returns_empty() {
        let g = index();
        assert!(g.search_vector(&[1.0, 0.0], 5).unwrap().is_empty());
    }

    #[test]
    fn single_node_uses_linear_scan() {
        let mut g = index();
        g.insert_vector("only", &unit(1.0, 0.0)).unwrap();
        let hits = g.search_vector(&unit(1.0, 0.1), 3).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "only");
    }

    #[test]
    fn finds_nearest_among_many() {
        let mut g = index();
        for i in 0..40 {
            let angle = i as f32 * 0.15;
            g.insert_vector(&format!("n{i}"), &unit(angle.cos(), angle.sin()))
                .unwrap();
        }
        let hits = g.search_vector(&unit(1.0, 0.0), 3).unwrap();
        assert_eq!(hits[0].id, "n0");
        assert!(hits[0].similarity > 0.999);
        // Distances ascend.
        assert!(hits[0].distance <= hits[1].distance);
        assert!(hits[1].distance <= hits[2].distance);
    }

    #[test]
    fn dimension_mismatch_fails() {
        let mut g = index();
        g.insert_vector("a", &[1.0, 0.0]).unwrap();
        assert!(g.insert_vector("b", &[1.0, 0.0, 0.0]).is_err());
        assert!(g.search_vector(&[1.0], 1).is_err());
    }

    #[test]
    fn invariants_hold_after_inserts() {
        let mut g = index();
        for i in 0..60 {
            let angle = i as f32 * 0.41;
            g.insert_vector(&format!("n{i}"), &unit(angle.cos(), angle.sin()))
                .unwrap();
        }
        g.validate_invariants().unwrap();
    }

    #[test]
    fn entry_point_tracks_max_layer() {
        let mut g = index();
        for i in 0..30 {
            g.insert_vector(&format!("n{i}"), &unit(1.0 + i as f32, 2.0))
                .unwrap();
        }
        g.validate_invariants().unwrap();
        let stats = g.stats();
        assert_eq!(stats.nodes, 30);
        assert!(stats.layers >= 1);
    }

    #[test]
    fn reinsert_replaces_vector() {
        let mut g = index();
        g.insert_vector("a", &unit(1.0, 0.0)).unwrap();
        g.insert_vector("b", &unit(0.0, 1.0)).unwrap();
        g.insert_vector("a", &unit(0.0, 1.0)).unwrap();
        assert_eq!(g.node_count(), 2);
        let hits = g.search_vector(&unit(0.0, 1.0), 1).unwrap();
        assert!(hits[0].similarity > 0.999);
    }

    #[test]
    fn search_is_deterministic_on_frozen_graph() {
        let mut g = index();
        for i in 0..25 {
            let angle = i as f32 * 0.3;
            g.insert_vector(&format!("n{i}"), &unit(angle.cos(), angle.sin()))
                .unwrap();
        }
        let q = unit(0.3, 0.9);
        let a: Vec<String> = g
            .search_vector(&q, 5)
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        let b: Vec<String> = g
            .search_vector(&q, 5)
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(a, b);
    }
}
