use std::cmp::Ordering;

use smallvec::SmallVec;

/// Per-layer neighbor list. M defaults to 16, so most lists stay inline.
pub(crate) type NeighborList = SmallVec<[String; 16]>;

/// A node in the layered proximity graph.
///
/// Neighbors are stored as ids, not handles — the graph is cyclic by
/// construction, and id indirection lets pruning drop edges without
/// dangling references.
#[derive(Debug, Clone)]
pub(crate) struct GraphNode {
    pub vector: Vec<f32>,
    /// Highest layer this node participates in.
    pub top_layer: usize,
    /// Neighbor ids per layer, index 0..=top_layer.
    pub neighbors: Vec<NeighborList>,
}

impl GraphNode {
    pub fn new(vector: Vec<f32>, top_layer: usize) -> Self {
        Self {
            vector,
            top_layer,
            neighbors: vec![NeighborList::new(); top_layer + 1],
        }
    }
}

/// A scored candidate during graph traversal.
///
/// Ordered by distance ascending with the id as a deterministic tiebreak,
/// so heaps and sorted result sets behave identically run to run.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub id: String,
    pub distance: f32,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.distance.total_cmp(&other.distance) == Ordering::Equal && self.id == other.id
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_order_by_distance_then_id() {
        let a = Candidate {
            id: "a".into(),
            distance: 0.5,
        };
        let b = Candidate {
            id: "b".into(),
            distance: 0.2,
        };
        let c = Candidate {
            id: "c".into(),
            distance: 0.2,
        };
        let mut v = vec![a.clone(), b.clone(), c.clone()];
        v.sort();
        assert_eq!(v[0].id, "b");
        assert_eq!(v[1].id, "c");
        assert_eq!(v[2].id, "a");
    }

    #[test]
    fn node_allocates_all_layers() {
        let n = GraphNode::new(vec![1.0], 3);
        assert_eq!(n.neighbors.len(), 4);
    }
}
