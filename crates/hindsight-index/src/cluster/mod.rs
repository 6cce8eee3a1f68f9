//! Clustered inverted-file (IVF) index: k-means++ partitioning with
//! cluster → id postings for coarse-to-fine search.
//!
//! Vectors accumulate through [`ClusterIndex::add`]; [`ClusterIndex::build`]
//! partitions them. Until built (or after any post-build `add`), searches
//! fall back to an exact linear scan.

mod kmeans;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use hindsight_core::config::ClusterIndexConfig;
use hindsight_core::errors::{HindsightResult, IndexError};
use hindsight_core::traits::{IVectorIndex, Neighbor};

use hindsight_embeddings::euclidean_sq;

use crate::metric::cosine_distance;

use kmeans::run_kmeans;

pub struct ClusterIndex {
    config: ClusterIndexConfig,
    vectors: FxHashMap<String, Vec<f32>>,
    /// Insertion order, so builds and fallback scans are reproducible.
    order: Vec<String>,
    centroids: Vec<Vec<f32>>,
    /// Cluster ordinal → member ids. Parallel to `centroids` once built.
    postings: Vec<Vec<String>>,
    built: bool,
    dimensions: Option<usize>,
}

impl ClusterIndex {
    pub fn new(config: ClusterIndexConfig) -> Self {
        Self {
            config,
            vectors: FxHashMap::default(),
            order: Vec::new(),
            centroids: Vec::new(),
            postings: Vec::new(),
            built: false,
            dimensions: None,
        }
    }

    /// Seed override for reproducible test builds.
    pub fn with_seed(mut config: ClusterIndexConfig, seed: u64) -> Self {
        config.seed = seed;
        Self::new(config)
    }

    /// Add a vector. Adding after `build` drops back to unbuilt state until
    /// the next full rebuild.
    pub fn add_vector(&mut self, id: &str, vector: &[f32]) -> HindsightResult<()> {
        self.check_dimensions(vector)?;
        if self.dimensions.is_none() {
            self.dimensions = Some(vector.len());
        }

        if self.vectors.insert(id.to_string(), vector.to_vec()).is_none() {
            self.order.push(id.to_string());
        }
        if self.built {
            debug!(id, "vector added after build; index reverts to exact scan");
            self.built = false;
        }
        Ok(())
    }

    /// Run k-means++ and rebuild the postings. A build over no vectors warns
    /// and leaves the index untouched.
    pub fn build(&mut self) {
        if self.vectors.is_empty() {
            warn!("cluster index build requested with no vectors");
            return;
        }

        let k = self.config.n_clusters.clamp(1, self.vectors.len());
        let data: Vec<Vec<f32>> = self
            .order
            .iter()
            .filter_map(|id| self.vectors.get(id).cloned())
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let result = run_kmeans(&data, k, self.config.max_iter, &mut rng);

        let mut postings: Vec<Vec<String>> = vec![Vec::new(); result.centroids.len()];
        for (id, &cluster) in self.order.iter().zip(&result.assignments) {
            postings[cluster].push(id.clone());
        }

        debug!(
            clusters = result.centroids.len(),
            vectors = self.order.len(),
            "cluster index built"
        );
        self.centroids = result.centroids;
        self.postings = postings;
        self.built = true;
    }

    /// k-nearest by cosine distance. Built indices probe the `n_probe`
    /// nearest clusters; unbuilt ones scan everything.
    pub fn search_vector(&self, query: &[f32], k: usize) -> HindsightResult<Vec<Neighbor>> {
        if self.vectors.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        self.check_dimensions(query)?;

        let candidate_ids: Vec<&String> = if self.built {
            let mut ranked: Vec<(usize, f32)> = self
                .centroids
                .iter()
                .enumerate()
                .map(|(i, c)| (i, euclidean_sq(query, c)))
                .collect();
            ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
            ranked
                .iter()
                .take(self.config.n_probe.max(1))
                .flat_map(|(i, _)| self.postings[*i].iter())
                .collect()
        } else {
            self.order.iter().collect()
        };

        let mut scored: Vec<(f32, &String)> = candidate_ids
            .into_iter()
            .filter_map(|id| {
                self.vectors
                    .get(id)
                    .map(|v| (cosine_distance(query, v), id))
            })
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(distance, id)| Neighbor {
                id: id.clone(),
                distance,
                similarity: 1.0 - distance,
            })
            .collect())
    }

    pub fn size(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Cluster ordinal → member count, for observability.
    pub fn posting_sizes(&self) -> Vec<usize> {
        self.postings.iter().map(|p| p.len()).collect()
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

    /// Test-facing invariant check: postings partition the id set and the
    /// centroid count matches the posting count.
    #[doc(hidden)]
    pub fn validate_invariants(&self) -> Result<(), String> {
        if !self.built {
            return Ok(());
        }
        if self.centroids.len() != self.postings.len() {
            return Err(format!(
                "{} centroids but {} postings",
                self.centroids.len(),
                self.postings.len()
            ));
        }
        let total: usize = self.postings.iter().map(|p| p.len()).sum();
        if total != self.vectors.len() {
            return Err(format!(
                "postings hold {total} ids but the index holds {}",
                self.vectors.len()
            ));
        }
        let mut seen = rustc_hash::FxHashSet::default();
        for posting in &self.postings {
            for id in posting {
                if !seen.insert(id.as_str()) {
                    return Err(format!("id {id} appears in more than one posting"));
                }
            }
        }
        Ok(())
    }
}

impl IVectorIndex for ClusterIndex {
    fn insert(&mut self, id: &str, vector: &[f32]) -> HindsightResult<()> {
        self.add_vector(id, vector)
    }

    fn search(&self, query: &[f32], k: usize) -> HindsightResult<Vec<Neighbor>> {
        self.search_vector(query, k)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}
