//! k-means++ seeding and Lloyd iterations for the cluster index.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use hindsight_embeddings::euclidean_sq;

/// Stop Lloyd iterations once no centroid moves farther than this.
const CONVERGENCE_EPS: f32 = 1e-4;

#[derive(Debug)]
pub(crate) struct KmeansResult {
    pub centroids: Vec<Vec<f32>>,
    /// Index into `centroids` for every input vector.
    pub assignments: Vec<usize>,
}

/// Cluster `data` into `k` partitions. `k` must be in 1..=data.len().
pub(crate) fn run_kmeans(
    data: &[Vec<f32>],
    k: usize,
    max_iter: usize,
    rng: &mut ChaCha8Rng,
) -> KmeansResult {
    let mut centroids = seed_centroids(data, k, rng);
    let mut assignments = vec![0usize; data.len()];

    for _ in 0..max_iter {
        for (i, v) in data.iter().enumerate() {
            assignments[i] = closest_centroid(v, &centroids);
        }

        let mut moved_max = 0.0f32;
        let next = recompute_centroids(data, &assignments, &centroids);
        for (old, new) in centroids.iter().zip(&next) {
            moved_max = moved_max.max(euclidean_sq(old, new).sqrt());
        }
        centroids = next;

        if moved_max < CONVERGENCE_EPS {
            break;
        }
    }

    // Final assignment against the settled centroids.
    for (i, v) in data.iter().enumerate() {
        assignments[i] = closest_centroid(v, &centroids);
    }

    KmeansResult {
        centroids,
        assignments,
    }
}

/// Index of the closest centroid by Euclidean distance; ties resolve to the
/// lowest index.
pub(crate) fn closest_centroid(v: &[f32], centroids: &[Vec<f32>]) -> usize {
    let mut best = 0usize;
    let mut best_d = f32::MAX;
    for (i, c) in centroids.iter().enumerate() {
        let d = euclidean_sq(v, c);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

/// D²-weighted seeding: first centroid uniform, each subsequent centroid
/// sampled proportionally to its squared distance from the nearest chosen
/// one.
fn seed_centroids(data: &[Vec<f32>], k: usize, rng: &mut ChaCha8Rng) -> Vec<Vec<f32>> {
    let mut centroids: Vec<Vec<f32>> = Vec::with_capacity(k);
    let first = rng.gen_range(0..data.len());
    centroids.push(data[first].clone());

    let mut nearest_sq: Vec<f32> = data
        .iter()
        .map(|v| euclidean_sq(v, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = nearest_sq.iter().map(|&d| d as f64).sum();
        let pick = if total <= 0.0 {
            // All remaining mass sits on already-chosen points; fall back to
            // uniform so duplicate-heavy data still seeds k centroids.
            rng.gen_range(0..data.len())
        } else {
            let mut target = rng.gen::<f64>() * total;
            let mut chosen = data.len() - 1;
            for (i, &d) in nearest_sq.iter().enumerate() {
                target -= d as f64;
                if target <= 0.0 {
                    chosen = i;
                    break;
                }
            }
            chosen
        };

        centroids.push(data[pick].clone());
        for (i, v) in data.iter().enumerate() {
            let d = euclidean_sq(v, &centroids[centroids.len() - 1]);
            if d < nearest_sq[i] {
                nearest_sq[i] = d;
            }
        }
    }

    centroids
}

/// Mean of each cluster's members; empty clusters retain their previous
/// centroid.
fn recompute_centroids(
    data: &[Vec<f32>],
    assignments: &[usize],
    previous: &[Vec<f32>],
) -> Vec<Vec<f32>> {
    let dims = data.first().map(|v| v.len()).unwrap_or(0);
    let mut sums = vec![vec![0.0f32; dims]; previous.len()];
    let mut counts = vec![0usize; previous.len()];

    for (v, &a) in data.iter().zip(assignments) {
        counts[a] += 1;
        for (s, x) in sums[a].iter_mut().zip(v) {
            *s += x;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((sum, count), prev)| {
            if count == 0 {
                prev.clone()
            } else {
                sum.into_iter().map(|s| s / count as f32).collect()
            }
        })
        .collect()
}
