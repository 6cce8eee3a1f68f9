//! Vector arithmetic shared by the embedder and the indices.

use hindsight_core::errors::{EmbeddingError, HindsightResult};

/// L2 norm of a vector.
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Normalize to unit length in place. A zero vector is left unchanged.
pub fn normalize(v: &mut [f32]) {
    let norm = l2_norm(v);
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Squared Euclidean distance. Callers are expected to pass equal-length
/// slices; used on the k-means hot path where dimensions are pre-checked.
pub fn euclidean_sq(u: &[f32], v: &[f32]) -> f32 {
    u.iter()
        .zip(v)
        .map(|(a, b)| {
            let d = a - b;
            d * d
        })
        .sum()
}

/// Cosine similarity in [-1.0, 1.0].
///
/// Returns 0.0 when either vector has zero norm. Fails with a dimension
/// mismatch when the lengths differ.
pub fn cosine(u: &[f32], v: &[f32]) -> HindsightResult<f32> {
    if u.len() != v.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: u.len(),
            actual: v.len(),
        }
        .into());
    }
    let nu = l2_norm(u);
    let nv = l2_norm(v);
    if nu == 0.0 || nv == 0.0 {
        return Ok(0.0);
    }
    let dot: f32 = u.iter().zip(v).map(|(a, b)| a * b).sum();
    Ok((dot / (nu * nv)).clamp(-1.0, 1.0))
}
