//! Distance helpers for the vector indices. Dimensions are validated at the
//! index boundary, so these run without rechecking.

use hindsight_embeddings::l2_norm;

/// Cosine distance: 1 − cosine similarity. Zero-norm operands are treated
/// as maximally distant (similarity 0).
pub(crate) fn cosine_distance(u: &[f32], v: &[f32]) -> f32 {
    1.0 - cosine_similarity(u, v)
}

/// Cosine similarity clamped to [-1.0, 1.0]; 0.0 when either norm is zero.
pub(crate) fn cosine_similarity(u: &[f32], v: &[f32]) -> f32 {
    let nu = l2_norm(u);
    let nv = l2_norm(v);
    if nu == 0.0 || nv == 0.0 {
        return 0.0;
    }
    let dot: f32 = u.iter().zip(v).map(|(a, b)| a * b).sum();
    (dot / (nu * nv)).clamp(-1.0, 1.0)
}
