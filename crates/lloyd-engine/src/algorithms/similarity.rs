//! Cosine similarity over the global feature space.

use lloyd_core::SparseVector;

/// Cosine similarity between two sparse vectors.
///
/// Absent features are zero, so iterating the shared keys gives the same
/// value as the dense formula over the global feature set.
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    cosine_with_norms(a, a.norm(), b, b.norm())
}

/// Cosine similarity with caller-supplied norms, for loops that compare one
/// vector against many.
pub fn cosine_with_norms(a: &SparseVector, norm_a: f64, b: &SparseVector, norm_b: f64) -> f64 {
    let denom = norm_a * norm_b;
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0)
}
