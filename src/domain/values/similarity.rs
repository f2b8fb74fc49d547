use std::cmp::Ordering;

/// Score given to a pair where either vector has zero length.
pub const DEGENERATE_SCORE: f64 = f64::NEG_INFINITY;

pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| *x as f64 * *y as f64).sum()
}

pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter().map(|x| *x as f64 * *x as f64).sum::<f64>().sqrt()
}

/// Cosine similarity with precomputed norms. Zero norms map to
/// [`DEGENERATE_SCORE`] instead of NaN.
pub fn cosine_with_norms(a: &[f32], norm_a: f64, b: &[f32], norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return DEGENERATE_SCORE;
    }
    dot(a, b) / (norm_a * norm_b)
}

/// Ranking order: higher score first, ties by ascending row index.
/// `-0.0` and `0.0` are equal scores.
pub fn rank_order(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}
