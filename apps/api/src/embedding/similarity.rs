use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    #[error("cannot compare a zero-magnitude vector")]
    ZeroMagnitude,

    #[error("embedding dimension mismatch ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },
}

/// Cosine similarity in [-1, 1]. Accumulates in f64 so that repeated scoring
/// of the same pair is stable to the second decimal of a percentage.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let norm_a = magnitude(a);
    let norm_b = magnitude(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(SimilarityError::ZeroMagnitude);
    }

    Ok(dot / (norm_a * norm_b))
}

fn magnitude(v: &[f32]) -> f64 {
    v.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt()
}
