//! # Ranker
//!
//! Cosine similarity between the fused query vector and every catalog row,
//! with a stable descending top-k selection.

use crate::artifacts::EmbeddingMatrix;
use crate::error::{OsusumeError, Result};

/// L2-normalizes a vector in place.
///
/// An all-zero vector is left untouched; downstream its dot product with any
/// normalized row is 0.0, so degenerate embeddings rank below everything
/// without producing NaN.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Ranks catalog rows by cosine similarity against the query.
///
/// Returns at most `top_k` `(row index, similarity)` pairs in descending
/// similarity order. The sort is stable, so equal similarities keep their
/// original catalog order.
///
/// # Errors
///
/// Returns `OsusumeError::DimensionMismatch` if the query width does not
/// equal the catalog width. The fuser makes this unreachable for well-formed
/// artifacts; the guard turns corrupt artifacts into a descriptive failure
/// instead of a silent wrong answer.
pub fn cosine_top_k(
    query: &[f32],
    catalog: &EmbeddingMatrix,
    top_k: usize,
) -> Result<Vec<(usize, f32)>> {
    if query.len() != catalog.cols() {
        return Err(OsusumeError::DimensionMismatch {
            query: query.len(),
            catalog: catalog.cols(),
        });
    }

    let mut q = query.to_vec();
    l2_normalize(&mut q);

    let mut scores: Vec<(usize, f32)> = catalog
        .iter_rows()
        .enumerate()
        .map(|(i, row)| {
            let norm = row.iter().map(|x| x * x).sum::<f32>().sqrt();
            let similarity = if norm > 0.0 { dot(&q, row) / norm } else { 0.0 };
            (i, similarity)
        })
        .collect();

    scores.sort_by(|a, b| b.1.total_cmp(&a.1));
    scores.truncate(top_k);
    Ok(scores)
}
