//! # Feature Fuser
//!
//! Decides once per request which optional feature families participate and
//! builds both sides of the similarity computation from that single decision,
//! so query and catalog vectors can never disagree on layout.

use std::borrow::Cow;

use crate::artifacts::{ArtifactStore, EmbeddingMatrix};
use crate::error::Result;
use crate::types::RecommendRequest;

/// Which optional feature families are active for a request.
///
/// Family order is fixed: genre before numeric, on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFamilies {
    /// Genre multi-hot block, active iff the selection is non-empty.
    pub genre: bool,
    /// Scaled {score, members, year} block, active iff all three are present.
    pub numeric: bool,
}

impl FeatureFamilies {
    /// Computes the active families from a request's optional inputs.
    ///
    /// An empty genre selection and a partial numeric triple both leave their
    /// family off; partial numeric input is dropped as a whole, never applied
    /// column by column.
    #[must_use]
    pub fn from_request(request: &RecommendRequest) -> Self {
        Self {
            genre: !request.genres.is_empty(),
            numeric: request.numeric_triple().is_some(),
        }
    }

    /// Returns `true` if any optional family is active.
    #[must_use]
    pub fn any(&self) -> bool {
        self.genre || self.numeric
    }
}

/// A query vector and catalog matrix fused to the same width.
pub struct FusedRequest<'a> {
    /// Final query vector (1 x D).
    pub query: Vec<f32>,
    /// Final catalog matrix (N x D). Borrowed when no family is active.
    pub catalog: Cow<'a, EmbeddingMatrix>,
    /// The family selection that produced both sides.
    pub families: FeatureFamilies,
}

/// Extends the ensemble query vector and selects the catalog matrices
/// according to the request's active feature families.
///
/// # Errors
///
/// Propagates scaler and matrix concatenation failures; both indicate
/// malformed artifacts rather than bad user input.
pub fn fuse<'a>(
    artifacts: &'a ArtifactStore,
    ensemble_query: Vec<f32>,
    request: &RecommendRequest,
) -> Result<FusedRequest<'a>> {
    let families = FeatureFamilies::from_request(request);

    let mut query = ensemble_query;
    let mut parts: Vec<&EmbeddingMatrix> = vec![&artifacts.embeddings];

    if families.genre {
        query.extend(artifacts.binarizer.transform(&request.genres));
        parts.push(&artifacts.genre_vecs);
    }

    if let Some((score, members, year)) = request.numeric_triple() {
        let scaled = artifacts
            .scaler
            .transform(&[score, members as f32, year as f32])?;
        query.extend(scaled);
        parts.push(&artifacts.numeric_vecs);
    }

    let catalog = if families.any() {
        Cow::Owned(EmbeddingMatrix::hstack(&parts)?)
    } else {
        Cow::Borrowed(&artifacts.embeddings)
    };

    Ok(FusedRequest {
        query,
        catalog,
        families,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::{GenreBinarizer, NumericScaler, TfidfVectorizer};
    use crate::types::{Catalog, CatalogEntry};
    use std::collections::HashMap;

    fn entry(title: &str) -> CatalogEntry {
        CatalogEntry {
            title: title.to_string(),
            title_english: None,
            score: 7.0,
            genres: vec!["Action".to_string()],
            url: String::new(),
            image_url: String::new(),
            members: None,
            year: None,
        }
    }

    fn store() -> ArtifactStore {
        ArtifactStore {
            catalog: Catalog::new(vec![entry("a"), entry("b")]),
            embeddings: EmbeddingMatrix::from_rows(vec![
                vec![1.0, 0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0, 0.0],
            ])
            .unwrap(),
            genre_vecs: EmbeddingMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]])
                .unwrap(),
            numeric_vecs: EmbeddingMatrix::from_rows(vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]])
                .unwrap(),
            tfidf: TfidfVectorizer::new(HashMap::from([("ninja".to_string(), 0)]), vec![1.0])
                .unwrap(),
            binarizer: GenreBinarizer::new(vec!["Action".to_string(), "Drama".to_string()])
                .unwrap(),
            scaler: NumericScaler::new(vec![0.0; 3], vec![1.0; 3]).unwrap(),
        }
    }

    fn base_query() -> Vec<f32> {
        vec![0.5, 0.5, 0.0, 0.0]
    }

    #[test]
    fn no_families_borrows_base_matrix() {
        let artifacts = store();
        let request = RecommendRequest::new("ninja");
        let fused = fuse(&artifacts, base_query(), &request).unwrap();

        assert!(!fused.families.any());
        assert!(matches!(fused.catalog, Cow::Borrowed(_)));
        assert_eq!(fused.query.len(), fused.catalog.cols());
        assert_eq!(fused.query.len(), 4);
    }

    #[test]
    fn empty_genre_selection_equals_no_genre_family() {
        let artifacts = store();
        let explicit_empty = RecommendRequest::new("ninja").with_genres(Vec::new());
        let untouched = RecommendRequest::new("ninja");

        let a = fuse(&artifacts, base_query(), &explicit_empty).unwrap();
        let b = fuse(&artifacts, base_query(), &untouched).unwrap();

        assert_eq!(a.families, b.families);
        assert_eq!(a.query, b.query);
        assert_eq!(a.catalog.cols(), b.catalog.cols());
    }

    #[test]
    fn genre_family_extends_both_sides() {
        let artifacts = store();
        let request = RecommendRequest::new("ninja").with_genres(vec!["Drama".to_string()]);
        let fused = fuse(&artifacts, base_query(), &request).unwrap();

        assert!(fused.families.genre);
        assert!(!fused.families.numeric);
        assert_eq!(fused.query.len(), 4 + 2);
        assert_eq!(fused.catalog.cols(), 4 + 2);
        // Genre block sits right after the ensemble block.
        assert_eq!(&fused.query[4..], &[0.0, 1.0]);
    }

    #[test]
    fn partial_numeric_input_equals_no_numeric_input() {
        let artifacts = store();
        let partial = RecommendRequest::new("ninja")
            .with_min_score(8.0)
            .with_min_members(10_000);
        let none = RecommendRequest::new("ninja");

        let a = fuse(&artifacts, base_query(), &partial).unwrap();
        let b = fuse(&artifacts, base_query(), &none).unwrap();

        assert_eq!(a.families, b.families);
        assert_eq!(a.query, b.query);
        assert_eq!(a.catalog.cols(), b.catalog.cols());
    }

    #[test]
    fn full_numeric_family_extends_both_sides() {
        let artifacts = store();
        let request = RecommendRequest::new("ninja")
            .with_min_score(8.0)
            .with_min_members(10_000)
            .with_year(2002);
        let fused = fuse(&artifacts, base_query(), &request).unwrap();

        assert!(fused.families.numeric);
        assert_eq!(fused.query.len(), 4 + 3);
        assert_eq!(fused.catalog.cols(), 4 + 3);
    }

    #[test]
    fn both_families_keep_genre_before_numeric() {
        let artifacts = store();
        let request = RecommendRequest::new("ninja")
            .with_genres(vec!["Action".to_string()])
            .with_min_score(8.0)
            .with_min_members(10_000)
            .with_year(2002);
        let fused = fuse(&artifacts, base_query(), &request).unwrap();

        assert_eq!(fused.query.len(), 4 + 2 + 3);
        assert_eq!(fused.catalog.cols(), 4 + 2 + 3);
        // Catalog row 0: ensemble block, then genre row, then numeric row.
        assert_eq!(
            fused.catalog.row(0),
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.1, 0.2, 0.3]
        );
    }
}
