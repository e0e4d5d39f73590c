//! # Recommender
//!
//! The facade tying the pipeline together: artifacts and encoders are loaded
//! once at construction, then every request runs encode → fuse → rank over
//! the read-only state.

use tracing::debug;

use crate::artifacts::ArtifactStore;
use crate::config::DataConfig;
use crate::encoder::QueryEncoder;
use crate::error::{OsusumeError, Result};
use crate::fusion;
use crate::rank;
use crate::types::{Recommendation, RecommendRequest};

/// The full recommendation pipeline behind one read-only value.
///
/// Construct once at startup and share by reference; nothing in here mutates
/// after load, so concurrent readers need no coordination.
pub struct Recommender {
    artifacts: ArtifactStore,
    encoder: QueryEncoder,
}

impl Recommender {
    /// Loads all artifacts and both pretrained encoders.
    ///
    /// Verifies that the catalog's ensemble matrix width equals the width the
    /// encoders will produce for queries; a mismatch means the artifacts were
    /// built against different models and every similarity would be garbage.
    ///
    /// # Errors
    ///
    /// Any artifact or model failure is fatal here — there is no partial
    /// serving mode.
    pub fn new(config: &DataConfig) -> Result<Self> {
        let artifacts = ArtifactStore::load(config)?;
        let encoder = QueryEncoder::load(config)?;

        let expected = encoder.dimension(&artifacts.tfidf);
        if artifacts.embeddings.cols() != expected {
            return Err(OsusumeError::ArtifactFormat(format!(
                "ensemble matrix has {} columns but the configured encoders produce {expected}",
                artifacts.embeddings.cols()
            )));
        }

        Ok(Self { artifacts, encoder })
    }

    /// The fitted genre vocabulary, in column order.
    #[must_use]
    pub fn genres(&self) -> &[String] {
        self.artifacts.binarizer.classes()
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn catalog_len(&self) -> usize {
        self.artifacts.catalog.len()
    }

    /// Runs one recommendation request through the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::EmptyQuery` for whitespace-only queries and
    /// propagates encoder or artifact faults otherwise.
    pub fn recommend(&self, request: &RecommendRequest) -> Result<Vec<Recommendation>> {
        let ensemble = self.encoder.encode(&request.query, &self.artifacts.tfidf)?;
        rank_catalog(&self.artifacts, ensemble, request)
    }
}

/// Fuses and ranks an already-encoded query against the catalog.
///
/// Split from [`Recommender::recommend`] so the fusion and ranking semantics
/// are exercisable without pretrained models.
pub(crate) fn rank_catalog(
    artifacts: &ArtifactStore,
    ensemble_query: Vec<f32>,
    request: &RecommendRequest,
) -> Result<Vec<Recommendation>> {
    let fused = fusion::fuse(artifacts, ensemble_query, request)?;
    debug!(
        query_dim = fused.query.len(),
        catalog_dim = fused.catalog.cols(),
        genre = fused.families.genre,
        numeric = fused.families.numeric,
        "fused request"
    );

    let top = rank::cosine_top_k(&fused.query, &fused.catalog, request.top_k)?;
    Ok(top
        .into_iter()
        .filter_map(|(index, similarity)| {
            artifacts
                .catalog
                .get(index)
                .map(|entry| Recommendation::from_entry(entry, similarity))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::EmbeddingMatrix;
    use crate::preprocess::{GenreBinarizer, NumericScaler, TfidfVectorizer};
    use crate::types::{Catalog, CatalogEntry};
    use std::collections::HashMap;

    const GENRES: [&str; 3] = ["Action", "Adventure", "Drama"];

    fn entry(title: &str, genres: &[&str]) -> CatalogEntry {
        CatalogEntry {
            title: title.to_string(),
            title_english: None,
            score: 8.0,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            url: format!("https://example.org/{title}"),
            image_url: format!("https://example.org/{title}.jpg"),
            members: Some(500_000),
            year: Some(2002),
        }
    }

    /// Six catalog rows spread over unit directions in a 6-dim ensemble
    /// space, so every query has an unambiguous nearest row.
    fn store() -> ArtifactStore {
        let rows = 6;
        let mut embeddings = Vec::new();
        for i in 0..rows {
            let mut row = vec![0.0f32; rows];
            row[i] = 1.0;
            embeddings.push(row);
        }

        ArtifactStore {
            catalog: Catalog::new(vec![
                entry("naruto", &["Action", "Adventure"]),
                entry("one-piece", &["Action", "Adventure"]),
                entry("monster", &["Drama"]),
                entry("mushishi", &["Drama"]),
                entry("bebop", &["Action", "Drama"]),
                entry("hxh", &["Action", "Adventure"]),
            ]),
            embeddings: EmbeddingMatrix::from_rows(embeddings).unwrap(),
            genre_vecs: EmbeddingMatrix::from_rows(vec![
                vec![1.0, 1.0, 0.0],
                vec![1.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
                vec![0.0, 0.0, 1.0],
                vec![1.0, 0.0, 1.0],
                vec![1.0, 1.0, 0.0],
            ])
            .unwrap(),
            numeric_vecs: EmbeddingMatrix::from_rows(vec![vec![0.5, 0.5, 0.5]; 6]).unwrap(),
            tfidf: TfidfVectorizer::new(HashMap::from([("ninja".to_string(), 0)]), vec![1.0])
                .unwrap(),
            binarizer: GenreBinarizer::new(GENRES.iter().map(|g| g.to_string()).collect())
                .unwrap(),
            scaler: NumericScaler::new(vec![5.0, 250_000.0, 2000.0], vec![2.0, 250_000.0, 10.0])
                .unwrap(),
        }
    }

    fn query_towards(row: usize) -> Vec<f32> {
        let mut q = vec![0.05f32; 6];
        q[row] = 1.0;
        q
    }

    #[test]
    fn top_k_rows_descending_with_vocabulary_genres() {
        let artifacts = store();
        let request = RecommendRequest::new("a ninja boy seeking recognition");
        let results = rank_catalog(&artifacts, query_towards(0), &request).unwrap();

        assert_eq!(results.len(), 5);
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
        assert_eq!(results[0].title, "naruto");
        for rec in &results {
            for genre in &rec.genres {
                assert!(GENRES.contains(&genre.as_str()));
            }
        }
    }

    #[test]
    fn repeated_request_is_bit_identical() {
        let artifacts = store();
        let request = RecommendRequest::new("space bounty hunters")
            .with_genres(vec!["Drama".to_string()])
            .with_min_score(8.5)
            .with_min_members(400_000)
            .with_year(1998);

        let a = rank_catalog(&artifacts, query_towards(4), &request).unwrap();
        let b = rank_catalog(&artifacts, query_towards(4), &request).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn genre_family_shifts_ranking() {
        let artifacts = store();
        // Equidistant query in ensemble space: genre block decides.
        let flat = vec![0.1f32; 6];

        let drama = RecommendRequest::new("anything").with_genres(vec!["Drama".to_string()]);
        let results = rank_catalog(&artifacts, flat, &drama).unwrap();
        assert!(results[0].genres.contains(&"Drama".to_string()));
    }

    #[test]
    fn top_k_larger_than_catalog_returns_all() {
        let artifacts = store();
        let request = RecommendRequest::new("anything").with_top_k(50);
        let results = rank_catalog(&artifacts, query_towards(2), &request).unwrap();
        assert_eq!(results.len(), 6);
    }

    #[test]
    fn results_carry_catalog_fields() {
        let artifacts = store();
        let request = RecommendRequest::new("anything").with_top_k(1);
        let results = rank_catalog(&artifacts, query_towards(3), &request).unwrap();

        let top = &results[0];
        assert_eq!(top.title, "mushishi");
        assert_eq!(top.url, "https://example.org/mushishi");
        assert_eq!(top.image_url, "https://example.org/mushishi.jpg");
        assert!(top.similarity > 0.0);
    }
}
