//! # Artifact Loader
//!
//! Loads every frozen artifact into memory at startup: the catalog metadata
//! table, the three feature matrices and the three fitted preprocessors.
//! The large embedding matrix is fetched from its remote location on first
//! run. Everything here is read-only after load.

pub mod download;
pub mod matrix;

pub use download::ensure_embeddings;
pub use matrix::EmbeddingMatrix;

use tracing::info;

use crate::config::DataConfig;
use crate::error::{OsusumeError, Result};
use crate::preprocess::{GenreBinarizer, NumericScaler, TfidfVectorizer};
use crate::types::Catalog;

/// All frozen artifacts, loaded and cross-validated.
pub struct ArtifactStore {
    /// Catalog metadata table, row-aligned with every matrix.
    pub catalog: Catalog,
    /// Base ensemble embedding matrix (sentence ++ tfidf ++ cls blocks).
    pub embeddings: EmbeddingMatrix,
    /// Multi-hot genre matrix.
    pub genre_vecs: EmbeddingMatrix,
    /// Scaled numeric feature matrix.
    pub numeric_vecs: EmbeddingMatrix,
    /// Fitted TF-IDF vectorizer.
    pub tfidf: TfidfVectorizer,
    /// Fitted genre binarizer.
    pub binarizer: GenreBinarizer,
    /// Fitted numeric scaler.
    pub scaler: NumericScaler,
}

impl ArtifactStore {
    /// Loads all artifacts, downloading the embedding matrix if absent.
    ///
    /// # Errors
    ///
    /// Any missing, unfetchable or malformed artifact is fatal; the error
    /// names the offending file. There is no partial mode.
    pub fn load(config: &DataConfig) -> Result<Self> {
        let embeddings_path = ensure_embeddings(config)?;

        let catalog = Catalog::load(&config.metadata_path())?;
        let embeddings = EmbeddingMatrix::load_npy(&embeddings_path)?;
        let genre_vecs = EmbeddingMatrix::load_npy(&config.genre_vecs_path())?;
        let numeric_vecs = EmbeddingMatrix::load_npy(&config.numeric_vecs_path())?;
        let tfidf = TfidfVectorizer::load(&config.tfidf_path())?;
        let binarizer = GenreBinarizer::load(&config.binarizer_path())?;
        let scaler = NumericScaler::load(&config.scaler_path())?;

        let store = Self {
            catalog,
            embeddings,
            genre_vecs,
            numeric_vecs,
            tfidf,
            binarizer,
            scaler,
        };
        store.validate()?;

        info!(
            entries = store.catalog.len(),
            ensemble_dim = store.embeddings.cols(),
            genres = store.binarizer.dimension(),
            "artifacts loaded"
        );
        Ok(store)
    }

    /// Cross-checks row counts and feature widths between artifacts.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::ArtifactFormat` naming the first artifact whose
    /// shape disagrees with the catalog or its fitted preprocessor.
    pub fn validate(&self) -> Result<()> {
        let entries = self.catalog.len();
        for (name, matrix) in [
            ("ensemble embeddings", &self.embeddings),
            ("genre vectors", &self.genre_vecs),
            ("numeric vectors", &self.numeric_vecs),
        ] {
            if matrix.rows() != entries {
                return Err(OsusumeError::ArtifactFormat(format!(
                    "{name} matrix has {} rows, catalog has {entries}",
                    matrix.rows()
                )));
            }
        }

        if self.genre_vecs.cols() != self.binarizer.dimension() {
            return Err(OsusumeError::ArtifactFormat(format!(
                "genre matrix has {} columns, binarizer vocabulary has {}",
                self.genre_vecs.cols(),
                self.binarizer.dimension()
            )));
        }

        if self.numeric_vecs.cols() != self.scaler.dimension() {
            return Err(OsusumeError::ArtifactFormat(format!(
                "numeric matrix has {} columns, scaler was fitted on {}",
                self.numeric_vecs.cols(),
                self.scaler.dimension()
            )));
        }

        Ok(())
    }
}
