//! Data directory layout and model identifiers.

use std::path::PathBuf;

/// Default remote location of the ensemble embedding matrix.
pub const DEFAULT_EMBEDDINGS_URL: &str =
    "https://f002.backblazeb2.com/file/osusume-artifacts/anime_ensemble_embeddings.npy";

/// Sentence embedding model resolved through the Hugging Face hub.
pub const SENTENCE_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Masked-language transformer whose CLS hidden state feeds the ensemble.
pub const MASKED_MODEL: &str = "bert-base-uncased";

/// Artifact file names inside the data directory.
pub const METADATA_FILE: &str = "anime_metadata.json";
pub const EMBEDDINGS_FILE: &str = "anime_ensemble_embeddings.npy";
pub const GENRE_VECS_FILE: &str = "anime_genre_vecs.npy";
pub const NUMERIC_VECS_FILE: &str = "anime_numeric_vecs.npy";
pub const TFIDF_FILE: &str = "tfidf_vectorizer.json";
pub const BINARIZER_FILE: &str = "genre_binarizer.json";
pub const SCALER_FILE: &str = "numeric_scaler.json";

/// Default data directory (`<platform data dir>/osusume`).
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("osusume")
}

/// Where artifacts live and which pretrained models to pull.
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Directory holding all local artifacts.
    pub data_dir: PathBuf,
    /// Remote URL for the ensemble embedding matrix.
    pub embeddings_url: String,
    /// Hub id of the sentence embedding model.
    pub sentence_model: String,
    /// Hub id of the masked transformer model (and its tokenizer).
    pub masked_model: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            embeddings_url: DEFAULT_EMBEDDINGS_URL.to_string(),
            sentence_model: SENTENCE_MODEL.to_string(),
            masked_model: MASKED_MODEL.to_string(),
        }
    }
}

impl DataConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the remote embeddings URL.
    pub fn with_embeddings_url(mut self, url: impl Into<String>) -> Self {
        self.embeddings_url = url.into();
        self
    }

    fn artifact(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    /// Path of the catalog metadata table.
    #[must_use]
    pub fn metadata_path(&self) -> PathBuf {
        self.artifact(METADATA_FILE)
    }

    /// Path of the ensemble embedding matrix.
    #[must_use]
    pub fn embeddings_path(&self) -> PathBuf {
        self.artifact(EMBEDDINGS_FILE)
    }

    /// Path of the genre indicator matrix.
    #[must_use]
    pub fn genre_vecs_path(&self) -> PathBuf {
        self.artifact(GENRE_VECS_FILE)
    }

    /// Path of the scaled numeric feature matrix.
    #[must_use]
    pub fn numeric_vecs_path(&self) -> PathBuf {
        self.artifact(NUMERIC_VECS_FILE)
    }

    /// Path of the fitted TF-IDF vectorizer.
    #[must_use]
    pub fn tfidf_path(&self) -> PathBuf {
        self.artifact(TFIDF_FILE)
    }

    /// Path of the fitted genre binarizer.
    #[must_use]
    pub fn binarizer_path(&self) -> PathBuf {
        self.artifact(BINARIZER_FILE)
    }

    /// Path of the fitted numeric scaler.
    #[must_use]
    pub fn scaler_path(&self) -> PathBuf {
        self.artifact(SCALER_FILE)
    }

    /// All local artifact paths, in load order.
    pub fn artifact_paths(&self) -> Vec<PathBuf> {
        vec![
            self.metadata_path(),
            self.embeddings_path(),
            self.genre_vecs_path(),
            self.numeric_vecs_path(),
            self.tfidf_path(),
            self.binarizer_path(),
            self.scaler_path(),
        ]
    }
}
