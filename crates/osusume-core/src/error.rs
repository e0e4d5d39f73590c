use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during Osusume core operations.
#[derive(Debug, Error)]
pub enum OsusumeError {
    /// The query string is empty or contains only whitespace.
    #[error("query is empty or whitespace-only")]
    EmptyQuery,

    /// A required artifact file is not present in the data directory.
    #[error("missing artifact: {path}")]
    MissingArtifact {
        /// Path that was expected to exist.
        path: PathBuf,
    },

    /// An artifact was present but did not have the expected shape or content.
    #[error("malformed artifact: {0}")]
    ArtifactFormat(String),

    /// The remote fetch of the embedding matrix failed.
    #[error("artifact download failed: {0}")]
    DownloadFailed(String),

    /// A pretrained model or tokenizer could not be resolved or loaded.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Model inference failed.
    #[error("inference error: {0}")]
    Inference(String),

    /// Query and catalog vectors disagree on width; fusion must keep both
    /// sides in lockstep, so this indicates corrupt artifacts.
    #[error("dimension mismatch: query has {query} columns, catalog has {catalog}")]
    DimensionMismatch {
        /// Fused query vector length.
        query: usize,
        /// Fused catalog matrix width.
        catalog: usize,
    },

    /// Filesystem error while reading or writing artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON artifact deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Osusume operations.
pub type Result<T> = std::result::Result<T, OsusumeError>;
