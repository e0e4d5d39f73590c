//! One-shot fetch of the ensemble embedding matrix.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::DataConfig;
use crate::error::{OsusumeError, Result};

/// Ensures the ensemble embedding artifact exists locally, downloading it
/// from the configured URL when absent.
///
/// The transfer goes through a `.part` file that is renamed into place only
/// after the body has been fully written, so an interrupted download never
/// leaves a truncated artifact behind.
///
/// # Errors
///
/// Returns `OsusumeError::DownloadFailed` on any network or HTTP failure.
/// There is no retry and no checksum verification.
pub fn ensure_embeddings(config: &DataConfig) -> Result<PathBuf> {
    let path = config.embeddings_path();
    if path.exists() {
        return Ok(path);
    }

    fs::create_dir_all(&config.data_dir)?;
    info!(url = %config.embeddings_url, "embedding matrix missing, downloading");

    let response = reqwest::blocking::get(&config.embeddings_url)
        .map_err(|e| OsusumeError::DownloadFailed(e.to_string()))?;
    if !response.status().is_success() {
        return Err(OsusumeError::DownloadFailed(format!(
            "HTTP {} from {}",
            response.status(),
            config.embeddings_url
        )));
    }

    let bytes = response
        .bytes()
        .map_err(|e| OsusumeError::DownloadFailed(e.to_string()))?;

    let part = path.with_extension("npy.part");
    fs::write(&part, &bytes)?;
    fs::rename(&part, &path)?;

    info!(path = %path.display(), bytes = bytes.len(), "embedding matrix downloaded");
    Ok(path)
}
