//! Dense row-major matrix backing the catalog-side feature blocks.

use std::path::Path;

use candle_core::{DType, Tensor};

use crate::error::{OsusumeError, Result};

/// A dense `f32` matrix with one row per catalog entry.
///
/// Loaded from NumPy `.npy` artifacts and kept in flat row-major storage so
/// rows can be handed out as plain slices.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl EmbeddingMatrix {
    /// Builds a matrix from flat row-major data.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::ArtifactFormat` if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(OsusumeError::ArtifactFormat(format!(
                "matrix storage holds {} values, expected {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from equal-length rows. Test and tooling convenience.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::ArtifactFormat` on ragged input.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return Err(OsusumeError::ArtifactFormat(
                "matrix rows have unequal lengths".to_string(),
            ));
        }
        let n = rows.len();
        let data = rows.into_iter().flatten().collect();
        Self::new(n, cols, data)
    }

    /// Loads a 2-D `.npy` artifact, converting to `f32` if needed.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::MissingArtifact` if the file does not exist and
    /// `OsusumeError::ArtifactFormat` if it is not a readable 2-D array.
    pub fn load_npy(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OsusumeError::MissingArtifact {
                path: path.to_path_buf(),
            });
        }

        let tensor = Tensor::read_npy(path)
            .map_err(|e| OsusumeError::ArtifactFormat(format!("{}: {e}", path.display())))?;
        let tensor = tensor
            .to_dtype(DType::F32)
            .map_err(|e| OsusumeError::ArtifactFormat(format!("{}: {e}", path.display())))?;
        let (rows, cols) = tensor
            .dims2()
            .map_err(|_| {
                OsusumeError::ArtifactFormat(format!(
                    "{}: expected a 2-D array, got shape {:?}",
                    path.display(),
                    tensor.dims()
                ))
            })?;

        let data = tensor
            .flatten_all()
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| OsusumeError::ArtifactFormat(format!("{}: {e}", path.display())))?;

        Self::new(rows, cols, data)
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows()`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.cols.max(1))
    }

    /// Concatenates matrices column-wise (same row count, summed widths).
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::ArtifactFormat` if the parts disagree on row
    /// count or the list is empty.
    pub fn hstack(parts: &[&EmbeddingMatrix]) -> Result<Self> {
        let first = parts.first().ok_or_else(|| {
            OsusumeError::ArtifactFormat("hstack of zero matrices".to_string())
        })?;
        let rows = first.rows;
        if parts.iter().any(|m| m.rows != rows) {
            return Err(OsusumeError::ArtifactFormat(
                "hstack parts disagree on row count".to_string(),
            ));
        }

        let cols: usize = parts.iter().map(|m| m.cols).sum();
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for part in parts {
                data.extend_from_slice(part.row(i));
            }
        }
        Self::new(rows, cols, data)
    }
}
