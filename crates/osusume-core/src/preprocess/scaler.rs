//! Fitted standard scaler for the numeric feature family.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{OsusumeError, Result};

#[derive(Debug, Deserialize)]
struct ScalerParams {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

/// A fitted per-column standard scaler: `(x - mean) / scale`.
///
/// Columns are {score, members, year} in that order. A zero scale (constant
/// column at fit time) divides by 1 instead, matching the fitting library.
pub struct NumericScaler {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl NumericScaler {
    /// Builds a scaler from frozen parameters.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::ArtifactFormat` if mean and scale disagree on
    /// width or are empty.
    pub fn new(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self> {
        if mean.is_empty() || mean.len() != scale.len() {
            return Err(OsusumeError::ArtifactFormat(format!(
                "numeric scaler has {} means and {} scales",
                mean.len(),
                scale.len()
            )));
        }
        Ok(Self { mean, scale })
    }

    /// Loads frozen parameters from the JSON artifact.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::MissingArtifact` if the file does not exist and
    /// `OsusumeError::ArtifactFormat` on bad content.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OsusumeError::MissingArtifact {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        let params: ScalerParams = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| OsusumeError::ArtifactFormat(format!("{}: {e}", path.display())))?;
        Self::new(params.mean, params.scale)
    }

    /// Number of scaled columns.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Scales one raw feature row.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::ArtifactFormat` if `values` does not match the
    /// fitted width.
    pub fn transform(&self, values: &[f32]) -> Result<Vec<f32>> {
        if values.len() != self.mean.len() {
            return Err(OsusumeError::ArtifactFormat(format!(
                "numeric scaler fitted on {} columns, got {}",
                self.mean.len(),
                values.len()
            )));
        }

        Ok(values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (&mean, &scale))| {
                let divisor = if scale == 0.0 { 1.0 } else { scale };
                (x - mean) / divisor
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_centers_and_scales() {
        let scaler = NumericScaler::new(vec![5.0, 100.0, 2000.0], vec![2.0, 50.0, 10.0]).unwrap();
        let out = scaler.transform(&[7.0, 150.0, 1990.0]).unwrap();
        assert_eq!(out, vec![1.0, 1.0, -1.0]);
    }

    #[test]
    fn zero_scale_divides_by_one() {
        let scaler = NumericScaler::new(vec![1.0], vec![0.0]).unwrap();
        let out = scaler.transform(&[3.0]).unwrap();
        assert_eq!(out, vec![2.0]);
    }

    #[test]
    fn width_mismatch_rejected() {
        let scaler = NumericScaler::new(vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0]).unwrap();
        assert!(scaler.transform(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn inconsistent_params_rejected() {
        assert!(NumericScaler::new(vec![0.0], vec![1.0, 2.0]).is_err());
        assert!(NumericScaler::new(Vec::new(), Vec::new()).is_err());
    }
}
