//! Fitted multi-label genre binarizer.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::{OsusumeError, Result};

#[derive(Debug, Deserialize)]
struct BinarizerParams {
    classes: Vec<String>,
}

/// A fitted multi-label binarizer over the genre vocabulary.
///
/// Maps a set of genre labels to a fixed-width multi-hot vector whose column
/// order is the fitted class order. Labels outside the vocabulary contribute
/// nothing and are reported via `tracing::warn`.
pub struct GenreBinarizer {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl GenreBinarizer {
    /// Builds a binarizer from the fitted class list.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::ArtifactFormat` on an empty or duplicated
    /// vocabulary.
    pub fn new(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            return Err(OsusumeError::ArtifactFormat(
                "genre binarizer has no classes".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(classes.len());
        for (i, class) in classes.iter().enumerate() {
            if index.insert(class.clone(), i).is_some() {
                return Err(OsusumeError::ArtifactFormat(format!(
                    "genre binarizer class {class:?} is duplicated"
                )));
            }
        }

        Ok(Self { classes, index })
    }

    /// Loads the fitted class list from the JSON artifact.
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
        let params: BinarizerParams = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| OsusumeError::ArtifactFormat(format!("{}: {e}", path.display())))?;
        Self::new(params.classes)
    }

    /// The fitted genre vocabulary, in column order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Output vector width.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.classes.len()
    }

    /// Transforms a label selection into its multi-hot vector.
    #[must_use]
    pub fn transform(&self, labels: &[String]) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.classes.len()];
        let mut unknown = Vec::new();

        for label in labels {
            match self.index.get(label) {
                Some(&i) => vector[i] = 1.0,
                None => unknown.push(label.as_str()),
            }
        }

        if !unknown.is_empty() {
            warn!(labels = ?unknown, "ignoring genres outside the fitted vocabulary");
        }

        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> GenreBinarizer {
        GenreBinarizer::new(vec![
            "Action".to_string(),
            "Drama".to_string(),
            "Romance".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn transform_sets_selected_columns() {
        let mlb = fixture();
        let v = mlb.transform(&["Romance".to_string(), "Action".to_string()]);
        assert_eq!(v, vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn unknown_labels_are_skipped() {
        let mlb = fixture();
        let v = mlb.transform(&["Isekai".to_string(), "Drama".to_string()]);
        assert_eq!(v, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn empty_selection_is_all_zero() {
        let mlb = fixture();
        assert!(mlb.transform(&[]).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn duplicate_class_rejected() {
        let err =
            GenreBinarizer::new(vec!["Action".to_string(), "Action".to_string()]).unwrap_err();
        assert!(err.to_string().contains("duplicated"));
    }

    #[test]
    fn empty_vocabulary_rejected() {
        assert!(GenreBinarizer::new(Vec::new()).is_err());
    }
}
