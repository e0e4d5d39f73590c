//! Fitted TF-IDF vectorizer.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::error::{OsusumeError, Result};

/// Word token pattern: two or more word characters.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

#[derive(Debug, Deserialize)]
struct TfidfParams {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

/// A fitted TF-IDF vectorizer, transform side only.
///
/// The transform reproduces the fitting library's defaults: lowercase the
/// input, tokenize on `\b\w\w+\b`, multiply term counts by the frozen idf
/// weights, then L2-normalize the resulting vector.
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Builds a vectorizer from frozen parameters.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::ArtifactFormat` if the vocabulary and idf
    /// weights disagree, or if any vocabulary index is out of range.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f32>) -> Result<Self> {
        if vocabulary.len() != idf.len() {
            return Err(OsusumeError::ArtifactFormat(format!(
                "tfidf vocabulary has {} terms but {} idf weights",
                vocabulary.len(),
                idf.len()
            )));
        }
        if let Some((term, &index)) = vocabulary.iter().find(|(_, &i)| i >= idf.len()) {
            return Err(OsusumeError::ArtifactFormat(format!(
                "tfidf term {term:?} maps to column {index}, out of range"
            )));
        }

        let token_pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| OsusumeError::ArtifactFormat(format!("tfidf token pattern: {e}")))?;

        Ok(Self {
            vocabulary,
            idf,
            token_pattern,
        })
    }

    /// Loads frozen parameters from the JSON artifact.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::MissingArtifact` if the file does not exist and
    /// `OsusumeError::ArtifactFormat` on inconsistent parameters.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OsusumeError::MissingArtifact {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        let params: TfidfParams = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| OsusumeError::ArtifactFormat(format!("{}: {e}", path.display())))?;
        Self::new(params.vocabulary, params.idf)
    }

    /// Output vector width (vocabulary size).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Transforms a query into its dense TF-IDF vector.
    #[must_use]
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        let mut vector = vec![0.0f32; self.idf.len()];

        for token in self.token_pattern.find_iter(&lowered) {
            if let Some(&index) = self.vocabulary.get(token.as_str()) {
                vector[index] += 1.0;
            }
        }

        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}
