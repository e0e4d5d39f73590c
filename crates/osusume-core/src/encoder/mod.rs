//! # Model Loader & Query Encoder
//!
//! Instantiates the pretrained text encoders exactly once per process and
//! turns a query string into the ensemble vector: sentence-embedding block,
//! then TF-IDF block, then transformer CLS block, concatenated in that fixed
//! order to mirror the catalog-side matrix layout.

pub mod cls;
pub mod sentence;

pub use cls::ClsEncoder;
pub use sentence::SentenceEncoder;

use std::path::PathBuf;

use serde::Deserialize;

use crate::config::DataConfig;
use crate::error::{OsusumeError, Result};
use crate::preprocess::TfidfVectorizer;

/// Files every hub-hosted BERT-family model ships with.
pub(crate) struct HubFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

/// Resolves a model through the Hugging Face hub, downloading on first use.
pub(crate) fn hub_fetch(model_id: &str) -> Result<HubFiles> {
    use hf_hub::api::sync::Api;
    use hf_hub::{Repo, RepoType};

    let api = Api::new().map_err(|e| OsusumeError::ModelLoad(e.to_string()))?;
    let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

    let fetch = |file: &str| {
        repo.get(file)
            .map_err(|e| OsusumeError::ModelLoad(format!("{model_id}/{file}: {e}")))
    };

    Ok(HubFiles {
        config: fetch("config.json")?,
        tokenizer: fetch("tokenizer.json")?,
        weights: fetch("model.safetensors")?,
    })
}

/// The one config field the encoders need beyond what candle parses.
#[derive(Debug, Deserialize)]
pub(crate) struct HiddenSize {
    pub hidden_size: usize,
}

/// Both pretrained encoders, loaded once and reused for every request.
pub struct QueryEncoder {
    sentence: SentenceEncoder,
    cls: ClsEncoder,
}

impl QueryEncoder {
    /// Loads the sentence and masked-transformer encoders named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::ModelLoad` if either model cannot be resolved
    /// or its weights fail to load. There is no offline fallback.
    pub fn load(config: &DataConfig) -> Result<Self> {
        let sentence = SentenceEncoder::load(&config.sentence_model)?;
        let cls = ClsEncoder::load(&config.masked_model)?;
        Ok(Self { sentence, cls })
    }

    /// Ensemble width for a given fitted TF-IDF vectorizer.
    #[must_use]
    pub fn dimension(&self, tfidf: &TfidfVectorizer) -> usize {
        self.sentence.dimension() + tfidf.dimension() + self.cls.dimension()
    }

    /// Encodes a query into its ensemble vector.
    ///
    /// Block order is fixed: sentence embedding, TF-IDF, CLS. Results are
    /// never cached across requests.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::EmptyQuery` for whitespace-only input and
    /// `OsusumeError::Inference` if either model fails.
    pub fn encode(&self, text: &str, tfidf: &TfidfVectorizer) -> Result<Vec<f32>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(OsusumeError::EmptyQuery);
        }

        let mut ensemble =
            Vec::with_capacity(self.sentence.dimension() + tfidf.dimension() + self.cls.dimension());
        ensemble.extend(self.sentence.encode(trimmed)?);
        ensemble.extend(tfidf.transform(trimmed));
        ensemble.extend(self.cls.encode(trimmed)?);
        Ok(ensemble)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_size_parses_from_model_config() {
        let json = r#"{"hidden_size": 384, "vocab_size": 30522, "model_type": "bert"}"#;
        let parsed: HiddenSize = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.hidden_size, 384);
    }
}
