//! Masked-transformer encoder (first-token hidden state).

use candle_core::{Device, IndexOp, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use tokenizers::{Tokenizer, TruncationParams};

use super::{hub_fetch, HiddenSize};
use crate::error::{OsusumeError, Result};

/// CLS-position embeddings from a masked-language transformer.
///
/// The query runs through the model with truncation at the model maximum;
/// the hidden state of the first token is the output vector, unnormalized,
/// exactly as the offline catalog embeddings were produced.
pub struct ClsEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dimension: usize,
}

impl ClsEncoder {
    /// Resolves the model through the hub and loads it onto the CPU.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::ModelLoad` on any resolution or weight-loading
    /// failure.
    pub fn load(model_id: &str) -> Result<Self> {
        let files = hub_fetch(model_id)?;
        let device = Device::Cpu;

        let config_str = std::fs::read_to_string(&files.config)?;
        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| OsusumeError::ModelLoad(format!("{model_id} config: {e}")))?;
        let hidden: HiddenSize = serde_json::from_str(&config_str)
            .map_err(|e| OsusumeError::ModelLoad(format!("{model_id} config: {e}")))?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| OsusumeError::ModelLoad(format!("{model_id} tokenizer: {e}")))?;
        tokenizer
            .with_truncation(Some(TruncationParams::default()))
            .map_err(|e| OsusumeError::ModelLoad(format!("{model_id} tokenizer: {e}")))?;
        tokenizer.with_padding(None);

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights.as_path()], DTYPE, &device)
        }
        .map_err(|e| OsusumeError::ModelLoad(e.to_string()))?;
        let model = BertModel::load(vb, &config)
            .map_err(|e| OsusumeError::ModelLoad(format!("{model_id}: {e}")))?;

        Ok(Self {
            model,
            tokenizer,
            device,
            dimension: hidden.hidden_size,
        })
    }

    /// Output vector width.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Encodes one text into its CLS-position hidden state.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::Inference` if tokenization or the forward pass
    /// fails.
    pub fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| OsusumeError::Inference(e.to_string()))?;
        let tokens = encoding.get_ids();
        if tokens.is_empty() {
            return Err(OsusumeError::Inference(
                "tokenizer produced no tokens".to_string(),
            ));
        }

        let input_ids = Tensor::new(tokens, &self.device)
            .map_err(|e| OsusumeError::Inference(e.to_string()))?
            .unsqueeze(0)
            .map_err(|e| OsusumeError::Inference(e.to_string()))?;
        let token_type_ids = input_ids
            .zeros_like()
            .map_err(|e| OsusumeError::Inference(e.to_string()))?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, None)
            .map_err(|e| OsusumeError::Inference(e.to_string()))?;

        // [1, seq, hidden] -> first-token hidden state
        hidden
            .i((0, 0))
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| OsusumeError::Inference(e.to_string()))
    }
}
