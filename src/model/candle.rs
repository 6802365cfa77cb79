//! Candle-based masked language model.
//!
//! Runs a DistilBERT masked-LM head locally with the HuggingFace Candle
//! framework. Weights, configuration and tokenizer are fetched from the
//! HuggingFace Hub (and cached) on first use. Requires the `candle` feature.

use std::fmt;
use std::fs;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::distilbert::{Config, DistilBertForMaskedLM};
use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};
use log::info;
use tokenizers::Tokenizer;

use crate::config::ModelConfig;
use crate::error::{Result, TransSpellError};
use crate::model::MaskedLanguageModel;

/// A DistilBERT masked language model and its tokenizer.
pub struct CandleMaskedLm {
    model: DistilBertForMaskedLM,
    tokenizer: Tokenizer,
    device: Device,
    model_id: String,
    mask_token: String,
    mask_token_id: u32,
}

fn model_error<E: fmt::Display>(context: &'static str) -> impl FnOnce(E) -> TransSpellError {
    move |e| TransSpellError::model(format!("{context}: {e}"))
}

impl CandleMaskedLm {
    /// Download (if not cached) and load the configured model.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        // Prefer GPU if available
        let device = Device::cuda_if_available(0).map_err(model_error("Device setup failed"))?;

        let mut builder = ApiBuilder::new();
        if let Some(cache_dir) = &config.cache_dir {
            builder = builder.with_cache_dir(cache_dir.clone());
        }
        let api = builder
            .build()
            .map_err(model_error("HF API initialization failed"))?;
        let repo = api.repo(Repo::with_revision(
            config.model_id.clone(),
            RepoType::Model,
            config.revision.clone(),
        ));

        info!("Loading {} ({})", config.model_id, config.revision);

        let config_filename = repo
            .get("config.json")
            .map_err(model_error("Config download failed"))?;
        let model_config: Config = serde_json::from_str(&fs::read_to_string(config_filename)?)?;

        let weights_filename = repo
            .get("model.safetensors")
            .map_err(model_error("Weights download failed"))?;
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_filename], DType::F32, &device)
                .map_err(model_error("VarBuilder creation failed"))?
        };
        let model = DistilBertForMaskedLM::load(vb, &model_config)
            .map_err(model_error("Model load failed"))?;

        let tokenizer_filename = repo
            .get("tokenizer.json")
            .map_err(model_error("Tokenizer download failed"))?;
        let tokenizer =
            Tokenizer::from_file(tokenizer_filename).map_err(model_error("Tokenizer load failed"))?;

        let mask_token_id = tokenizer.token_to_id(&config.mask_token).ok_or_else(|| {
            TransSpellError::model(format!(
                "{} is not in the vocabulary of {}",
                config.mask_token, config.model_id
            ))
        })?;

        Ok(CandleMaskedLm {
            model,
            tokenizer,
            device,
            model_id: config.model_id.clone(),
            mask_token: config.mask_token.clone(),
            mask_token_id,
        })
    }
}

impl fmt::Debug for CandleMaskedLm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandleMaskedLm")
            .field("model_id", &self.model_id)
            .field("device", &self.device)
            .field("mask_token", &self.mask_token)
            .finish()
    }
}

impl MaskedLanguageModel for CandleMaskedLm {
    fn name(&self) -> &str {
        &self.model_id
    }

    fn mask_token(&self) -> &str {
        &self.mask_token
    }

    fn mask_token_id(&self) -> u32 {
        self.mask_token_id
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(model_error("Tokenization failed"))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn mask_logits(&self, input_ids: &[u32], position: usize) -> Result<Vec<f32>> {
        let input = Tensor::new(input_ids, &self.device)
            .and_then(|tensor| tensor.unsqueeze(0))
            .map_err(model_error("Tensor creation failed"))?;

        // A single unpadded sentence: nothing is masked out of attention.
        let seq_len = input_ids.len();
        let attention_mask = Tensor::zeros((seq_len, seq_len), DType::U8, &self.device)
            .map_err(model_error("Attention mask creation failed"))?;

        // (batch, sequence, vocabulary)
        let logits = self
            .model
            .forward(&input, &attention_mask)
            .map_err(model_error("Model forward failed"))?;

        logits
            .get(0)
            .and_then(|sequence| sequence.get(position))
            .and_then(|scores| scores.to_dtype(DType::F32))
            .and_then(|scores| scores.to_vec1::<f32>())
            .map_err(model_error("Reading logits failed"))
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.tokenizer
            .decode(ids, false)
            .map_err(model_error("Decoding failed"))
    }
}
