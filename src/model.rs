//! Masked language model boundary.
//!
//! The corrector talks to its language model only through the
//! [`MaskedLanguageModel`] trait: encode a sentence into vocabulary ids, score
//! the vocabulary at one position, and decode ids back to text. The
//! [`CandidateGenerator`](generator::CandidateGenerator) builds candidate
//! lists on top of it.
//!
//! A DistilBERT implementation backed by Candle is available with the
//! `candle` feature; [`load_model`] returns an error naming the feature when
//! the crate was built without it.
//!
//! # Custom implementation
//!
//! ```
//! use transspell::error::Result;
//! use transspell::model::MaskedLanguageModel;
//!
//! /// Scores every vocabulary entry equally.
//! struct Uniform {
//!     vocabulary: Vec<String>,
//! }
//!
//! impl MaskedLanguageModel for Uniform {
//!     fn mask_token(&self) -> &str {
//!         "[MASK]"
//!     }
//!
//!     fn mask_token_id(&self) -> u32 {
//!         0
//!     }
//!
//!     fn encode(&self, text: &str) -> Result<Vec<u32>> {
//!         Ok(text
//!             .split(' ')
//!             .map(|word| {
//!                 self.vocabulary
//!                     .iter()
//!                     .position(|entry| entry == word)
//!                     .unwrap_or(0) as u32
//!             })
//!             .collect())
//!     }
//!
//!     fn mask_logits(&self, _input_ids: &[u32], _position: usize) -> Result<Vec<f32>> {
//!         Ok(vec![0.0; self.vocabulary.len()])
//!     }
//!
//!     fn decode(&self, ids: &[u32]) -> Result<String> {
//!         Ok(ids
//!             .iter()
//!             .map(|&id| self.vocabulary[id as usize].as_str())
//!             .collect::<Vec<_>>()
//!             .join(" "))
//!     }
//! }
//! ```

pub mod generator;

#[cfg(feature = "candle")]
pub mod candle;

use std::sync::Arc;

use crate::config::ModelConfig;
use crate::error::Result;

pub use generator::{CandidateGenerator, DEFAULT_TOP_N};

/// A pretrained masked language model together with its tokenizer.
pub trait MaskedLanguageModel: Send + Sync {
    /// Get the name/identifier of this model.
    fn name(&self) -> &str {
        "unknown"
    }

    /// The placeholder text that marks the position to predict.
    fn mask_token(&self) -> &str;

    /// The vocabulary id of the mask placeholder.
    fn mask_token_id(&self) -> u32;

    /// Encode text into the model's input ids, including special tokens.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Run the model and return the vocabulary scores at `position`.
    ///
    /// The returned vector is indexed by vocabulary id.
    fn mask_logits(&self, input_ids: &[u32], position: usize) -> Result<Vec<f32>>;

    /// Decode vocabulary ids back into text.
    fn decode(&self, ids: &[u32]) -> Result<String>;
}

/// Load the configured pretrained model.
#[cfg(feature = "candle")]
pub fn load_model(config: &ModelConfig) -> Result<Arc<dyn MaskedLanguageModel>> {
    Ok(Arc::new(candle::CandleMaskedLm::load(config)?))
}

/// Load the configured pretrained model.
#[cfg(not(feature = "candle"))]
pub fn load_model(config: &ModelConfig) -> Result<Arc<dyn MaskedLanguageModel>> {
    Err(crate::error::TransSpellError::missing_feature(
        "candle",
        &config.model_id,
    ))
}

#[cfg(all(test, not(feature = "candle")))]
mod tests {
    use super::*;
    use crate::error::TransSpellError;

    #[test]
    fn test_load_model_without_backend() {
        let result = load_model(&ModelConfig::default());
        match result {
            Err(TransSpellError::Model(message)) => assert!(message.contains("candle")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("loading must fail without the candle feature"),
        }
    }
}
