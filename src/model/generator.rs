//! Candidate generation for a masked position.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::error::{Result, TransSpellError};
use crate::model::MaskedLanguageModel;

/// Number of candidates returned when the caller has no preference.
pub const DEFAULT_TOP_N: usize = 5;

/// Produces ranked candidate ids for the masked position of a sentence.
#[derive(Clone)]
pub struct CandidateGenerator {
    model: Arc<dyn MaskedLanguageModel>,
}

impl CandidateGenerator {
    /// Create a generator over a shared model.
    pub fn new(model: Arc<dyn MaskedLanguageModel>) -> Self {
        CandidateGenerator { model }
    }

    /// Get the underlying model.
    pub fn model(&self) -> &Arc<dyn MaskedLanguageModel> {
        &self.model
    }

    /// The placeholder to put in the position that should be predicted.
    pub fn mask_token(&self) -> &str {
        self.model.mask_token()
    }

    /// Get up to `top_n` vocabulary ids for the masked position, best first.
    ///
    /// The sentence must contain the mask placeholder. When it contains more
    /// than one, predictions are made for the first.
    pub fn generate(&self, masked_sentence: &str, top_n: usize) -> Result<Vec<u32>> {
        let input_ids = self.model.encode(masked_sentence)?;
        let mask_id = self.model.mask_token_id();

        let mut mask_positions = input_ids
            .iter()
            .enumerate()
            .filter(|&(_, &id)| id == mask_id)
            .map(|(position, _)| position);

        let position = mask_positions.next().ok_or_else(|| {
            TransSpellError::model(format!(
                "no {} placeholder in {masked_sentence:?}",
                self.model.mask_token()
            ))
        })?;

        if mask_positions.next().is_some() {
            debug!("Multiple mask placeholders in {masked_sentence:?}; predicting the first");
        }

        let scores = self.model.mask_logits(&input_ids, position)?;
        Ok(top_k(&scores, top_n))
    }

    /// Decode a single candidate id into text.
    pub fn decode(&self, id: u32) -> Result<String> {
        self.model.decode(&[id])
    }
}

impl fmt::Debug for CandidateGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateGenerator")
            .field("model", &self.model.name())
            .finish()
    }
}

/// Indices of the `k` highest scores, highest first; ties go to the lower id.
fn top_k(scores: &[f32], k: usize) -> Vec<u32> {
    let mut ranked: Vec<(u32, f32)> = scores
        .iter()
        .enumerate()
        .map(|(id, &score)| (id as u32, score))
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked.into_iter().map(|(id, _)| id).collect()
}
