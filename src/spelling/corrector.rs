//! Context-sensitive sentence correction.
//!
//! [`TransSpell`] masks one token at a time, asks the language model what
//! belongs in the gap, and keeps the token only if the model lists it among
//! its candidates. Otherwise the token is replaced with the top candidate.
//! The first token and stop words are never touched.

use std::fmt;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::cleaner;
use crate::analysis::stop::StopWords;
use crate::analysis::token::{Sentence, TOKEN_SEPARATOR};
use crate::config::{CorrectionMode, TransSpellConfig};
use crate::error::Result;
use crate::model::{CandidateGenerator, MaskedLanguageModel, load_model};
use crate::spelling::detector::ErrorDetector;
use crate::spelling::frequency::FrequencyTable;

/// A single substitution made while correcting a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Position of the token in the sentence (0-based).
    pub position: usize,
    /// The token as it appeared in the input.
    pub original: String,
    /// The token it was replaced with.
    pub replacement: String,
}

/// Result of correcting a sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionReport {
    /// The corrected sentence.
    pub corrected: String,
    /// Substitutions in the order they were made.
    pub corrections: Vec<Correction>,
}

impl CorrectionReport {
    /// Check if any token was replaced.
    pub fn is_changed(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// Context-sensitive spelling corrector.
pub struct TransSpell {
    config: TransSpellConfig,
    stop_words: StopWords,
    detector: ErrorDetector,
    generator: CandidateGenerator,
}

impl TransSpell {
    /// Create a corrector around an already loaded language model.
    ///
    /// The corpus frequency table is built here; the dictionaries are loaded
    /// the first time a token reaches the dictionary check.
    pub fn new(config: TransSpellConfig, model: Arc<dyn MaskedLanguageModel>) -> Result<Self> {
        config.validate()?;

        let stop_words = match &config.stop_words {
            Some(path) => StopWords::load_from_file(path)?,
            None => StopWords::english(),
        };
        let detector = ErrorDetector::from_config(&config)?;

        info!(
            "TransSpell ready: model {}, {:?} mode",
            model.name(),
            config.mode
        );

        Ok(TransSpell {
            config,
            stop_words,
            detector,
            generator: CandidateGenerator::new(model),
        })
    }

    /// Create a corrector, loading the configured pretrained model.
    pub fn from_config(config: TransSpellConfig) -> Result<Self> {
        let model = load_model(&config.model)?;
        Self::new(config, model)
    }

    /// Replace the stop word list.
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &TransSpellConfig {
        &self.config
    }

    /// Get the stop words.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Get the rule-based error detector.
    pub fn detector(&self) -> &ErrorDetector {
        &self.detector
    }

    /// Get the corpus frequency table, if one was built.
    pub fn frequencies(&self) -> Option<&FrequencyTable> {
        self.detector.frequencies()
    }

    /// Get the candidate generator.
    pub fn generator(&self) -> &CandidateGenerator {
        &self.generator
    }

    /// Clean a raw token into its comparison form.
    pub fn clean_token(&self, token: &str) -> String {
        cleaner::clean_token(token)
    }

    /// Check whether a raw token is a non-word error.
    pub fn is_error(&self, token: &str) -> Result<bool> {
        self.detector.is_error(token)
    }

    /// Get up to `top_n` candidate ids for the masked position of a sentence.
    pub fn generate_candidates(&self, masked_sentence: &str, top_n: usize) -> Result<Vec<u32>> {
        self.generator.generate(masked_sentence, top_n)
    }

    /// Decode candidate ids into trimmed strings, keeping their order.
    pub fn decode_candidates(&self, ids: &[u32]) -> Result<Vec<String>> {
        ids.iter()
            .map(|&id| Ok(self.generator.decode(id)?.trim().to_string()))
            .collect()
    }

    /// Correct a sentence whose tokens are separated by single spaces.
    pub fn correct(&self, sentence: &str) -> Result<String> {
        Ok(self.correct_with_report(sentence)?.corrected)
    }

    /// Correct a sentence and report every substitution made.
    pub fn correct_with_report(&self, sentence: &str) -> Result<CorrectionReport> {
        let input = Sentence::parse(sentence);
        let mut working = input.clone();
        let mut corrections = Vec::new();

        for token in input.tokens().iter().skip(1) {
            if self.stop_words.contains(&token.text) {
                continue;
            }
            if self.config.mode == CorrectionMode::Gated && !self.detector.is_error(&token.text)? {
                continue;
            }

            // Earlier substitutions are part of the context.
            let masked = working.masked(token.position, self.generator.mask_token());
            let ids = self
                .generator
                .generate(&masked, self.config.candidate_count)?;

            if let Some(replacement) = self.choose_replacement(&token.text, &ids)? {
                debug!(
                    "Replacing {:?} at {} with {replacement:?}",
                    token.text, token.position
                );
                working.replace(token.position, &replacement);
                corrections.push(Correction {
                    position: token.position,
                    original: token.text.clone(),
                    replacement,
                });
            }
        }

        Ok(CorrectionReport {
            corrected: working.join(),
            corrections,
        })
    }

    /// Pick the replacement for `original`, or `None` to keep it.
    fn choose_replacement(&self, original: &str, ids: &[u32]) -> Result<Option<String>> {
        let target = original.to_lowercase();
        let mut top = None;

        for &id in ids {
            let candidate = self.generator.decode(id)?.trim().to_string();
            if candidate.to_lowercase() == target {
                debug!("Keeping {original:?}: listed by the model");
                return Ok(None);
            }
            top.get_or_insert(candidate);
        }

        match top {
            Some(candidate) if !candidate.contains(TOKEN_SEPARATOR) => {
                Ok(Some(candidate))
            }
            Some(candidate) => {
                debug!("Keeping {original:?}: top candidate {candidate:?} is not a single token");
                Ok(None)
            }
            None => {
                debug!("Keeping {original:?}: no candidates");
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for TransSpell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransSpell")
            .field("config", &self.config)
            .field("stop_words", &self.stop_words.len())
            .field("detector", &self.detector)
            .field("generator", &self.generator)
            .finish()
    }
}
