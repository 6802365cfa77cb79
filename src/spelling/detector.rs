//! Rule-based, context-free error detection.
//!
//! The detector looks at one token at a time and never at its neighbours, so
//! it only catches non-word errors ("recieve"), not real-word errors ("made
//! ensure"). Rules are applied in order and the first one that clears the
//! token wins:
//!
//! 1. tokens whose cleaned form is at most `min_token_length` characters are
//!    too short to judge;
//! 2. tokens occurring more than `max_frequency` times in the corpus are
//!    domain vocabulary;
//! 3. tokens known to either dictionary are words.
//!
//! Anything left is an error.

use std::fmt;

use log::debug;

use crate::analysis::cleaner::clean_token;
use crate::config::TransSpellConfig;
use crate::error::Result;
use crate::spelling::frequency::{FrequencyIndex, FrequencyTable};
use crate::spelling::lexicon::DictionaryOracle;

/// Thresholds used by [`ErrorDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Cleaned tokens this short or shorter are never errors.
    pub min_token_length: usize,
    /// Tokens occurring more often than this are never errors.
    pub max_frequency: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            min_token_length: 3,
            max_frequency: 10,
        }
    }
}

/// Flags tokens that are not words.
pub struct ErrorDetector {
    config: DetectorConfig,
    frequencies: Option<FrequencyTable>,
    oracle: DictionaryOracle,
}

impl ErrorDetector {
    /// Create a detector. Without a frequency table the frequency rule is skipped.
    pub fn new(
        config: DetectorConfig,
        frequencies: Option<FrequencyTable>,
        oracle: DictionaryOracle,
    ) -> Self {
        ErrorDetector {
            config,
            frequencies,
            oracle,
        }
    }

    /// Build a detector from the corrector configuration.
    ///
    /// The corpus frequency table is built now; a missing corpus file only
    /// disables the frequency rule. Dictionaries are loaded on first use.
    pub fn from_config(config: &TransSpellConfig) -> Result<Self> {
        let frequencies = match &config.corpus_path {
            Some(path) => FrequencyIndex::new()
                .with_column(config.corpus_column.as_str())
                .build(path)?,
            None => None,
        };
        let oracle = DictionaryOracle::from_sources(&config.lexicons)?;

        Ok(Self::new(
            DetectorConfig {
                min_token_length: config.min_token_length,
                max_frequency: config.max_frequency,
            },
            frequencies,
            oracle,
        ))
    }

    /// Get the detector thresholds.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Get the corpus frequency table, if one was built.
    pub fn frequencies(&self) -> Option<&FrequencyTable> {
        self.frequencies.as_ref()
    }

    /// Get the dictionary oracle.
    pub fn oracle(&self) -> &DictionaryOracle {
        &self.oracle
    }

    /// Check whether a raw token is an error.
    ///
    /// Fails only when a dictionary has to be loaded and cannot be.
    pub fn is_error(&self, token: &str) -> Result<bool> {
        let cleaned = clean_token(token);

        if cleaned.chars().count() <= self.config.min_token_length {
            return Ok(false);
        }

        if let Some(frequencies) = &self.frequencies {
            let frequency = frequencies.frequency(&cleaned);
            if frequency > self.config.max_frequency {
                debug!("{cleaned:?} is frequent in the corpus ({frequency})");
                return Ok(false);
            }
        }

        if self.oracle.is_known_word(&cleaned)? {
            return Ok(false);
        }

        debug!("{token:?} is not a known word");
        Ok(true)
    }
}

impl fmt::Debug for ErrorDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorDetector")
            .field("config", &self.config)
            .field(
                "frequencies",
                &self.frequencies.as_ref().map(|table| table.len()),
            )
            .field("oracle", &self.oracle)
            .finish()
    }
}
