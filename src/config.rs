//! Configuration for the spelling corrector.
//!
//! [`TransSpellConfig`] carries every tunable of detection and correction.
//! All fields have defaults, so a JSON configuration file only needs the
//! fields it changes:
//!
//! ```json
//! {
//!     "min_token_length": 4,
//!     "corpus_path": "data/answers.csv",
//!     "model": { "model_id": "distilbert-base-uncased" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransSpellError};
use crate::spelling::frequency::DEFAULT_ANSWERS_COLUMN;
use crate::spelling::lexicon::{LexiconSource, default_sources};

/// Directory the default Hunspell dictionaries are read from.
pub const DEFAULT_DICTIONARY_DIR: &str = "dictionaries";

/// How the corrector chooses the tokens it masks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionMode {
    /// Mask every token except the first one and stop words.
    #[default]
    Contextual,
    /// Additionally require the rule-based error detector to flag the token.
    Gated,
}

/// Configuration of the pretrained masked language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// HuggingFace model identifier.
    pub model_id: String,
    /// Repository revision (branch, tag or commit).
    pub revision: String,
    /// Text of the mask placeholder in the model's vocabulary.
    pub mask_token: String,
    /// Cache directory for downloaded files (HuggingFace default when unset).
    pub cache_dir: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            model_id: "distilbert-base-cased".to_string(),
            revision: "main".to_string(),
            mask_token: "[MASK]".to_string(),
            cache_dir: None,
        }
    }
}

/// Configuration for [`TransSpell`](crate::spelling::corrector::TransSpell).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransSpellConfig {
    /// Cleaned tokens this short or shorter are never errors.
    pub min_token_length: usize,
    /// Tokens occurring more often than this in the corpus are never errors.
    pub max_frequency: u64,
    /// CSV corpus used to build the frequency list.
    pub corpus_path: Option<PathBuf>,
    /// Corpus column holding answer text.
    pub corpus_column: String,
    /// Candidates requested for every masked position while correcting.
    pub candidate_count: usize,
    /// Which tokens the corrector masks.
    pub mode: CorrectionMode,
    /// File with one stop word per line; the built-in English list when unset.
    pub stop_words: Option<PathBuf>,
    /// The two lexicons consulted by the dictionary oracle.
    pub lexicons: Vec<LexiconSource>,
    /// The masked language model.
    pub model: ModelConfig,
}

impl Default for TransSpellConfig {
    fn default() -> Self {
        TransSpellConfig {
            min_token_length: 3,
            max_frequency: 10,
            corpus_path: None,
            corpus_column: DEFAULT_ANSWERS_COLUMN.to_string(),
            candidate_count: 25,
            mode: CorrectionMode::default(),
            stop_words: None,
            lexicons: default_sources(DEFAULT_DICTIONARY_DIR).to_vec(),
            model: ModelConfig::default(),
        }
    }
}

impl TransSpellConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: TransSpellConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check the configuration for values the corrector cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.candidate_count == 0 {
            return Err(TransSpellError::invalid_config(
                "candidate_count must be at least 1",
            ));
        }
        if self.lexicons.len() != 2 {
            return Err(TransSpellError::invalid_config(format!(
                "exactly two lexicons are required, got {}",
                self.lexicons.len()
            )));
        }
        if self.corpus_column.is_empty() {
            return Err(TransSpellError::invalid_config(
                "corpus_column must not be empty",
            ));
        }
        Ok(())
    }

    /// Use the given corpus for the frequency list.
    pub fn with_corpus<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.corpus_path = Some(path.into());
        self
    }

    /// Use the given lexicons.
    pub fn with_lexicons(mut self, primary: LexiconSource, secondary: LexiconSource) -> Self {
        self.lexicons = vec![primary, secondary];
        self
    }

    /// Use the given correction mode.
    pub fn with_mode(mut self, mode: CorrectionMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = TransSpellConfig::default();
        assert_eq!(config.min_token_length, 3);
        assert_eq!(config.max_frequency, 10);
        assert_eq!(config.candidate_count, 25);
        assert_eq!(config.corpus_column, "answers");
        assert_eq!(config.mode, CorrectionMode::Contextual);
        assert!(config.corpus_path.is_none());
        assert_eq!(config.lexicons.len(), 2);
        assert_eq!(config.model.model_id, "distilbert-base-cased");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TransSpellConfig =
            serde_json::from_str(r#"{"min_token_length": 4, "mode": "gated"}"#).unwrap();
        assert_eq!(config.min_token_length, 4);
        assert_eq!(config.mode, CorrectionMode::Gated);
        assert_eq!(config.max_frequency, 10);
        assert_eq!(config.model.mask_token, "[MASK]");
    }

    #[test]
    fn test_validation() {
        let config = TransSpellConfig {
            candidate_count: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TransSpellError::Config(_))));

        let mut config = TransSpellConfig::default();
        config.lexicons.pop();
        assert!(matches!(config.validate(), Err(TransSpellError::Config(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transspell.json");

        let config = TransSpellConfig::default()
            .with_corpus("answers.csv")
            .with_mode(CorrectionMode::Gated);
        config.save(&path).unwrap();

        let loaded = TransSpellConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"candidate_count": 0}"#).unwrap();
        assert!(TransSpellConfig::from_file(&path).is_err());
    }
}
