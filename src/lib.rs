//! # TransSpell
//!
//! Context-sensitive spelling correction with a masked language model.
//!
//! ## Features
//!
//! - Corrects real-word errors ("We made ensure to meet ...") by asking a
//!   masked language model what fits each position
//! - Rule-based detection of non-word errors from corpus frequencies and
//!   two Hunspell dictionaries
//! - Pluggable language models and lexicons
//! - DistilBERT through Candle behind the `candle` feature
//!
//! ## Example
//!
//! ```no_run
//! use transspell::config::TransSpellConfig;
//! use transspell::spelling::TransSpell;
//!
//! # fn main() -> transspell::error::Result<()> {
//! let config = TransSpellConfig::default().with_corpus("data/answers.csv");
//! let corrector = TransSpell::from_config(config)?;
//! let corrected =
//!     corrector.correct("We made ensure to meet the customer requirements in a consistent manner.")?;
//! println!("{corrected}");
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod spelling;

pub mod prelude {
    pub use crate::analysis::{Sentence, StopWords, clean_token};
    pub use crate::config::{CorrectionMode, ModelConfig, TransSpellConfig};
    pub use crate::error::{Result, TransSpellError};
    pub use crate::model::{CandidateGenerator, MaskedLanguageModel};
    pub use crate::spelling::{
        Correction, CorrectionReport, DictionaryOracle, ErrorDetector, FrequencyIndex,
        FrequencyTable, Lexicon, LexiconSource, TransSpell,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
