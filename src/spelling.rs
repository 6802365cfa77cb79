//! Spelling error detection and correction.
//!
//! Two independent paths live here: the rule-based [`ErrorDetector`] built
//! from corpus frequencies and dictionaries, and the model-based
//! [`TransSpell`] corrector that checks every token against its context.

pub mod corrector;
pub mod detector;
pub mod frequency;
pub mod lexicon;

// Re-export commonly used types
pub use corrector::{Correction, CorrectionReport, TransSpell};
pub use detector::{DetectorConfig, ErrorDetector};
pub use frequency::{FrequencyIndex, FrequencyTable};
pub use lexicon::{DictionaryOracle, Lexicon, LexiconSource};
