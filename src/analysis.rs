//! Text analysis for spelling correction.
//!
//! Splitting sentences into tokens, cleaning tokens into their comparison
//! form, and the stop word lists that exclude tokens from correction.

pub mod cleaner;
pub mod stop;
pub mod token;

pub use cleaner::clean_token;
pub use stop::StopWords;
pub use token::{Sentence, Token};
