//! Stop word lists.
//!
//! Stop words are high-frequency function words that the corrector never
//! masks or replaces. Matching is exact and case-sensitive against the raw
//! token, so `"the"` is a stop word while `"The"` and `"the,"` are not.
//!
//! # Examples
//!
//! ```
//! use transspell::analysis::stop::StopWords;
//!
//! let stop_words = StopWords::english();
//! assert!(stop_words.contains("the"));
//! assert!(stop_words.contains("don't"));
//! assert!(!stop_words.contains("The"));
//! assert!(!stop_words.contains("customer"));
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use ahash::AHashSet;
use lazy_static::lazy_static;

use crate::error::Result;

/// Default English stop words (the NLTK English list).
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

lazy_static! {
    static ref ENGLISH: Arc<AHashSet<String>> = Arc::new(
        DEFAULT_ENGLISH_STOP_WORDS
            .iter()
            .map(|word| word.to_string())
            .collect()
    );
}

/// A set of stop words.
#[derive(Clone, Debug)]
pub struct StopWords {
    words: Arc<AHashSet<String>>,
}

impl StopWords {
    /// The built-in English stop word list.
    pub fn english() -> Self {
        StopWords {
            words: Arc::clone(&ENGLISH),
        }
    }

    /// Create a stop word set from custom words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopWords {
            words: Arc::new(words.into_iter().map(Into::into).collect()),
        }
    }

    /// Load stop words from a file with one word per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut words = AHashSet::new();

        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() && !word.starts_with('#') {
                words.insert(word.to_string());
            }
        }

        Ok(StopWords {
            words: Arc::new(words),
        })
    }

    /// Check if a raw token is a stop word.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}
