//! Token and sentence types used by detection and correction.
//!
//! A [`Sentence`] is the ordered list of [`Token`]s obtained by splitting the
//! input on single spaces. Splitting is deliberately literal: two consecutive
//! spaces produce an empty token, and rejoining always restores the original
//! spacing.
//!
//! # Examples
//!
//! ```
//! use transspell::analysis::token::Sentence;
//!
//! let sentence = Sentence::parse("We made ensure to meet");
//! assert_eq!(sentence.len(), 5);
//! assert_eq!(sentence.masked(2, "[MASK]"), "We made [MASK] to meet");
//! assert_eq!(sentence.join(), "We made ensure to meet");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token separator used both for splitting and for rejoining sentences.
pub const TOKEN_SEPARATOR: char = ' ';

/// A contiguous non-space substring of a sentence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The raw text content of the token
    pub text: String,

    /// The position of the token in its sentence (0-based)
    pub position: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }

    /// Get the length of the token text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// An ordered sequence of tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    /// Split text on single spaces.
    pub fn parse(text: &str) -> Self {
        let tokens = text
            .split(TOKEN_SEPARATOR)
            .enumerate()
            .map(|(position, text)| Token::new(text, position))
            .collect();

        Sentence { tokens }
    }

    /// Get the tokens of this sentence.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get the token at the given position.
    pub fn get(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the sentence has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Replace the text of the token at `position`.
    ///
    /// Positions outside the sentence are ignored.
    pub fn replace(&mut self, position: usize, text: &str) {
        if let Some(token) = self.tokens.get_mut(position) {
            token.text = text.to_string();
        }
    }

    /// Render the sentence with the token at `position` replaced by `mask`.
    pub fn masked(&self, position: usize, mask: &str) -> String {
        self.tokens
            .iter()
            .map(|token| {
                if token.position == position {
                    mask
                } else {
                    token.text.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Rejoin the tokens with single spaces.
    pub fn join(&self) -> String {
        self.tokens
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positions() {
        let sentence = Sentence::parse("the quick brown fox");
        let positions: Vec<usize> = sentence.tokens().iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
        assert_eq!(sentence.get(2).unwrap().text, "brown");
    }

    #[test]
    fn test_single_space_splitting() {
        // Double spaces yield an empty token instead of being collapsed.
        let sentence = Sentence::parse("a  b");
        assert_eq!(sentence.len(), 3);
        assert!(sentence.get(1).unwrap().is_empty());
        assert_eq!(sentence.join(), "a  b");

        // Tabs are not separators.
        let sentence = Sentence::parse("a\tb c");
        assert_eq!(sentence.len(), 2);
    }

    #[test]
    fn test_masking_does_not_modify_sentence() {
        let sentence = Sentence::parse("We made ensure to meet");
        assert_eq!(sentence.masked(0, "<mask>"), "<mask> made ensure to meet");
        assert_eq!(sentence.join(), "We made ensure to meet");
    }

    #[test]
    fn test_replace() {
        let mut sentence = Sentence::parse("We made ensure");
        sentence.replace(1, "make");
        sentence.replace(10, "ignored");
        assert_eq!(sentence.to_string(), "We make ensure");
        assert_eq!(sentence.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let sentence = Sentence::parse("");
        assert_eq!(sentence.len(), 1);
        assert_eq!(sentence.join(), "");
    }

    #[test]
    fn test_token_char_len() {
        assert_eq!(Token::new("café", 0).char_len(), 4);
    }
}
