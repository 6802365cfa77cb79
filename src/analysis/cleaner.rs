//! Token cleaning.
//!
//! Cleaning turns a raw token into the form used for dictionary and corpus
//! lookups: it lowercases every character and drops characters that carry no
//! lexical meaning. Hyphens survive anywhere; an apostrophe survives only in
//! the contraction position, i.e. as the second-to-last character followed by
//! a character that is itself kept (`don't`, `we'd`).
//!
//! # Examples
//!
//! ```
//! use transspell::analysis::cleaner::clean_token;
//!
//! assert_eq!(clean_token("Don't"), "don't");
//! assert_eq!(clean_token("didn''t"), "didn't");
//! assert_eq!(clean_token("well-known!"), "well-known");
//! assert_eq!(clean_token("(Survey)"), "survey");
//! ```

/// Check if a character is a word character (alphanumeric or underscore).
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Characters kept regardless of their position.
fn is_always_kept(c: char) -> bool {
    is_word_char(c) || c == '-'
}

/// Clean a raw token into its canonical comparison form.
///
/// Cleaning is idempotent: `clean_token(&clean_token(t)) == clean_token(t)`.
pub fn clean_token(token: &str) -> String {
    // Lowercasing may expand a character (`İ` becomes `i` plus a combining
    // dot), so the keep rules run on the lowercased sequence.
    let chars: Vec<char> = token.chars().flat_map(char::to_lowercase).collect();
    let mut cleaned = String::with_capacity(token.len());

    for (i, &c) in chars.iter().enumerate() {
        let keep = if is_always_kept(c) {
            true
        } else if c == '\'' {
            i + 2 == chars.len() && is_always_kept(chars[i + 1])
        } else {
            false
        };

        if keep {
            cleaned.push(c);
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(clean_token("Hello,"), "hello");
        assert_eq!(clean_token("\"Quoted\""), "quoted");
        assert_eq!(clean_token("manner."), "manner");
        assert_eq!(clean_token("snake_case"), "snake_case");
        assert_eq!(clean_token("COVID19"), "covid19");
    }

    #[test]
    fn test_apostrophe_rule() {
        assert_eq!(clean_token("don't"), "don't");
        assert_eq!(clean_token("didn''t"), "didn't");
        assert_eq!(clean_token("'tis"), "tis");
        assert_eq!(clean_token("rock'n'roll"), "rocknroll");
        assert_eq!(clean_token("students'"), "students");
    }

    #[test]
    fn test_apostrophe_followed_by_dropped_character() {
        // The trailing '!' is dropped, so the apostrophe is no longer in the
        // contraction position and must go too.
        assert_eq!(clean_token("ab'!"), "ab");
        assert_eq!(clean_token("ab'-"), "ab'-");
    }

    #[test]
    fn test_hyphen_preservation() {
        assert_eq!(clean_token("well-known!"), "well-known");
        assert_eq!(clean_token("-x-"), "-x-");
    }

    #[test]
    fn test_empty_and_symbol_only_tokens() {
        assert_eq!(clean_token(""), "");
        assert_eq!(clean_token("..."), "");
        assert_eq!(clean_token("'"), "");
    }

    #[test]
    fn test_unicode_letters_are_kept() {
        assert_eq!(clean_token("Café!"), "café");
        assert_eq!(clean_token("Über-Größe"), "über-größe");
    }

    #[test]
    fn test_expanding_lowercase() {
        // The combining dot from lowercasing `İ` is not a word character.
        assert_eq!(clean_token("İstanbul"), "istanbul");
        assert_eq!(clean_token("İ'x"), "i'x");
    }

    #[test]
    fn test_idempotence() {
        let samples = [
            "don't",
            "didn''t",
            "well-known!",
            "ab'!",
            "ab'-",
            "'",
            "''",
            "a'",
            "x'y'",
            "It's.",
            "--",
            "Hello, World",
            "rock'n'roll",
            "Café!",
            "İstanbul",
            "İ'x",
            "",
        ];

        for sample in samples {
            let once = clean_token(sample);
            let twice = clean_token(&once);
            assert_eq!(once, twice, "cleaning {sample:?} is not idempotent");
        }
    }
}
