//! Corpus word frequencies.
//!
//! A [`FrequencyTable`] counts how often each cleaned token occurs in a corpus
//! of domain answers. Words that are common in the domain (product names,
//! jargon) are exempt from error detection even if no dictionary knows them.
//!
//! The corpus is a CSV file with a header row; the answer text is read from
//! the `answers` column (see [`FrequencyIndex::with_column`] to change it).

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use ahash::AHashMap;
use csv::ReaderBuilder;
use log::{info, warn};

use crate::analysis::cleaner::clean_token;
use crate::error::{Result, TransSpellError};

/// Default name of the corpus column holding answer text.
pub const DEFAULT_ANSWERS_COLUMN: &str = "answers";

/// Word frequencies keyed by cleaned token.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: AHashMap<String, u64>,
    total: u64,
}

impl FrequencyTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from in-memory answer texts.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = FrequencyTable::new();
        for text in texts {
            table.add_text(text.as_ref());
        }
        table
    }

    /// Split text on whitespace, clean every token and count it.
    pub fn add_text(&mut self, text: &str) {
        for token in text.split_whitespace() {
            self.increment(clean_token(token));
        }
    }

    fn increment(&mut self, cleaned: String) {
        *self.counts.entry(cleaned).or_insert(0) += 1;
        self.total += 1;
    }

    /// Get the frequency of a cleaned token (0 when unseen).
    pub fn frequency(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Check if a cleaned token occurs in the corpus.
    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Get the number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Get the total number of counted tokens.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Get the `limit` most frequent tokens, most frequent first.
    ///
    /// Ties are ordered alphabetically so the output is deterministic.
    pub fn most_common(&self, limit: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(word, count)| (word.clone(), *count))
            .collect();

        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }
}

/// Builds [`FrequencyTable`]s from CSV corpus files.
#[derive(Debug, Clone)]
pub struct FrequencyIndex {
    column: String,
}

impl Default for FrequencyIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyIndex {
    /// Create an index builder reading the `answers` column.
    pub fn new() -> Self {
        FrequencyIndex {
            column: DEFAULT_ANSWERS_COLUMN.to_string(),
        }
    }

    /// Read answer text from a different column.
    pub fn with_column<S: Into<String>>(mut self, column: S) -> Self {
        self.column = column.into();
        self
    }

    /// Get the column answer text is read from.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Build a table from the corpus at `path`.
    ///
    /// A missing file is not an error: a warning is logged and `None` is
    /// returned, which disables the frequency rule of error detection.
    pub fn build<P: AsRef<Path>>(&self, path: P) -> Result<Option<FrequencyTable>> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Corpus could not be found at {}. Proceeding without frequency list.",
                    path.display()
                );
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let table = self.build_from_reader(file).map_err(|e| match e {
            TransSpellError::Csv(e) => {
                TransSpellError::corpus(format!("{}: {e}", path.display()))
            }
            other => other,
        })?;

        info!(
            "Built frequency list from {}: {} distinct tokens, {} total",
            path.display(),
            table.len(),
            table.total()
        );

        Ok(Some(table))
    }

    /// Build a table from CSV data.
    pub fn build_from_reader<R: Read>(&self, reader: R) -> Result<FrequencyTable> {
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let column_index = csv_reader
            .headers()?
            .iter()
            .position(|header| header == self.column)
            .ok_or_else(|| {
                TransSpellError::corpus(format!("corpus has no '{}' column", self.column))
            })?;

        let mut table = FrequencyTable::new();
        for record in csv_reader.records() {
            let record = record?;
            if let Some(text) = record.get(column_index) {
                table.add_text(text);
            }
        }

        Ok(table)
    }
}
