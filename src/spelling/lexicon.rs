//! Dictionary lookups.
//!
//! A [`Lexicon`] answers whether a cleaned token is a known word. The
//! [`DictionaryOracle`] combines two lexicons (by default the US and British
//! English Hunspell dictionaries) and reports a word as known when either of
//! them knows it.
//!
//! Lexicons are loaded lazily: nothing is read from disk until the first
//! lookup (or an explicit [`DictionaryOracle::ensure_initialized`]), and a
//! loaded lexicon is kept for the lifetime of the oracle. A lexicon that
//! cannot be loaded is a fatal error for the lookup that triggered it.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use log::info;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use spellbook::Dictionary;

use crate::error::{Result, TransSpellError};

/// A word list that can check cleaned tokens.
pub trait Lexicon: Send + Sync {
    /// Get the name of this lexicon (e.g. its locale).
    fn name(&self) -> &str;

    /// Check if a cleaned token is a known word.
    fn check(&self, word: &str) -> bool;
}

/// A Hunspell dictionary backed by `spellbook`.
pub struct HunspellLexicon {
    locale: String,
    dictionary: Dictionary,
}

impl HunspellLexicon {
    /// Parse a dictionary from the contents of its `.aff` and `.dic` files.
    pub fn new(locale: &str, aff: &str, dic: &str) -> Result<Self> {
        let dictionary = Dictionary::new(aff, dic).map_err(|e| {
            TransSpellError::dictionary(format!("failed to parse {locale} dictionary: {e}"))
        })?;

        Ok(HunspellLexicon {
            locale: locale.to_string(),
            dictionary,
        })
    }

    /// Load `<directory>/<locale>.aff` and `<directory>/<locale>.dic`.
    pub fn load<P: AsRef<Path>>(locale: &str, directory: P) -> Result<Self> {
        let directory = directory.as_ref();
        let aff = read_resource(&directory.join(format!("{locale}.aff")))?;
        let dic = read_resource(&directory.join(format!("{locale}.dic")))?;
        Self::new(locale, &aff, &dic)
    }
}

impl fmt::Debug for HunspellLexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HunspellLexicon")
            .field("locale", &self.locale)
            .finish()
    }
}

impl Lexicon for HunspellLexicon {
    fn name(&self) -> &str {
        &self.locale
    }

    fn check(&self, word: &str) -> bool {
        self.dictionary.check(word)
    }
}

/// A plain word list, matched case-insensitively.
#[derive(Debug, Clone)]
pub struct WordListLexicon {
    name: String,
    words: AHashSet<String>,
}

impl WordListLexicon {
    /// Create a word list from in-memory words.
    pub fn new<I, S>(name: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();

        WordListLexicon {
            name: name.to_string(),
            words,
        }
    }

    /// Load a word list file with one word per line.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = read_resource(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(&name, contents.lines()))
    }

    /// Get the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the word list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for WordListLexicon {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}

fn read_resource(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        TransSpellError::dictionary(format!("failed to read {}: {e}", path.display()))
    })
}

/// Where a lexicon is loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LexiconSource {
    /// A Hunspell dictionary `<directory>/<locale>.{aff,dic}`.
    Hunspell { locale: String, directory: PathBuf },
    /// A word list file with one word per line.
    WordList { path: PathBuf },
    /// Words given inline.
    Inline { name: String, words: Vec<String> },
}

impl LexiconSource {
    /// A Hunspell dictionary source.
    pub fn hunspell<S: Into<String>, P: Into<PathBuf>>(locale: S, directory: P) -> Self {
        LexiconSource::Hunspell {
            locale: locale.into(),
            directory: directory.into(),
        }
    }

    /// An inline word list source.
    pub fn inline<S: Into<String>>(name: &str, words: impl IntoIterator<Item = S>) -> Self {
        LexiconSource::Inline {
            name: name.to_string(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Get a short description of this source for logging.
    pub fn describe(&self) -> String {
        match self {
            LexiconSource::Hunspell { locale, directory } => {
                format!("hunspell {locale} in {}", directory.display())
            }
            LexiconSource::WordList { path } => format!("word list {}", path.display()),
            LexiconSource::Inline { name, words } => {
                format!("inline {name} ({} words)", words.len())
            }
        }
    }

    /// Load the lexicon.
    pub fn load(&self) -> Result<Box<dyn Lexicon>> {
        let lexicon: Box<dyn Lexicon> = match self {
            LexiconSource::Hunspell { locale, directory } => {
                Box::new(HunspellLexicon::load(locale, directory)?)
            }
            LexiconSource::WordList { path } => Box::new(WordListLexicon::load(path)?),
            LexiconSource::Inline { name, words } => Box::new(WordListLexicon::new(name, words)),
        };

        info!("Loaded lexicon: {}", self.describe());
        Ok(lexicon)
    }
}

/// Default US and British English Hunspell sources under `directory`.
pub fn default_sources<P: Into<PathBuf>>(directory: P) -> [LexiconSource; 2] {
    let directory = directory.into();
    [
        LexiconSource::hunspell("en_US", directory.clone()),
        LexiconSource::hunspell("en_GB", directory),
    ]
}

/// A lexicon that is loaded on first use.
struct LazyLexicon {
    source: LexiconSource,
    cell: OnceCell<Box<dyn Lexicon>>,
}

impl LazyLexicon {
    fn new(source: LexiconSource) -> Self {
        LazyLexicon {
            source,
            cell: OnceCell::new(),
        }
    }

    fn get(&self) -> Result<&dyn Lexicon> {
        self.cell
            .get_or_try_init(|| self.source.load())
            .map(|lexicon| &**lexicon)
    }

    fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Answers "is this a known word" using two lexicons.
pub struct DictionaryOracle {
    primary: LazyLexicon,
    secondary: LazyLexicon,
}

impl DictionaryOracle {
    /// Create an oracle over two lexicon sources. Nothing is loaded yet.
    pub fn new(primary: LexiconSource, secondary: LexiconSource) -> Self {
        DictionaryOracle {
            primary: LazyLexicon::new(primary),
            secondary: LazyLexicon::new(secondary),
        }
    }

    /// Create an oracle from a list of exactly two sources.
    pub fn from_sources(sources: &[LexiconSource]) -> Result<Self> {
        match sources {
            [primary, secondary] => Ok(Self::new(primary.clone(), secondary.clone())),
            other => Err(TransSpellError::invalid_config(format!(
                "exactly two lexicons are required, got {}",
                other.len()
            ))),
        }
    }

    /// Create an oracle over the US and British English dictionaries.
    pub fn english<P: Into<PathBuf>>(directory: P) -> Self {
        let [primary, secondary] = default_sources(directory);
        Self::new(primary, secondary)
    }

    /// Load both lexicons if they are not loaded yet.
    pub fn ensure_initialized(&self) -> Result<()> {
        self.primary.get()?;
        self.secondary.get()?;
        Ok(())
    }

    /// Check whether both lexicons have been loaded.
    pub fn is_initialized(&self) -> bool {
        self.primary.is_loaded() && self.secondary.is_loaded()
    }

    /// Check if either lexicon knows the cleaned token.
    pub fn is_known_word(&self, cleaned: &str) -> Result<bool> {
        self.ensure_initialized()?;
        Ok(self.primary.get()?.check(cleaned) || self.secondary.get()?.check(cleaned))
    }

    /// Get the sources of both lexicons.
    pub fn sources(&self) -> [&LexiconSource; 2] {
        [&self.primary.source, &self.secondary.source]
    }
}

impl fmt::Debug for DictionaryOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryOracle")
            .field("primary", &self.primary.source)
            .field("secondary", &self.secondary.source)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
