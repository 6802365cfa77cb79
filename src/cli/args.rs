//! Command line argument parsing for the TransSpell CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::CorrectionMode;
use crate::model::DEFAULT_TOP_N;

/// TransSpell - context-sensitive spelling correction with a masked language model
#[derive(Parser, Debug, Clone)]
#[command(name = "transspell")]
#[command(about = "Context-sensitive spelling correction with a masked language model")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TransSpellArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "TRANSSPELL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TransSpellArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correct sentences (read from stdin, one per line, when none are given)
    Correct(CorrectArgs),

    /// Check tokens with the rule-based error detector
    Check(CheckArgs),

    /// Show the model's candidates for a masked sentence
    Candidates(CandidatesArgs),

    /// Show the cleaned form of tokens
    Clean(CleanArgs),

    /// Show the most common tokens of a corpus
    Frequencies(FrequenciesArgs),
}

/// Settings shared by commands that build a corrector.
#[derive(Parser, Debug, Clone, Default)]
pub struct CorrectorArgs {
    /// CSV corpus with an answers column
    #[arg(long, value_name = "CORPUS")]
    pub corpus: Option<PathBuf>,

    /// Corpus column holding the answers
    #[arg(long, value_name = "COLUMN")]
    pub column: Option<String>,

    /// Directory holding en_US and en_GB Hunspell dictionaries
    #[arg(long, value_name = "DIRECTORY")]
    pub dictionaries: Option<PathBuf>,

    /// Minimum cleaned token length checked for errors
    #[arg(long)]
    pub min_token_length: Option<usize>,

    /// Corpus frequency above which tokens are never errors
    #[arg(long)]
    pub max_frequency: Option<u64>,

    /// HuggingFace model identifier
    #[arg(long, value_name = "MODEL_ID")]
    pub model: Option<String>,
}

/// Arguments for correcting sentences
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Sentences to correct
    #[arg(value_name = "SENTENCE")]
    pub sentences: Vec<String>,

    /// Report every substitution
    #[arg(short, long)]
    pub report: bool,

    /// Which tokens are masked
    #[arg(short = 'm', long)]
    pub mode: Option<ModeArg>,

    /// Candidates requested per masked token
    #[arg(short = 'n', long)]
    pub candidates: Option<usize>,

    #[command(flatten)]
    pub corrector: CorrectorArgs,
}

/// Arguments for checking tokens
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Tokens to check
    #[arg(value_name = "TOKEN", required = true)]
    pub tokens: Vec<String>,

    #[command(flatten)]
    pub corrector: CorrectorArgs,
}

/// Arguments for showing candidates
#[derive(Parser, Debug, Clone)]
pub struct CandidatesArgs {
    /// Sentence containing the mask placeholder, e.g. "We made [MASK] to meet"
    #[arg(value_name = "MASKED_SENTENCE")]
    pub sentence: String,

    /// Number of candidates to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    #[command(flatten)]
    pub corrector: CorrectorArgs,
}

/// Arguments for cleaning tokens
#[derive(Parser, Debug, Clone)]
pub struct CleanArgs {
    /// Tokens to clean
    #[arg(value_name = "TOKEN", required = true)]
    pub tokens: Vec<String>,
}

/// Arguments for corpus frequencies
#[derive(Parser, Debug, Clone)]
pub struct FrequenciesArgs {
    /// CSV corpus with an answers column
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Corpus column holding the answers
    #[arg(long, value_name = "COLUMN")]
    pub column: Option<String>,

    /// Number of tokens to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Correction modes available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeArg {
    /// Mask every token except the first one and stop words
    Contextual,
    /// Only mask tokens the error detector flags
    Gated,
}

impl From<ModeArg> for CorrectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Contextual => CorrectionMode::Contextual,
            ModeArg::Gated => CorrectionMode::Gated,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
