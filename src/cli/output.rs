//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TransSpellArgs};
use crate::error::Result;
use crate::spelling::corrector::Correction;

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    /// Print the result to stdout.
    fn print_human(&self);
}

/// Result structure for one corrected sentence.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionOutput {
    pub input: String,
    pub corrected: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrections: Option<Vec<Correction>>,
}

/// Result structure for the error check of a token.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckOutput {
    pub token: String,
    pub cleaned: String,
    pub is_error: bool,
}

/// One decoded candidate.
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub rank: usize,
    pub id: u32,
    pub token: String,
}

/// Result structure for candidate generation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidatesOutput {
    pub sentence: String,
    pub candidates: Vec<CandidateEntry>,
}

/// Result structure for a cleaned token.
#[derive(Debug, Serialize, Deserialize)]
pub struct CleanOutput {
    pub token: String,
    pub cleaned: String,
}

/// One row of the frequency listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub token: String,
    pub count: u64,
}

/// Corpus frequency statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct FrequencyOutput {
    pub corpus: String,
    pub total_tokens: u64,
    pub unique_tokens: usize,
    pub most_common: Vec<FrequencyEntry>,
}

impl HumanOutput for Vec<CorrectionOutput> {
    fn print_human(&self) {
        for output in self {
            println!("{}", output.corrected);

            if let Some(corrections) = &output.corrections {
                for correction in corrections {
                    println!(
                        "  [{}] {} -> {}",
                        correction.position, correction.original, correction.replacement
                    );
                }
            }
        }
    }
}

impl HumanOutput for Vec<CheckOutput> {
    fn print_human(&self) {
        let width = column_width(self.iter().map(|o| o.token.as_str()));
        for output in self {
            let verdict = if output.is_error { "error" } else { "ok" };
            println!("{:width$}  {verdict}", output.token);
        }
    }
}

impl HumanOutput for CandidatesOutput {
    fn print_human(&self) {
        println!("{}", self.sentence);
        println!("─────────────");
        for entry in &self.candidates {
            println!("{:>3}. {} ({})", entry.rank, entry.token, entry.id);
        }
    }
}

impl HumanOutput for Vec<CleanOutput> {
    fn print_human(&self) {
        for output in self {
            println!("{}", output.cleaned);
        }
    }
}

impl HumanOutput for FrequencyOutput {
    fn print_human(&self) {
        println!("Corpus: {}", self.corpus);
        println!("Total tokens: {}", self.total_tokens);
        println!("Unique tokens: {}", self.unique_tokens);
        println!();

        let width = column_width(self.most_common.iter().map(|e| e.token.as_str()));
        for entry in &self.most_common {
            println!("{:width$}  {}", entry.token, entry.count);
        }
    }
}

/// Width of a padded column, in characters as `{:width$}` counts them.
fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|cell| cell.chars().count()).max().unwrap_or(0)
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &TransSpellArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TransSpellArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
