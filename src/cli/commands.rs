//! Command implementations for the TransSpell CLI.

use std::io::{self, BufRead};
use std::sync::Arc;

use log::info;

use crate::analysis::cleaner::clean_token;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::TransSpellConfig;
use crate::error::Result;
use crate::model::{MaskedLanguageModel, load_model};
use crate::spelling::corrector::TransSpell;
use crate::spelling::detector::ErrorDetector;
use crate::spelling::frequency::FrequencyIndex;
use crate::spelling::lexicon::default_sources;

/// Execute a CLI command.
pub fn execute_command(args: TransSpellArgs) -> Result<()> {
    match &args.command {
        Command::Correct(correct_args) => correct(correct_args.clone(), &args),
        Command::Check(check_args) => check(check_args.clone(), &args),
        Command::Candidates(candidates_args) => candidates(candidates_args.clone(), &args),
        Command::Clean(clean_args) => clean(clean_args.clone(), &args),
        Command::Frequencies(frequencies_args) => frequencies(frequencies_args.clone(), &args),
    }
}

/// Load the configuration file (or defaults) and apply command line overrides.
pub fn resolve_config(
    cli_args: &TransSpellArgs,
    overrides: &CorrectorArgs,
) -> Result<TransSpellConfig> {
    let mut config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            TransSpellConfig::from_file(path)?
        }
        None => TransSpellConfig::default(),
    };

    if let Some(corpus) = &overrides.corpus {
        config.corpus_path = Some(corpus.clone());
    }
    if let Some(column) = &overrides.column {
        config.corpus_column = column.clone();
    }
    if let Some(directory) = &overrides.dictionaries {
        config.lexicons = default_sources(directory.clone()).to_vec();
    }
    if let Some(min_token_length) = overrides.min_token_length {
        config.min_token_length = min_token_length;
    }
    if let Some(max_frequency) = overrides.max_frequency {
        config.max_frequency = max_frequency;
    }
    if let Some(model_id) = &overrides.model {
        config.model.model_id = model_id.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Correct sentences given as arguments or read from stdin.
fn correct(args: CorrectArgs, cli_args: &TransSpellArgs) -> Result<()> {
    let mut config = resolve_config(cli_args, &args.corrector)?;
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(count) = args.candidates {
        config.candidate_count = count;
    }

    let corrector = TransSpell::from_config(config)?;

    let sentences = if args.sentences.is_empty() {
        read_stdin_lines()?
    } else {
        args.sentences
    };

    let mut outputs = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        let report = corrector.correct_with_report(&sentence)?;
        outputs.push(CorrectionOutput {
            input: sentence,
            corrected: report.corrected,
            corrections: args.report.then_some(report.corrections),
        });
    }

    output_result(&outputs, cli_args)
}

/// Run the rule-based detector over tokens.
///
/// Does not need the language model.
fn check(args: CheckArgs, cli_args: &TransSpellArgs) -> Result<()> {
    let config = resolve_config(cli_args, &args.corrector)?;

    let detector = ErrorDetector::from_config(&config)?;

    let outputs = args
        .tokens
        .into_iter()
        .map(|token| {
            Ok(CheckOutput {
                cleaned: clean_token(&token),
                is_error: detector.is_error(&token)?,
                token,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    output_result(&outputs, cli_args)
}

/// Show the decoded candidates for a masked sentence.
fn candidates(args: CandidatesArgs, cli_args: &TransSpellArgs) -> Result<()> {
    let config = resolve_config(cli_args, &args.corrector)?;
    let model: Arc<dyn MaskedLanguageModel> = load_model(&config.model)?;
    let corrector = TransSpell::new(config, model)?;

    let ids = corrector.generate_candidates(&args.sentence, args.top_n)?;
    let tokens = corrector.decode_candidates(&ids)?;

    let output = CandidatesOutput {
        sentence: args.sentence,
        candidates: ids
            .into_iter()
            .zip(tokens)
            .enumerate()
            .map(|(i, (id, token))| CandidateEntry {
                rank: i + 1,
                id,
                token,
            })
            .collect(),
    };

    output_result(&output, cli_args)
}

/// Show the cleaned form of tokens.
fn clean(args: CleanArgs, cli_args: &TransSpellArgs) -> Result<()> {
    let outputs: Vec<CleanOutput> = args
        .tokens
        .into_iter()
        .map(|token| CleanOutput {
            cleaned: clean_token(&token),
            token,
        })
        .collect();

    output_result(&outputs, cli_args)
}

/// Show corpus frequency statistics.
fn frequencies(args: FrequenciesArgs, cli_args: &TransSpellArgs) -> Result<()> {
    let mut index = FrequencyIndex::new();
    if let Some(column) = args.column {
        index = index.with_column(column);
    }

    let table = index.build(&args.corpus)?.unwrap_or_default();

    let output = FrequencyOutput {
        corpus: args.corpus.display().to_string(),
        total_tokens: table.total(),
        unique_tokens: table.len(),
        most_common: table
            .most_common(args.limit)
            .into_iter()
            .map(|(token, count)| FrequencyEntry { token, count })
            .collect(),
    };

    output_result(&output, cli_args)
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
