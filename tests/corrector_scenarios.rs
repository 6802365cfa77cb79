use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use transspell::config::{CorrectionMode, TransSpellConfig};
use transspell::error::{Result, TransSpellError};
use transspell::model::MaskedLanguageModel;
use transspell::spelling::TransSpell;
use transspell::spelling::lexicon::LexiconSource;

const SENTENCE: &str = "We made ensure to meet the customer requirements in a consistent manner.";

#[test]
fn corrector_replaces_real_word_error_with_top_candidate() -> Result<()> {
    let model = Arc::new(ScriptedModel::new(SENTENCE).predict(2, &["sure", "certain", "it"]));
    let corrector = TransSpell::new(config(), model)?;

    let report = corrector.correct_with_report(SENTENCE)?;
    assert_eq!(
        report.corrected,
        "We made sure to meet the customer requirements in a consistent manner."
    );
    assert_eq!(report.corrections.len(), 1);
    assert_eq!(report.corrections[0].position, 2);
    assert_eq!(report.corrections[0].original, "ensure");
    assert_eq!(report.corrections[0].replacement, "sure");
    Ok(())
}

#[test]
fn corrector_keeps_token_listed_case_insensitively() -> Result<()> {
    let model = Arc::new(ScriptedModel::new(SENTENCE).predict(2, &["sure", "ENSURE"]));
    let corrector = TransSpell::new(config(), model)?;

    assert_eq!(corrector.correct(SENTENCE)?, SENTENCE);
    Ok(())
}

#[test]
fn corrector_masks_each_non_stop_word_once() -> Result<()> {
    let model = Arc::new(ScriptedModel::new(SENTENCE));
    let corrector = TransSpell::new(config(), model.clone())?;

    corrector.correct(SENTENCE)?;

    // "We" is first; "to", "the", "in" and "a" are stop words.
    assert_eq!(model.masked_positions(), vec![1, 2, 4, 6, 7, 10, 11]);
    assert_eq!(model.inferences(), 7);
    Ok(())
}

#[test]
fn corrector_never_touches_first_token_or_stop_words() -> Result<()> {
    let mut model = ScriptedModel::new(SENTENCE);
    for position in 0..12 {
        model = model.predict(position, &["zzz"]);
    }
    let corrector = TransSpell::new(config(), Arc::new(model))?;

    let corrected = corrector.correct(SENTENCE)?;
    let tokens: Vec<&str> = corrected.split(' ').collect();

    assert_eq!(tokens[0], "We");
    for (position, word) in [(3, "to"), (5, "the"), (8, "in"), (9, "a")] {
        assert_eq!(tokens[position], word);
    }
    assert_eq!(tokens[2], "zzz");
    Ok(())
}

#[test]
fn corrector_preserves_token_count() -> Result<()> {
    for sentence in [
        SENTENCE,
        "single",
        "",
        "two  spaces here",
        "trailing space ",
    ] {
        let mut model = ScriptedModel::new(sentence);
        for position in 0..8 {
            model = model.predict(position, &["replacement"]);
        }
        let corrector = TransSpell::new(config(), Arc::new(model))?;

        let corrected = corrector.correct(sentence)?;
        assert_eq!(
            corrected.split(' ').count(),
            sentence.split(' ').count(),
            "token count changed for {sentence:?}"
        );
    }
    Ok(())
}

#[test]
fn corrector_masks_against_earlier_substitutions() -> Result<()> {
    let model = Arc::new(ScriptedModel::new(SENTENCE).predict(2, &["sure"]));
    let corrector = TransSpell::new(config(), model.clone())?;

    corrector.correct(SENTENCE)?;

    let contexts = model.contexts();
    assert_eq!(
        contexts[2],
        "We made sure to [MASK] the customer requirements in a consistent manner."
    );
    Ok(())
}

#[test]
fn corrector_is_reusable_across_sentences() -> Result<()> {
    let model = Arc::new(ScriptedModel::new(SENTENCE).predict(2, &["sure"]));
    let corrector = TransSpell::new(config(), model)?;

    let first = corrector.correct(SENTENCE)?;
    let second = corrector.correct(SENTENCE)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn gated_corrector_only_masks_non_words() -> Result<()> {
    let sentence = "Our custmer service meets every requirment";
    let model = Arc::new(
        ScriptedModel::new(sentence)
            .predict(1, &["customer"])
            .predict(2, &["zzz"])
            .predict(5, &["requirement"]),
    );
    let config = config().with_mode(CorrectionMode::Gated);
    let corrector = TransSpell::new(config, model.clone())?;

    assert_eq!(
        corrector.correct(sentence)?,
        "Our customer service meets every requirement"
    );
    assert_eq!(model.masked_positions(), vec![1, 5]);
    Ok(())
}

#[test]
fn corrector_propagates_model_failures() -> Result<()> {
    let corrector = TransSpell::new(config(), Arc::new(BrokenModel))?;

    let result = corrector.correct("We made ensure");
    assert!(matches!(result, Err(TransSpellError::Model(_))));

    // Nothing to mask, nothing to fail.
    assert_eq!(corrector.correct("Hello")?, "Hello");
    Ok(())
}

fn config() -> TransSpellConfig {
    TransSpellConfig::default().with_lexicons(
        LexiconSource::inline(
            "en_US",
            ["customer", "service", "meets", "every", "requirement"],
        ),
        LexiconSource::inline("en_GB", ["colour"]),
    )
}

/// A masked language model that predicts from a script.
///
/// Input ids line up with the reference sentence's tokens (no special tokens
/// are added). Unscripted positions predict the reference token, so it is
/// kept. Filler entries always follow the scripted predictions, like the long
/// tail of a real vocabulary.
struct ScriptedModel {
    reference: Vec<String>,
    vocabulary: Vec<String>,
    predictions: HashMap<usize, Vec<String>>,
    inferences: AtomicUsize,
    masked: Mutex<Vec<(usize, String)>>,
}

const MASK: &str = "[MASK]";
const UNKNOWN: &str = "[UNK]";
const FILLERS: usize = 64;

impl ScriptedModel {
    fn new(reference: &str) -> Self {
        let reference: Vec<String> = reference.split(' ').map(str::to_string).collect();
        let mut model = ScriptedModel {
            reference: reference.clone(),
            vocabulary: vec![MASK.to_string(), UNKNOWN.to_string()],
            predictions: HashMap::new(),
            inferences: AtomicUsize::new(0),
            masked: Mutex::new(Vec::new()),
        };
        for word in &reference {
            model.intern(word);
        }
        for filler in 0..FILLERS {
            model.intern(&format!("[unused{filler}]"));
        }
        model
    }

    fn predict(mut self, position: usize, words: &[&str]) -> Self {
        for word in words {
            self.intern(word);
        }
        self.predictions
            .insert(position, words.iter().map(|w| w.to_string()).collect());
        self
    }

    fn intern(&mut self, word: &str) -> u32 {
        match self.id(word) {
            Some(id) => id,
            None => {
                self.vocabulary.push(word.to_string());
                (self.vocabulary.len() - 1) as u32
            }
        }
    }

    fn id(&self, word: &str) -> Option<u32> {
        self.vocabulary
            .iter()
            .position(|entry| entry == word)
            .map(|id| id as u32)
    }

    fn inferences(&self) -> usize {
        self.inferences.load(Ordering::SeqCst)
    }

    fn masked_positions(&self) -> Vec<usize> {
        let masked = self.masked.lock().unwrap();
        masked.iter().map(|(position, _)| *position).collect()
    }

    fn contexts(&self) -> Vec<String> {
        let masked = self.masked.lock().unwrap();
        masked.iter().map(|(_, context)| context.clone()).collect()
    }
}

impl MaskedLanguageModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn mask_token(&self) -> &str {
        MASK
    }

    fn mask_token_id(&self) -> u32 {
        0
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(text.split(' ').map(|word| self.id(word).unwrap_or(1)).collect())
    }

    fn mask_logits(&self, input_ids: &[u32], position: usize) -> Result<Vec<f32>> {
        self.inferences.fetch_add(1, Ordering::SeqCst);
        self.masked
            .lock()
            .unwrap()
            .push((position, self.decode(input_ids)?));

        let mut scores = vec![f32::NEG_INFINITY; self.vocabulary.len()];
        for (id, word) in self.vocabulary.iter().enumerate() {
            if word.starts_with("[unused") {
                scores[id] = 0.0;
            }
        }

        let ranked = match self.predictions.get(&position) {
            Some(words) => words.clone(),
            None => self.reference.get(position).cloned().into_iter().collect(),
        };
        for (rank, word) in ranked.iter().enumerate() {
            if let Some(id) = self.id(word) {
                scores[id as usize] = 100.0 - rank as f32;
            }
        }
        Ok(scores)
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        Ok(ids
            .iter()
            .map(|&id| self.vocabulary[id as usize].as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// A model whose forward pass always fails.
struct BrokenModel;

impl MaskedLanguageModel for BrokenModel {
    fn mask_token(&self) -> &str {
        MASK
    }

    fn mask_token_id(&self) -> u32 {
        0
    }

    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(text
            .split(' ')
            .map(|word| if word == MASK { 0 } else { 1 })
            .collect())
    }

    fn mask_logits(&self, _input_ids: &[u32], _position: usize) -> Result<Vec<f32>> {
        Err(TransSpellError::model("forward pass failed"))
    }

    fn decode(&self, _ids: &[u32]) -> Result<String> {
        Ok(String::new())
    }
}
