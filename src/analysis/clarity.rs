use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::text::{compile_vocabulary, count_all, round1, split_sentences, word_count, PhrasePattern};
use crate::models::ClarityReport;

const COMPLEX_TRANSITIONS: &[&str] = &[
    "however",
    "although",
    "nevertheless",
    "nonetheless",
    "furthermore",
    "moreover",
    "meanwhile",
    "consequently",
    "therefore",
    "whereas",
];

static TRANSITION_PATTERNS: LazyLock<Vec<PhrasePattern>> =
    LazyLock::new(|| compile_vocabulary(COMPLEX_TRANSITIONS));

/// Weights for the clarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarityConfig {
    /// Lower edge of the optimal average sentence length (words)
    pub optimal_min_words: f64,
    /// Upper edge of the optimal average sentence length (words)
    pub optimal_max_words: f64,
    /// Points lost per word of average length above the band
    pub long_sentence_penalty_per_word: f64,
    /// Points lost per word of average length below the band
    pub short_sentence_penalty_per_word: f64,
    pub length_penalty_cap: f64,
    /// Points lost per transition marker per sentence
    pub transition_penalty_weight: f64,
    pub transition_penalty_cap: f64,
    /// Sentences longer than this are reported as unclear
    pub unclear_sentence_words: usize,
    pub max_examples: usize,
}

impl Default for ClarityConfig {
    fn default() -> Self {
        Self {
            optimal_min_words: 15.0,
            optimal_max_words: 25.0,
            long_sentence_penalty_per_word: 2.0,
            short_sentence_penalty_per_word: 1.0,
            length_penalty_cap: 30.0,
            transition_penalty_weight: 20.0,
            transition_penalty_cap: 20.0,
            unclear_sentence_words: 30,
            max_examples: 3,
        }
    }
}

/// Score sentence-structure clarity.
///
/// Starts at 100 and subtracts two independent, separately capped penalties:
/// distance of the average sentence length from the optimal band, and the
/// density of complex transition markers per sentence.
pub fn score_clarity(transcript: &str, config: &ClarityConfig) -> ClarityReport {
    let sentences = split_sentences(transcript);
    let lengths: Vec<usize> = sentences.iter().map(|s| word_count(s)).collect();

    let average = if sentences.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / sentences.len() as f64
    };

    let transitions = count_all(&TRANSITION_PATTERNS, transcript);

    let score = 100.0
        - length_penalty(average, config)
        - transition_penalty(transitions, sentences.len(), config);

    let unclear_examples = sentences
        .iter()
        .zip(&lengths)
        .filter(|(sentence, words)| {
            **words > config.unclear_sentence_words
                || TRANSITION_PATTERNS.iter().any(|p| p.is_match(sentence))
        })
        .take(config.max_examples)
        .map(|(sentence, _)| sentence.to_string())
        .collect();

    ClarityReport {
        score: score.clamp(0.0, 100.0),
        average_sentence_length: round1(average),
        complex_transitions: transitions,
        unclear_examples,
    }
}

fn length_penalty(average: f64, config: &ClarityConfig) -> f64 {
    let penalty = if average > config.optimal_max_words {
        (average - config.optimal_max_words) * config.long_sentence_penalty_per_word
    } else if average < config.optimal_min_words {
        (config.optimal_min_words - average) * config.short_sentence_penalty_per_word
    } else {
        0.0
    };
    penalty.min(config.length_penalty_cap)
}

fn transition_penalty(transitions: usize, sentences: usize, config: &ClarityConfig) -> f64 {
    if transitions == 0 {
        return 0.0;
    }
    let density = transitions as f64 / sentences.max(1) as f64;
    (density * config.transition_penalty_weight).min(config.transition_penalty_cap)
}
