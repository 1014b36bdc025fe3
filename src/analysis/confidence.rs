use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::text::{compile_vocabulary, count_all, sentences_matching, split_sentences, PhrasePattern};
use crate::models::{ConfidenceReport, SentimentSignal};

const HEDGING_PHRASES: &[&str] = &[
    "maybe", "perhaps", "kind of", "sort of", "i think", "i guess", "possibly", "might",
    "not sure",
];

const ASSERTIVE_PHRASES: &[&str] = &[
    "definitely",
    "certainly",
    "clearly",
    "strongly",
    "confident",
    "sure",
    "absolutely",
];

static HEDGING_PATTERNS: LazyLock<Vec<PhrasePattern>> =
    LazyLock::new(|| compile_vocabulary(HEDGING_PHRASES));

static ASSERTIVE_PATTERNS: LazyLock<Vec<PhrasePattern>> =
    LazyLock::new(|| compile_vocabulary(ASSERTIVE_PHRASES));

/// "not sure", "not confident" and so on, which earn no assertive bonus
static NEGATED_ASSERTIVE_PATTERNS: LazyLock<Vec<PhrasePattern>> = LazyLock::new(|| {
    ASSERTIVE_PHRASES
        .iter()
        .filter_map(|p| PhrasePattern::literal(&format!("not {}", p)).ok())
        .collect()
});

/// Weights for the confidence score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Score of a transcript with no markers and neutral sentiment
    pub base_score: f64,
    pub hedge_penalty: f64,
    pub hedge_penalty_cap: f64,
    pub assertive_bonus: f64,
    pub assertive_bonus_cap: f64,
    /// Scale applied to (positive - negative) sentiment
    pub tone_multiplier: f64,
    pub max_examples: usize,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base_score: 70.0,
            hedge_penalty: 5.0,
            hedge_penalty_cap: 30.0,
            assertive_bonus: 5.0,
            assertive_bonus_cap: 20.0,
            tone_multiplier: 20.0,
            max_examples: 3,
        }
    }
}

/// Score assertiveness from hedging and confidence markers plus sentiment
/// polarity. Adding a hedge never raises the score and adding an assertive
/// marker never lowers it.
pub fn score_confidence(
    transcript: &str,
    sentiment: &SentimentSignal,
    config: &ConfidenceConfig,
) -> ConfidenceReport {
    let hedging = count_all(&HEDGING_PATTERNS, transcript);
    let assertive = count_all(&ASSERTIVE_PATTERNS, transcript)
        .saturating_sub(count_all(&NEGATED_ASSERTIVE_PATTERNS, transcript));

    let penalty = (hedging as f64 * config.hedge_penalty).min(config.hedge_penalty_cap);
    let bonus = (assertive as f64 * config.assertive_bonus).min(config.assertive_bonus_cap);
    let tone = sentiment.distribution.polarity() * config.tone_multiplier;

    let score = config.base_score - penalty + bonus + tone;

    let sentences = split_sentences(transcript);
    let hedging_examples = sentences_matching(&sentences, &HEDGING_PATTERNS, config.max_examples);

    ConfidenceReport {
        score: score.clamp(0.0, 100.0),
        confidence_markers: assertive,
        hedging_markers: hedging,
        hedging_examples,
        sentiment_degraded: sentiment.degraded,
    }
}
