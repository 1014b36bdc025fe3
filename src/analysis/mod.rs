pub mod clarity;
pub mod confidence;
pub mod fillers;
pub mod pace;
pub mod text;
pub mod tone;

pub use clarity::*;
pub use confidence::*;
pub use fillers::*;
pub use pace::*;
pub use text::{round1, split_sentences, word_count, PhrasePattern};
pub use tone::*;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{MetricsRecord, SentimentSignal};

/// Speaking-rate assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceConfig {
    /// Rate assumed when no duration is known. One value per deployment,
    /// shared by the presentation and exercise paths.
    pub reference_wpm: f64,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            reference_wpm: 150.0,
        }
    }
}

/// Configuration for all scorers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub pace: PaceConfig,
    pub clarity: ClarityConfig,
    pub confidence: ConfidenceConfig,
    pub tone: ToneConfig,
    /// Filler vocabulary, given as a list of phrases in config files
    pub fillers: FillerSet,
}

impl AnalysisConfig {
    /// Parse a TOML document; missing sections keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Run every scorer over one transcript.
///
/// Pure function of its inputs: the sentiment signal is resolved by the
/// caller, so repeated calls with the same input give identical records.
pub fn aggregate_metrics(
    transcript: &str,
    duration: &DurationHint,
    sentiment: &SentimentSignal,
    config: &AnalysisConfig,
) -> MetricsRecord {
    let words = word_count(transcript);
    let resolved = resolve_duration(duration, words, config.pace.reference_wpm);
    let pace_wpm = calculate_pace(transcript, resolved.seconds);

    let record = MetricsRecord {
        tone: classify_tone(sentiment, &config.tone),
        pace_wpm,
        word_count: words,
        estimated_duration_seconds: round1(resolved.seconds),
        duration_source: resolved.source,
        filler_words: count_fillers(transcript, &config.fillers),
        clarity: score_clarity(transcript, &config.clarity),
        confidence: score_confidence(transcript, sentiment, &config.confidence),
    };

    debug!(
        "Metrics: {} words, {:.1} wpm ({:?}), {} fillers, clarity {:.1}, confidence {:.1}",
        record.word_count,
        record.pace_wpm,
        record.duration_source,
        record.filler_words.total,
        record.clarity.score,
        record.confidence.score
    );

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DurationSource, SentimentDistribution, ToneClassification};

    const TRANSCRIPT: &str = "Um, hello everyone. Today I want to talk about tacos and health. \
                              I think tacos are, like, kind of underrated. \
                              However, they are definitely a balanced meal.";

    fn positive() -> SentimentSignal {
        SentimentSignal::new(None, SentimentDistribution::new(0.8, 0.05, 0.1, 0.05))
    }

    #[test]
    fn test_aggregate_metrics() {
        let record = aggregate_metrics(
            TRANSCRIPT,
            &DurationHint::from_client(12.0),
            &positive(),
            &AnalysisConfig::default(),
        );

        assert_eq!(record.word_count, 27);
        assert_eq!(record.duration_source, DurationSource::Client);
        assert_eq!(record.estimated_duration_seconds, 12.0);
        assert_eq!(record.pace_wpm, 135.0);
        assert_eq!(record.filler_words.per_filler["um"], 1);
        assert_eq!(record.filler_words.per_filler["like"], 1);
        assert_eq!(record.filler_words.total, 2);
        assert_eq!(record.clarity.complex_transitions, 1);
        assert_eq!(record.confidence.hedging_markers, 2);
        assert_eq!(record.confidence.confidence_markers, 1);
        assert_eq!(record.tone.classification, ToneClassification::Subjective);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let config = AnalysisConfig::default();
        let hint = DurationHint::default();

        let first = aggregate_metrics(TRANSCRIPT, &hint, &positive(), &config);
        let second = aggregate_metrics(TRANSCRIPT, &hint, &positive(), &config);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_estimated_duration_uses_reference_rate() {
        let record = aggregate_metrics(
            TRANSCRIPT,
            &DurationHint::default(),
            &positive(),
            &AnalysisConfig::default(),
        );

        assert_eq!(record.duration_source, DurationSource::Estimated);
        assert_eq!(record.estimated_duration_seconds, 10.8);
        assert_eq!(record.pace_wpm, 150.0);
    }

    #[test]
    fn test_empty_transcript() {
        let record = aggregate_metrics(
            "",
            &DurationHint::default(),
            &SentimentSignal::degraded(),
            &AnalysisConfig::default(),
        );

        assert_eq!(record.word_count, 0);
        assert_eq!(record.pace_wpm, 0.0);
        assert_eq!(record.filler_words.total, 0);
        assert!(record.tone.degraded);
        assert!(record.confidence.sentiment_degraded);
    }

    #[test]
    fn test_config_from_toml() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            fillers = ["um", "er"]

            [pace]
            reference_wpm = 130.0

            [confidence]
            base_score = 100.0

            [tone]
            mode = "pass_through"
            "#,
        )
        .unwrap();

        assert_eq!(config.pace.reference_wpm, 130.0);
        assert_eq!(config.confidence.base_score, 100.0);
        assert_eq!(config.confidence.hedge_penalty, 5.0);
        assert_eq!(config.tone.mode, ToneMode::PassThrough);
        assert_eq!(config.clarity, ClarityConfig::default());
        assert_eq!(config.fillers.labels().collect::<Vec<_>>(), vec!["um", "er"]);
    }
}
