use serde::{Deserialize, Serialize};

use crate::models::{SentimentDistribution, SentimentSignal, ToneClassification, ToneReport};

/// How the tone report frames the sentiment signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMode {
    /// Objective / subjective / balanced
    #[default]
    Framing,
    /// The classifier's own label, or the argmax when it gave none
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    /// Neutral intensity at or above which the tone is objective
    pub neutral_threshold: f64,
    /// Lead of the strongest non-neutral intensity over neutral needed for
    /// a subjective tone
    pub subjectivity_margin: f64,
    pub mode: ToneMode,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            neutral_threshold: 0.60,
            subjectivity_margin: 0.15,
            mode: ToneMode::Framing,
        }
    }
}

/// Build the tone report for a sentiment signal. Pure; no classifier call.
pub fn classify_tone(sentiment: &SentimentSignal, config: &ToneConfig) -> ToneReport {
    let distribution = sentiment.distribution;
    let primary = distribution.argmax();

    let classification = match config.mode {
        ToneMode::Framing => frame(&distribution, config),
        ToneMode::PassThrough => ToneClassification::Sentiment(sentiment.label.unwrap_or(primary)),
    };

    ToneReport {
        classification,
        primary,
        label: sentiment.label,
        distribution,
        degraded: sentiment.degraded,
    }
}

fn frame(distribution: &SentimentDistribution, config: &ToneConfig) -> ToneClassification {
    if distribution.neutral >= config.neutral_threshold {
        ToneClassification::Objective
    } else if distribution.max_non_neutral() - distribution.neutral > config.subjectivity_margin {
        ToneClassification::Subjective
    } else {
        ToneClassification::Balanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentLabel;

    fn signal(positive: f64, negative: f64, neutral: f64, mixed: f64) -> SentimentSignal {
        SentimentSignal::new(None, SentimentDistribution::new(positive, negative, neutral, mixed))
    }

    #[test]
    fn test_objective_when_neutral_dominates() {
        let report = classify_tone(&signal(0.2, 0.05, 0.7, 0.05), &ToneConfig::default());

        assert_eq!(report.classification, ToneClassification::Objective);
        assert_eq!(report.primary, SentimentLabel::Neutral);
    }

    #[test]
    fn test_subjective_when_polarized() {
        let report = classify_tone(&signal(0.9, 0.05, 0.03, 0.02), &ToneConfig::default());

        assert_eq!(report.classification, ToneClassification::Subjective);
        assert_eq!(report.primary, SentimentLabel::Positive);
    }

    #[test]
    fn test_balanced_within_margin() {
        let report = classify_tone(&signal(0.5, 0.0, 0.4, 0.1), &ToneConfig::default());
        assert_eq!(report.classification, ToneClassification::Balanced);
    }

    #[test]
    fn test_neutral_threshold_is_inclusive() {
        let report = classify_tone(&signal(0.3, 0.05, 0.6, 0.05), &ToneConfig::default());
        assert_eq!(report.classification, ToneClassification::Objective);
    }

    #[test]
    fn test_degraded_signal_is_balanced() {
        let report = classify_tone(&SentimentSignal::degraded(), &ToneConfig::default());

        assert_eq!(report.classification, ToneClassification::Balanced);
        assert!(report.degraded);
    }

    #[test]
    fn test_pass_through_uses_reported_label() {
        let config = ToneConfig {
            mode: ToneMode::PassThrough,
            ..Default::default()
        };
        let mut sentiment = signal(0.4, 0.1, 0.45, 0.05);
        sentiment.label = Some(SentimentLabel::Positive);

        let report = classify_tone(&sentiment, &config);

        assert_eq!(
            report.classification,
            ToneClassification::Sentiment(SentimentLabel::Positive)
        );
        assert_eq!(report.primary, SentimentLabel::Neutral);

        sentiment.label = None;
        let report = classify_tone(&sentiment, &config);
        assert_eq!(
            report.classification,
            ToneClassification::Sentiment(SentimentLabel::Neutral)
        );
    }
}
