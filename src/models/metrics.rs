use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{SentimentDistribution, SentimentLabel};

/// Filler-word counts for one transcript.
///
/// `total` always equals the sum of `per_filler`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillerReport {
    pub total: usize,
    pub per_filler: BTreeMap<String, usize>,
}

impl FillerReport {
    pub fn from_counts(per_filler: BTreeMap<String, usize>) -> Self {
        Self {
            total: per_filler.values().sum(),
            per_filler,
        }
    }

    /// Fillers that occurred at least once, most frequent first
    pub fn most_frequent(&self) -> Vec<(&str, usize)> {
        let mut used: Vec<(&str, usize)> = self
            .per_filler
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(filler, count)| (filler.as_str(), *count))
            .collect();
        used.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        used
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarityReport {
    /// 0-100, higher is clearer
    pub score: f64,
    pub average_sentence_length: f64,
    pub complex_transitions: usize,
    pub unclear_examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceReport {
    /// 0-100, higher is more assertive
    pub score: f64,
    pub confidence_markers: usize,
    pub hedging_markers: usize,
    pub hedging_examples: Vec<String>,
    /// The tone modifier was computed from a substituted all-zero distribution
    pub sentiment_degraded: bool,
}

/// Tone framing of a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneClassification {
    Objective,
    Subjective,
    Balanced,
    /// The classifier's own label passed through unchanged
    Sentiment(SentimentLabel),
}

impl ToneClassification {
    pub fn describe(&self) -> String {
        match self {
            ToneClassification::Objective => "objective".to_string(),
            ToneClassification::Subjective => "subjective".to_string(),
            ToneClassification::Balanced => "balanced".to_string(),
            ToneClassification::Sentiment(label) => label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneReport {
    pub classification: ToneClassification,
    /// Argmax of the distribution
    pub primary: SentimentLabel,
    /// The classifier's own label, when it reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<SentimentLabel>,
    pub distribution: SentimentDistribution,
    /// The distribution is a zero-valued substitute for a missing signal
    pub degraded: bool,
}

/// Where the duration used for pace came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationSource {
    /// Reported by the transcription service
    Service,
    /// Supplied by the client with the request
    Client,
    /// Derived from word count at the reference speaking rate
    Estimated,
}

/// Everything computed for one transcript. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub tone: ToneReport,
    pub pace_wpm: f64,
    pub word_count: usize,
    pub estimated_duration_seconds: f64,
    pub duration_source: DurationSource,
    pub filler_words: FillerReport,
    pub clarity: ClarityReport,
    pub confidence: ConfidenceReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filler_report_total() {
        let mut counts = BTreeMap::new();
        counts.insert("um".to_string(), 3);
        counts.insert("like".to_string(), 2);
        counts.insert("so".to_string(), 0);

        let report = FillerReport::from_counts(counts);

        assert_eq!(report.total, 5);
        assert_eq!(report.most_frequent(), vec![("um", 3), ("like", 2)]);
    }

    #[test]
    fn test_tone_classification_serialization() {
        let json = serde_json::to_string(&ToneClassification::Objective).unwrap();
        assert_eq!(json, r#""objective""#);

        let json =
            serde_json::to_string(&ToneClassification::Sentiment(SentimentLabel::Negative)).unwrap();
        assert_eq!(json, r#"{"sentiment":"NEGATIVE"}"#);
    }
}
