use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AnalysisError;

/// Labels produced by the external sentiment classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl SentimentLabel {
    /// Canonical key order of the classifier response. Ties in argmax fall
    /// back to this order when the input gave none.
    pub const ALL: [SentimentLabel; 4] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
            SentimentLabel::Mixed => "MIXED",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => Ok(SentimentLabel::Positive),
            "NEGATIVE" => Ok(SentimentLabel::Negative),
            "NEUTRAL" => Ok(SentimentLabel::Neutral),
            "MIXED" => Ok(SentimentLabel::Mixed),
            other => Err(AnalysisError::InvalidInput(format!(
                "unknown sentiment label {:?}",
                other
            ))),
        }
    }
}

/// Independent intensities in [0, 1] for each sentiment label.
/// The values need not sum to 1.
///
/// Remembers the order in which labels appeared in the classifier output;
/// argmax ties go to the label seen first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub mixed: f64,
    #[serde(skip, default = "canonical_order")]
    order: [SentimentLabel; 4],
}

fn canonical_order() -> [SentimentLabel; 4] {
    SentimentLabel::ALL
}

impl Default for SentimentDistribution {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl SentimentDistribution {
    pub fn new(positive: f64, negative: f64, neutral: f64, mixed: f64) -> Self {
        Self {
            positive: sanitize(positive),
            negative: sanitize(negative),
            neutral: sanitize(neutral),
            mixed: sanitize(mixed),
            order: SentimentLabel::ALL,
        }
    }

    /// Build from label-keyed scores in the order the classifier emitted
    /// them. Keys are matched case-insensitively; unrecognized keys are
    /// ignored. Returns `None` when no key was recognized.
    pub fn from_scores(scores: &[(String, f64)]) -> Option<Self> {
        let mut distribution = Self::default();
        let mut seen: Vec<SentimentLabel> = Vec::with_capacity(4);

        for (key, value) in scores {
            if let Ok(label) = key.parse::<SentimentLabel>() {
                distribution.set(label, *value);
                if !seen.contains(&label) {
                    seen.push(label);
                }
            }
        }

        if seen.is_empty() {
            return None;
        }

        // Labels the classifier omitted rank after the ones it reported
        for label in SentimentLabel::ALL {
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        distribution.order.copy_from_slice(&seen);

        Some(distribution)
    }

    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Mixed => self.mixed,
        }
    }

    fn set(&mut self, label: SentimentLabel, value: f64) {
        let value = sanitize(value);
        match label {
            SentimentLabel::Positive => self.positive = value,
            SentimentLabel::Negative => self.negative = value,
            SentimentLabel::Neutral => self.neutral = value,
            SentimentLabel::Mixed => self.mixed = value,
        }
    }

    /// Label with the highest intensity; ties go to the label the classifier
    /// listed first.
    pub fn argmax(&self) -> SentimentLabel {
        let mut best = self.order[0];
        for label in self.order.into_iter().skip(1) {
            if self.get(label) > self.get(best) {
                best = label;
            }
        }
        best
    }

    /// Largest of the positive, negative and mixed intensities
    pub fn max_non_neutral(&self) -> f64 {
        self.positive.max(self.negative).max(self.mixed)
    }

    /// Positive minus negative intensity, in [-1, 1]
    pub fn polarity(&self) -> f64 {
        self.positive - self.negative
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Resolved sentiment input for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentSignal {
    /// The classifier's own label, when it reported one
    pub label: Option<SentimentLabel>,
    pub distribution: SentimentDistribution,
    /// True when the classifier output was missing or empty and an all-zero
    /// distribution was substituted
    pub degraded: bool,
}

impl SentimentSignal {
    pub fn new(label: Option<SentimentLabel>, distribution: SentimentDistribution) -> Self {
        Self {
            label,
            distribution,
            degraded: false,
        }
    }

    /// All-zero substitute used when the classifier gave nothing usable
    pub fn degraded() -> Self {
        Self {
            label: None,
            distribution: SentimentDistribution::default(),
            degraded: true,
        }
    }

    pub fn from_payload(payload: SentimentPayload) -> Self {
        match payload {
            SentimentPayload::Classifier {
                sentiment,
                sentiment_score,
            } => {
                let label = sentiment.as_deref().and_then(|s| s.parse().ok());
                match SentimentDistribution::from_scores(&sentiment_score) {
                    Some(distribution) => Self::new(label, distribution),
                    None => Self {
                        label,
                        ..Self::degraded()
                    },
                }
            }
            SentimentPayload::Scores(scores) => SentimentDistribution::from_scores(&scores)
                .map(|d| Self::new(None, d))
                .unwrap_or_else(Self::degraded),
        }
    }
}

impl Default for SentimentSignal {
    fn default() -> Self {
        Self::degraded()
    }
}

/// Accepted shapes of the classifier output
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SentimentPayload {
    /// Full classifier response: `{"Sentiment": "...", "SentimentScore": {...}}`
    Classifier {
        #[serde(rename = "Sentiment", default)]
        sentiment: Option<String>,
        #[serde(rename = "SentimentScore", deserialize_with = "ordered_scores")]
        sentiment_score: Vec<(String, f64)>,
    },
    /// Bare label-keyed mapping
    Scores(#[serde(deserialize_with = "ordered_scores")] Vec<(String, f64)>),
}

/// Read a JSON object as key/score pairs, keeping document order
fn ordered_scores<'de, D>(deserializer: D) -> Result<Vec<(String, f64)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScoresVisitor;

    impl<'de> Visitor<'de> for ScoresVisitor {
        type Value = Vec<(String, f64)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of sentiment label to score")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut scores = Vec::with_capacity(map.size_hint().unwrap_or(4));
            while let Some((key, value)) = map.next_entry::<String, f64>()? {
                scores.push((key, value));
            }
            Ok(scores)
        }
    }

    deserializer.deserialize_map(ScoresVisitor)
}
