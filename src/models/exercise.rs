use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{
    ClarityReport, ConfidenceReport, DurationSource, FillerReport, PaceRange,
    SentimentDistribution, SentimentLabel,
};
use crate::error::AnalysisError;

/// The single skill an exercise drills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    Pace,
    Fillers,
    Clarity,
    Confidence,
    Tone,
}

impl FocusArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            FocusArea::Pace => "pace",
            FocusArea::Fillers => "fillers",
            FocusArea::Clarity => "clarity",
            FocusArea::Confidence => "confidence",
            FocusArea::Tone => "tone",
        }
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FocusArea {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pace" => Ok(FocusArea::Pace),
            "fillers" | "filler" | "filler_words" => Ok(FocusArea::Fillers),
            "clarity" => Ok(FocusArea::Clarity),
            "confidence" => Ok(FocusArea::Confidence),
            "tone" => Ok(FocusArea::Tone),
            other => Err(AnalysisError::UnknownFocusArea(other.to_string())),
        }
    }
}

/// Targets for focus exercises. Each field has a default so a partial
/// document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConstraints {
    pub pace_range: PaceRange,
    pub max_fillers: usize,
    pub min_clarity_score: f64,
    pub min_confidence_score: f64,
    pub required_tones: Vec<SentimentLabel>,
}

impl Default for FocusConstraints {
    fn default() -> Self {
        Self {
            pace_range: PaceRange::new(120.0, 150.0),
            max_fillers: 3,
            min_clarity_score: 70.0,
            min_confidence_score: 70.0,
            required_tones: vec![SentimentLabel::Positive],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusStatus {
    OnTarget,
    NeedsWork,
}

/// Metric fields reported for the exercised focus area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FocusMetrics {
    Pace {
        pace_wpm: f64,
        word_count: usize,
        duration_seconds: f64,
        duration_source: DurationSource,
        target: PaceRange,
    },
    Fillers {
        report: FillerReport,
        max_fillers: usize,
        examples: Vec<String>,
    },
    Clarity {
        report: ClarityReport,
        min_score: f64,
    },
    Confidence {
        report: ConfidenceReport,
        min_score: f64,
    },
    Tone {
        primary: SentimentLabel,
        required: Vec<SentimentLabel>,
        distribution: SentimentDistribution,
        degraded: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusResult {
    pub focus_area: FocusArea,
    pub status: FocusStatus,
    /// One to three feedback lines
    pub feedback: Vec<String>,
    pub metrics: FocusMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_area_from_str() {
        assert_eq!("Pace".parse::<FocusArea>().unwrap(), FocusArea::Pace);
        assert_eq!("filler".parse::<FocusArea>().unwrap(), FocusArea::Fillers);
        assert!(matches!(
            "posture".parse::<FocusArea>(),
            Err(AnalysisError::UnknownFocusArea(_))
        ));
    }

    #[test]
    fn test_partial_focus_constraints() {
        let json = r#"{"max_fillers": 1, "required_tones": ["NEUTRAL", "POSITIVE"]}"#;

        let constraints: FocusConstraints = serde_json::from_str(json).unwrap();

        assert_eq!(constraints.max_fillers, 1);
        assert_eq!(
            constraints.required_tones,
            vec![SentimentLabel::Neutral, SentimentLabel::Positive]
        );
        assert_eq!(constraints.pace_range, PaceRange::new(120.0, 150.0));
        assert_eq!(constraints.min_clarity_score, 70.0);
    }
}
