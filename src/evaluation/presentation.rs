use serde::{Deserialize, Serialize};

use crate::models::{MetricsRecord, SentimentLabel};

/// Limits beyond which a presentation earns a practice exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationThresholds {
    pub max_fillers: usize,
    pub max_pace_wpm: f64,
}

impl Default for PresentationThresholds {
    fn default() -> Self {
        Self {
            max_fillers: 3,
            max_pace_wpm: 180.0,
        }
    }
}

/// Practice exercises suggested for a full presentation
pub fn suggest_exercises(metrics: &MetricsRecord, thresholds: &PresentationThresholds) -> Vec<String> {
    let mut exercises = Vec::new();

    if metrics.filler_words.total > thresholds.max_fillers {
        exercises.push("Practice reducing filler words like 'um' and 'uh'.".to_string());
    }
    if metrics.pace_wpm > thresholds.max_pace_wpm {
        exercises.push("Practice slowing down your speech.".to_string());
    }
    // The classifier's own label wins over the argmax when it gave one
    let tone = metrics.tone.label.unwrap_or(metrics.tone.primary);
    if !metrics.tone.degraded && tone == SentimentLabel::Negative {
        exercises.push("Try practicing positive phrasing and tone.".to_string());
    }

    exercises
}
