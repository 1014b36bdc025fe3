use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::analysis::{AnalysisConfig, DurationHint};
use crate::error::AnalysisError;
use crate::models::{
    Constraints, FocusConstraints, SentimentPayload, SentimentSignal, TranscribeDocument,
};

/// Transcript text plus whatever timing the transcription service reported
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptInput {
    pub text: String,
    pub service_duration_seconds: Option<f64>,
}

impl TranscriptInput {
    /// Duration candidates for this transcript, with an optional
    /// client-supplied duration
    pub fn duration_hint(&self, client_seconds: Option<f64>) -> DurationHint {
        DurationHint {
            service_seconds: self.service_duration_seconds,
            client_seconds,
        }
    }
}

/// Load a transcript from a transcription-service JSON document or a plain
/// text file
pub fn parse_transcript_file(path: &Path) -> Result<TranscriptInput> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        || content.trim_start().starts_with('{');

    if is_json {
        parse_transcribe_json(&content)
    } else {
        Ok(TranscriptInput {
            text: content.trim().to_string(),
            service_duration_seconds: None,
        })
    }
}

/// Parse a transcription-service JSON document
pub fn parse_transcribe_json(json: &str) -> Result<TranscriptInput> {
    let doc: TranscribeDocument =
        serde_json::from_str(json).context("Failed to parse transcript JSON")?;

    let text = doc.transcript().ok_or(AnalysisError::MissingTranscript)?;

    Ok(TranscriptInput {
        text: text.to_string(),
        service_duration_seconds: doc.reported_duration_seconds(),
    })
}

/// Parse sentiment classifier output. A missing or empty signal degrades to
/// an all-zero distribution rather than failing.
pub fn parse_sentiment_json(json: &str) -> Result<SentimentSignal> {
    if json.trim().is_empty() {
        warn!("Sentiment input is empty; using a zero-valued distribution");
        return Ok(SentimentSignal::degraded());
    }

    let payload: SentimentPayload =
        serde_json::from_str(json).context("Failed to parse sentiment JSON")?;
    let signal = SentimentSignal::from_payload(payload);
    if signal.degraded {
        warn!("Sentiment input has no recognized scores; using a zero-valued distribution");
    }
    Ok(signal)
}

pub fn load_sentiment(path: Option<&Path>) -> Result<SentimentSignal> {
    match path {
        Some(path) => parse_sentiment_json(&read(path)?),
        None => {
            warn!("No sentiment input given; using a zero-valued distribution");
            Ok(SentimentSignal::degraded())
        }
    }
}

/// Load and validate a constraint document. Absent path means no constraints.
pub fn load_constraints(path: Option<&Path>) -> Result<Constraints> {
    let Some(path) = path else {
        return Ok(Constraints::default());
    };
    let constraints: Constraints = parse_json_file(path)?;
    constraints.validate()?;
    Ok(constraints)
}

pub fn load_focus_constraints(path: Option<&Path>) -> Result<FocusConstraints> {
    let Some(path) = path else {
        return Ok(FocusConstraints::default());
    };
    let constraints: FocusConstraints = parse_json_file(path)?;
    constraints.pace_range.validate()?;
    Ok(constraints)
}

/// Load scorer configuration from TOML. Absent path means defaults.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    AnalysisConfig::from_toml_str(&read(path)?)
        .with_context(|| format!("Failed to parse config: {:?}", path))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}

fn parse_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    serde_json::from_str(&read(path)?).with_context(|| format!("Failed to parse JSON: {:?}", path))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::models::{PaceRange, SentimentLabel};

    const TRANSCRIBE_JSON: &str = r#"{
        "jobName": "exercise-transcription-1700000000",
        "results": {
            "transcripts": [{"transcript": "I love tacos and health."}],
            "items": [
                {"type": "pronunciation", "start_time": "0.1", "end_time": "0.4"},
                {"type": "pronunciation", "start_time": "0.4", "end_time": "0.9"},
                {"type": "pronunciation", "start_time": "0.9", "end_time": "1.3"},
                {"type": "pronunciation", "start_time": "1.3", "end_time": "1.5"},
                {"type": "pronunciation", "start_time": "1.5", "end_time": "2.0"},
                {"type": "punctuation"}
            ]
        }
    }"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_transcribe_json() {
        let input = parse_transcribe_json(TRANSCRIBE_JSON).unwrap();

        assert_eq!(input.text, "I love tacos and health.");
        assert_eq!(input.service_duration_seconds, Some(2.0));

        let hint = input.duration_hint(Some(30.0));
        assert_eq!(hint.service_seconds, Some(2.0));
        assert_eq!(hint.client_seconds, Some(30.0));
    }

    #[test]
    fn test_missing_transcript_is_rejected() {
        let err = parse_transcribe_json(r#"{"results": {"transcripts": []}}"#).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::MissingTranscript)
        ));
    }

    #[test]
    fn test_parse_transcript_files() {
        let json = write_temp(".json", TRANSCRIBE_JSON);
        let input = parse_transcript_file(json.path()).unwrap();
        assert_eq!(input.service_duration_seconds, Some(2.0));

        let text = write_temp(".txt", "  Um, hello there.\n");
        let input = parse_transcript_file(text.path()).unwrap();
        assert_eq!(input.text, "Um, hello there.");
        assert_eq!(input.service_duration_seconds, None);
    }

    #[test]
    fn test_parse_sentiment() {
        let signal = parse_sentiment_json(
            r#"{"Sentiment": "NEGATIVE", "SentimentScore": {"Positive": 0.1, "Negative": 0.7, "Neutral": 0.15, "Mixed": 0.05}}"#,
        )
        .unwrap();
        assert_eq!(signal.label, Some(SentimentLabel::Negative));
        assert!(!signal.degraded);

        let tied = parse_sentiment_json(
            r#"{"NEUTRAL": 0.45, "POSITIVE": 0.45, "NEGATIVE": 0.05, "MIXED": 0.05}"#,
        )
        .unwrap();
        assert_eq!(tied.distribution.argmax(), SentimentLabel::Neutral);

        assert!(parse_sentiment_json("").unwrap().degraded);
        assert!(parse_sentiment_json("{}").unwrap().degraded);
        assert!(parse_sentiment_json("not json").is_err());
        assert!(load_sentiment(None).unwrap().degraded);
    }

    #[test]
    fn test_load_constraints() {
        let file = write_temp(
            ".json",
            r#"{"max_fillers": 3, "pace_range": {"min": 100, "max": 160}, "unknown": true}"#,
        );
        let constraints = load_constraints(Some(file.path())).unwrap();
        assert_eq!(constraints.max_fillers, Some(3));
        assert_eq!(constraints.pace_range, Some(PaceRange::default()));

        let bad = write_temp(".json", r#"{"pace_range": {"min": 200, "max": 100}}"#);
        assert!(load_constraints(Some(bad.path())).is_err());

        assert_eq!(load_constraints(None).unwrap(), Constraints::default());
    }

    #[test]
    fn test_load_focus_constraints() {
        let file = write_temp(".json", r#"{"min_clarity_score": 80}"#);
        let constraints = load_focus_constraints(Some(file.path())).unwrap();

        assert_eq!(constraints.min_clarity_score, 80.0);
        assert_eq!(constraints.max_fillers, 3);
    }

    #[test]
    fn test_load_config() {
        let file = write_temp(".toml", "[pace]\nreference_wpm = 130.0\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.pace.reference_wpm, 130.0);

        let bad = write_temp(".toml", "fillers = [\"\"]\n");
        assert!(load_config(Some(bad.path())).is_err());
    }
}
