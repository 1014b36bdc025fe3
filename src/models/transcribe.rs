use serde::{Deserialize, Serialize};

/// Root document returned by the transcription service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscribeDocument {
    #[serde(default, rename = "jobName")]
    pub job_name: Option<String>,
    pub results: TranscribeResults,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TranscribeResults {
    #[serde(default)]
    pub transcripts: Vec<TranscribeText>,
    #[serde(default)]
    pub items: Vec<TranscribeItem>,
    #[serde(default)]
    pub audio_segments: Vec<AudioSegment>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscribeText {
    pub transcript: String,
}

/// A recognized word or punctuation mark. Timing is only present on
/// pronunciation items and is encoded as decimal strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscribeItem {
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

/// A contiguous span of speech reported by the service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioSegment {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub transcript: Option<String>,
    pub start_time: String,
    pub end_time: String,
}

impl TranscribeDocument {
    /// Text of the first transcript, if the service produced one
    pub fn transcript(&self) -> Option<&str> {
        self.results
            .transcripts
            .first()
            .map(|t| t.transcript.as_str())
    }

    /// Total speech duration in seconds as reported by the service.
    ///
    /// Prefers the end of the last audio segment and falls back to the
    /// latest item end time.
    pub fn reported_duration_seconds(&self) -> Option<f64> {
        let from_segments = self
            .results
            .audio_segments
            .iter()
            .filter_map(|s| parse_seconds(&s.end_time))
            .fold(None, max_option);

        from_segments.or_else(|| {
            self.results
                .items
                .iter()
                .filter_map(|i| i.end_time.as_deref().and_then(parse_seconds))
                .fold(None, max_option)
        })
    }
}

fn parse_seconds(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s > 0.0)
}

fn max_option(acc: Option<f64>, value: f64) -> Option<f64> {
    Some(acc.map_or(value, |a| a.max(value)))
}
