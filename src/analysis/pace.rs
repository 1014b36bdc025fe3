use serde::{Deserialize, Serialize};

use super::text::{round1, word_count};
use crate::models::DurationSource;

/// Duration candidates gathered from the request and the transcription job
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationHint {
    /// Speech duration reported by the transcription service
    pub service_seconds: Option<f64>,
    /// Duration supplied by the client with the upload
    pub client_seconds: Option<f64>,
}

impl DurationHint {
    pub fn from_client(seconds: f64) -> Self {
        Self {
            service_seconds: None,
            client_seconds: Some(seconds),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDuration {
    pub seconds: f64,
    pub source: DurationSource,
}

/// Pick the duration used for pace: service-reported, then client-supplied,
/// then an estimate at `reference_wpm`. Non-positive and non-finite
/// candidates are skipped. The estimate is zero for an empty transcript.
pub fn resolve_duration(hint: &DurationHint, words: usize, reference_wpm: f64) -> ResolvedDuration {
    if let Some(seconds) = hint.service_seconds.filter(|s| usable(*s)) {
        return ResolvedDuration {
            seconds,
            source: DurationSource::Service,
        };
    }

    if let Some(seconds) = hint.client_seconds.filter(|s| usable(*s)) {
        return ResolvedDuration {
            seconds,
            source: DurationSource::Client,
        };
    }

    let seconds = if usable(reference_wpm) {
        words as f64 / reference_wpm * 60.0
    } else {
        0.0
    };

    ResolvedDuration {
        seconds,
        source: DurationSource::Estimated,
    }
}

/// Words per minute, rounded to one decimal. Returns 0.0 when the duration
/// is zero, negative or not finite.
pub fn calculate_pace(transcript: &str, duration_seconds: f64) -> f64 {
    if !usable(duration_seconds) {
        return 0.0;
    }
    let minutes = duration_seconds / 60.0;
    round1(word_count(transcript) as f64 / minutes)
}

fn usable(seconds: f64) -> bool {
    seconds.is_finite() && seconds > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_WORDS: &str = "one two three four five six seven eight nine ten";

    #[test]
    fn test_calculate_pace() {
        assert_eq!(calculate_pace(TEN_WORDS, 5.0), 120.0);
        assert_eq!(calculate_pace(TEN_WORDS, 7.0), 85.7);
    }

    #[test]
    fn test_pace_without_duration_is_zero() {
        assert_eq!(calculate_pace(TEN_WORDS, 0.0), 0.0);
        assert_eq!(calculate_pace(TEN_WORDS, -3.0), 0.0);
        assert_eq!(calculate_pace(TEN_WORDS, f64::NAN), 0.0);
        assert_eq!(calculate_pace("", 10.0), 0.0);
    }

    #[test]
    fn test_pace_decreases_with_duration() {
        let mut previous = f64::INFINITY;
        for seconds in [1.0, 2.0, 3.5, 10.0, 60.0, 600.0] {
            let pace = calculate_pace(TEN_WORDS, seconds);
            assert!(pace <= previous, "{} > {} at {}s", pace, previous, seconds);
            previous = pace;
        }
    }

    #[test]
    fn test_resolve_prefers_service() {
        let hint = DurationHint {
            service_seconds: Some(42.0),
            client_seconds: Some(30.0),
        };
        let resolved = resolve_duration(&hint, 100, 150.0);

        assert_eq!(resolved.seconds, 42.0);
        assert_eq!(resolved.source, DurationSource::Service);
    }

    #[test]
    fn test_resolve_falls_back_to_client() {
        let hint = DurationHint {
            service_seconds: Some(0.0),
            client_seconds: Some(30.0),
        };
        let resolved = resolve_duration(&hint, 100, 150.0);

        assert_eq!(resolved.seconds, 30.0);
        assert_eq!(resolved.source, DurationSource::Client);
    }

    #[test]
    fn test_resolve_estimates_from_reference_rate() {
        let hint = DurationHint {
            service_seconds: None,
            client_seconds: Some(-5.0),
        };
        let resolved = resolve_duration(&hint, 75, 150.0);

        assert_eq!(resolved.seconds, 30.0);
        assert_eq!(resolved.source, DurationSource::Estimated);
    }

    #[test]
    fn test_resolve_empty_transcript_without_hints() {
        let resolved = resolve_duration(&DurationHint::default(), 0, 150.0);

        assert_eq!(resolved.seconds, 0.0);
        assert_eq!(calculate_pace("", resolved.seconds), 0.0);
    }
}
