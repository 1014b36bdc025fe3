use tracing::debug;

use crate::analysis::{
    calculate_pace, count_fillers, find_filler_examples, resolve_duration, score_clarity,
    score_confidence, word_count, AnalysisConfig, DurationHint,
};
use crate::models::{
    DurationSource, FocusArea, FocusConstraints, FocusMetrics, FocusResult, FocusStatus,
    SentimentLabel, SentimentSignal,
};

/// Score above which feedback calls a result excellent
const EXCELLENT_SCORE: f64 = 90.0;

/// Filler example sentences quoted in remedial feedback
const FILLER_EXAMPLES: usize = 2;

/// Run the scorer for one focus area and turn the result into feedback.
///
/// Only the scorer relevant to `focus` is invoked.
pub fn run_focus_exercise(
    focus: FocusArea,
    transcript: &str,
    duration: &DurationHint,
    sentiment: &SentimentSignal,
    constraints: &FocusConstraints,
    config: &AnalysisConfig,
) -> FocusResult {
    let result = match focus {
        FocusArea::Pace => pace_exercise(transcript, duration, constraints, config),
        FocusArea::Fillers => filler_exercise(transcript, constraints, config),
        FocusArea::Clarity => clarity_exercise(transcript, constraints, config),
        FocusArea::Confidence => confidence_exercise(transcript, sentiment, constraints, config),
        FocusArea::Tone => tone_exercise(sentiment, constraints),
    };

    debug!("Focus exercise {}: {:?}", focus, result.status);
    result
}

fn status(on_target: bool) -> FocusStatus {
    if on_target {
        FocusStatus::OnTarget
    } else {
        FocusStatus::NeedsWork
    }
}

fn pace_exercise(
    transcript: &str,
    duration: &DurationHint,
    constraints: &FocusConstraints,
    config: &AnalysisConfig,
) -> FocusResult {
    let words = word_count(transcript);
    let resolved = resolve_duration(duration, words, config.pace.reference_wpm);
    let wpm = calculate_pace(transcript, resolved.seconds);
    let target = constraints.pace_range;

    let mut feedback = Vec::new();
    let on_target = target.contains(wpm);
    if on_target {
        feedback.push(format!(
            "Great pacing at {:.1} wpm, right within the {}-{} wpm target.",
            wpm, target.min, target.max
        ));
    } else if wpm < target.min {
        feedback.push(format!(
            "You're speaking at {:.1} wpm, slower than the {}-{} wpm target.",
            wpm, target.min, target.max
        ));
        feedback.push("Keep sentences flowing and trim long pauses between ideas.".to_string());
    } else {
        feedback.push(format!(
            "You're speaking at {:.1} wpm, faster than the {}-{} wpm target.",
            wpm, target.min, target.max
        ));
        feedback.push("Slow down and leave a deliberate pause after each key point.".to_string());
    }
    if resolved.source == DurationSource::Estimated {
        feedback.push(format!(
            "No recording duration was available, so pace assumes {} wpm.",
            config.pace.reference_wpm
        ));
    }

    FocusResult {
        focus_area: FocusArea::Pace,
        status: status(on_target),
        feedback,
        metrics: FocusMetrics::Pace {
            pace_wpm: wpm,
            word_count: words,
            duration_seconds: resolved.seconds,
            duration_source: resolved.source,
            target,
        },
    }
}

fn filler_exercise(
    transcript: &str,
    constraints: &FocusConstraints,
    config: &AnalysisConfig,
) -> FocusResult {
    let report = count_fillers(transcript, &config.fillers);
    let max = constraints.max_fillers;
    let on_target = report.total <= max;

    let mut feedback = Vec::new();
    let mut examples = Vec::new();
    if report.total == 0 {
        feedback.push("Excellent! No filler words detected.".to_string());
    } else if on_target {
        feedback.push(format!(
            "Good control: {} filler word(s), within the limit of {}.",
            report.total, max
        ));
    } else {
        let frequent: Vec<String> = report
            .most_frequent()
            .into_iter()
            .take(3)
            .map(|(filler, count)| format!("\"{}\" x{}", filler, count))
            .collect();
        feedback.push(format!(
            "You used {} filler words (limit {}). Most frequent: {}.",
            report.total,
            max,
            frequent.join(", ")
        ));
        feedback.push("Pause silently instead of filling gaps with sounds.".to_string());

        let used: Vec<&str> = report.most_frequent().into_iter().map(|(f, _)| f).collect();
        examples = find_filler_examples(transcript, &config.fillers.subset(&used), FILLER_EXAMPLES);
        if let Some(example) = examples.first() {
            feedback.push(format!("For example: \"{}\"", example));
        }
    }

    FocusResult {
        focus_area: FocusArea::Fillers,
        status: status(on_target),
        feedback,
        metrics: FocusMetrics::Fillers {
            report,
            max_fillers: max,
            examples,
        },
    }
}

fn clarity_exercise(
    transcript: &str,
    constraints: &FocusConstraints,
    config: &AnalysisConfig,
) -> FocusResult {
    let report = score_clarity(transcript, &config.clarity);
    let min = constraints.min_clarity_score;
    let on_target = report.score >= min;

    let mut feedback = Vec::new();
    if report.score > EXCELLENT_SCORE {
        feedback.push(format!(
            "Excellent clarity (score {:.0}). Your sentences are easy to follow.",
            report.score
        ));
    } else if on_target {
        feedback.push(format!(
            "Good clarity (score {:.0}). Keep sentences short and direct.",
            report.score
        ));
    } else {
        feedback.push(format!(
            "Clarity needs work (score {:.0}, target {:.0}).",
            report.score, min
        ));
        feedback.push(format!(
            "Your sentences average {:.1} words; aim for {}-{} and fewer complex transitions.",
            report.average_sentence_length,
            config.clarity.optimal_min_words,
            config.clarity.optimal_max_words
        ));
        if let Some(example) = report.unclear_examples.first() {
            feedback.push(format!("Consider rephrasing: \"{}\"", example));
        }
    }

    FocusResult {
        focus_area: FocusArea::Clarity,
        status: status(on_target),
        feedback,
        metrics: FocusMetrics::Clarity {
            report,
            min_score: min,
        },
    }
}

fn confidence_exercise(
    transcript: &str,
    sentiment: &SentimentSignal,
    constraints: &FocusConstraints,
    config: &AnalysisConfig,
) -> FocusResult {
    let report = score_confidence(transcript, sentiment, &config.confidence);
    let min = constraints.min_confidence_score;
    let on_target = report.score >= min;

    let mut feedback = Vec::new();
    if report.score > EXCELLENT_SCORE {
        feedback.push(format!(
            "Excellent confidence (score {:.0}). You sound assured and decisive.",
            report.score
        ));
    } else if on_target {
        feedback.push(format!(
            "Good confidence (score {:.0}). A few firmer statements would lift it further.",
            report.score
        ));
    } else {
        feedback.push(format!(
            "Confidence needs work (score {:.0}, target {:.0}).",
            report.score, min
        ));
        feedback.push(format!(
            "You used {} hedging phrase(s); replace \"maybe\" and \"I think\" with direct statements.",
            report.hedging_markers
        ));
        if let Some(example) = report.hedging_examples.first() {
            feedback.push(format!("Try restating: \"{}\"", example));
        }
    }

    FocusResult {
        focus_area: FocusArea::Confidence,
        status: status(on_target),
        feedback,
        metrics: FocusMetrics::Confidence {
            report,
            min_score: min,
        },
    }
}

fn tone_exercise(sentiment: &SentimentSignal, constraints: &FocusConstraints) -> FocusResult {
    let primary = sentiment.distribution.argmax();
    let required = &constraints.required_tones;
    // An all-zero distribution has no tone to compare
    let on_target =
        !sentiment.degraded && (required.is_empty() || required.contains(&primary));

    let mut feedback = Vec::new();
    if sentiment.degraded {
        feedback.push(
            "Sentiment analysis was unavailable, so tone could not be measured.".to_string(),
        );
        feedback.push("Record the exercise again to get tone feedback.".to_string());
    } else if on_target {
        feedback.push(format!(
            "Your tone came across as {}, matching the target.",
            primary
        ));
    } else {
        feedback.push(format!(
            "Your tone came across as {}; aim for {}.",
            primary,
            join_labels(required)
        ));
        feedback.push(
            "Adjust word choice and emphasis to carry the intended tone.".to_string(),
        );
    }

    FocusResult {
        focus_area: FocusArea::Tone,
        status: status(on_target),
        feedback,
        metrics: FocusMetrics::Tone {
            primary,
            required: required.clone(),
            distribution: sentiment.distribution,
            degraded: sentiment.degraded,
        },
    }
}

fn join_labels(labels: &[SentimentLabel]) -> String {
    labels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}
