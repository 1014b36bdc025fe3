use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{ConstraintResult, FocusResult, MetricsRecord, Observed};

/// Machine-readable feedback for one analysis request
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReport {
    pub report_id: String,
    /// RFC 3339 creation time
    pub generated_at: String,
    pub transcript: String,
    pub metrics: MetricsRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_result: Option<ConstraintResult>,
    /// Action items derived from constraint violations
    pub suggestions: Vec<String>,
    /// Practice exercises for a full presentation
    pub suggested_exercises: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<FocusResult>,
}

impl FeedbackReport {
    pub fn new(transcript: &str, metrics: MetricsRecord) -> Self {
        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            transcript: transcript.to_string(),
            metrics,
            constraint_result: None,
            suggestions: vec![],
            suggested_exercises: vec![],
            focus: None,
        }
    }

    pub fn with_constraints(mut self, result: ConstraintResult, suggestions: Vec<String>) -> Self {
        self.constraint_result = Some(result);
        self.suggestions = suggestions;
        self
    }

    pub fn with_exercises(mut self, exercises: Vec<String>) -> Self {
        self.suggested_exercises = exercises;
        self
    }

    pub fn with_focus(mut self, focus: FocusResult) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Columns available to a focus feedback line after its indent
const FEEDBACK_WIDTH: usize = 76;

/// Plain-text rendering of a feedback report
pub struct HumanFeedback<'a> {
    report: &'a FeedbackReport,
}

impl<'a> HumanFeedback<'a> {
    pub fn new(report: &'a FeedbackReport) -> Self {
        Self { report }
    }

    pub fn format(&self) -> String {
        let metrics = &self.report.metrics;
        let mut output = String::new();

        output.push_str("Delivery Feedback\n");
        output.push_str("=================\n");
        output.push_str(&format!(
            "Words: {}  Duration: {} ({:?})  Pace: {:.1} wpm\n",
            metrics.word_count,
            format_duration(metrics.estimated_duration_seconds),
            metrics.duration_source,
            metrics.pace_wpm
        ));
        output.push_str(&format!(
            "Tone: {} (primary {}){}\n",
            metrics.tone.classification.describe(),
            metrics.tone.primary,
            if metrics.tone.degraded {
                ", sentiment unavailable"
            } else {
                ""
            }
        ));
        output.push_str(&format!(
            "Fillers: {}{}\n",
            metrics.filler_words.total,
            format_filler_breakdown(metrics)
        ));
        output.push_str(&format!(
            "Clarity: {:.1}/100 (avg {:.1} words per sentence, {} complex transitions)\n",
            metrics.clarity.score,
            metrics.clarity.average_sentence_length,
            metrics.clarity.complex_transitions
        ));
        output.push_str(&format!(
            "Confidence: {:.1}/100 ({} assertive, {} hedging)\n",
            metrics.confidence.score,
            metrics.confidence.confidence_markers,
            metrics.confidence.hedging_markers
        ));

        if let Some(result) = &self.report.constraint_result {
            output.push('\n');
            if result.respected {
                output.push_str("Constraints: all respected\n");
            } else {
                output.push_str("Constraints: not respected\n");
                for v in &result.violations {
                    output.push_str(&format!(
                        "  - {}: expected {}, got {}\n",
                        v.field.as_str(),
                        v.expected,
                        describe_observed(&v.actual)
                    ));
                }
            }
        }

        push_list(&mut output, "Suggestions", &self.report.suggestions);
        push_list(&mut output, "Suggested exercises", &self.report.suggested_exercises);

        if let Some(focus) = &self.report.focus {
            output.push('\n');
            output.push_str(&format!("Focus: {} ({:?})\n", focus.focus_area, focus.status));
            for line in &focus.feedback {
                for wrapped in wrap_text(line, FEEDBACK_WIDTH) {
                    output.push_str(&format!("  {}\n", wrapped));
                }
            }
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

fn format_filler_breakdown(metrics: &MetricsRecord) -> String {
    let used = metrics.filler_words.most_frequent();
    if used.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = used
        .iter()
        .map(|(filler, count)| format!("{} x{}", filler, count))
        .collect();
    format!(" ({})", parts.join(", "))
}

fn describe_observed(observed: &Observed) -> String {
    match observed {
        Observed::Seconds(s) => format!("{:.1}s", s),
        Observed::Count(n) => n.to_string(),
        Observed::Wpm(w) => format!("{:.1} wpm", w),
        Observed::Score(s) => format!("{:.1}", s),
        Observed::Missing(phrases) => format!("missing {}", phrases.join(", ")),
        Observed::Present(phrases) => format!("present {}", phrases.join(", ")),
    }
}

fn push_list(output: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    output.push('\n');
    output.push_str(&format!("{}:\n", title));
    for item in items {
        output.push_str(&format!("  - {}\n", item));
    }
}

/// Format seconds as MM:SS.s
fn format_duration(seconds: f64) -> String {
    let tenths = (seconds.max(0.0) * 10.0).round() as u64;
    let minutes = tenths / 600;
    let rest = tenths % 600;
    format!("{:02}:{:02}.{}", minutes, rest / 10, rest % 10)
}

/// Greedy word wrap to at most `width` bytes per line. A word longer than
/// `width` gets a line of its own.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for word in text.split_whitespace() {
        match lines.last_mut() {
            Some(line) if line.len() + 1 + word.len() <= width => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{aggregate_metrics, AnalysisConfig, DurationHint};
    use crate::evaluation::{evaluate_constraints, suggestions_from};
    use crate::models::{
        Constraints, FocusArea, FocusMetrics, FocusStatus, SentimentLabel, SentimentSignal,
    };

    fn report() -> FeedbackReport {
        let transcript = "Um, I love tacos and health.";
        let metrics = aggregate_metrics(
            transcript,
            &DurationHint::from_client(3.0),
            &SentimentSignal::degraded(),
            &AnalysisConfig::default(),
        );
        let constraints = Constraints {
            required_phrases: Some(vec!["pizza".to_string()]),
            ..Default::default()
        };
        let result = evaluate_constraints(transcript, &metrics, &constraints);
        let suggestions = suggestions_from(&result);
        FeedbackReport::new(transcript, metrics).with_constraints(result, suggestions)
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "00:00.0");
        assert_eq!(format_duration(3.04), "00:03.0");
        assert_eq!(format_duration(75.5), "01:15.5");
        assert_eq!(format_duration(-2.0), "00:00.0");
    }

    #[test]
    fn test_wrap_feedback_line() {
        let wrapped = wrap_text(
            "Adjust word choice and emphasis to carry the intended tone.",
            20,
        );
        assert_eq!(
            wrapped,
            vec!["Adjust word choice", "and emphasis to", "carry the intended", "tone."]
        );

        assert_eq!(wrap_text("Supercalifragilistic words", 5), vec!["Supercalifragilistic", "words"]);
        assert!(wrap_text("   ", 20).is_empty());
    }

    #[test]
    fn test_focus_feedback_is_wrapped_and_indented() {
        let long_line = "Your sentences ran long, so split each idea into its own sentence and \
                         lead with the point before adding supporting detail or examples."
            .to_string();
        let focus = FocusResult {
            focus_area: FocusArea::Clarity,
            status: FocusStatus::NeedsWork,
            feedback: vec![long_line.clone()],
            metrics: FocusMetrics::Tone {
                primary: SentimentLabel::Neutral,
                required: vec![],
                distribution: Default::default(),
                degraded: true,
            },
        };
        let report = report().with_focus(focus);

        let text = HumanFeedback::new(&report).format();
        let focus_lines: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with("Focus: clarity"))
            .skip(1)
            .collect();

        assert!(focus_lines.len() > 1);
        assert!(focus_lines.iter().all(|l| l.starts_with("  ") && l.len() <= 78));
        assert_eq!(
            focus_lines.iter().map(|l| l.trim()).collect::<Vec<_>>().join(" "),
            long_line
        );
    }

    #[test]
    fn test_human_feedback() {
        let text = HumanFeedback::new(&report()).format();

        assert!(text.contains("Words: 6"));
        assert!(text.contains("Fillers: 1 (um x1)"));
        assert!(text.contains("sentiment unavailable"));
        assert!(text.contains("required_phrases: expected"));
        assert!(text.contains("missing pizza"));
        assert!(text.contains("Include the required phrases in the response."));
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.json");

        report().write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metrics"]["word_count"], 6);
        assert_eq!(value["constraint_result"]["respected"], false);
        assert_eq!(
            value["constraint_result"]["violations"][0]["actual"]["missing"][0],
            "pizza"
        );
        assert!(value.get("focus").is_none());
        assert_eq!(value["report_id"].as_str().unwrap().len(), 36);
    }

    #[test]
    fn test_write_human_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.txt");
        let report = report();

        HumanFeedback::new(&report).write_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Delivery Feedback"));
    }
}
