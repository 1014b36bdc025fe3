use tracing::debug;

use crate::models::{
    ConstraintResult, Constraints, MetricsRecord, Observed, PaceRange, Violation, ViolationField,
};

/// Fixed advice attached to each kind of violation
pub fn suggestion_for(field: ViolationField) -> &'static str {
    match field {
        ViolationField::Duration => "Adjust speech length to match the target duration.",
        ViolationField::Fillers => "Practice reducing filler words; see examples in feedback.",
        ViolationField::RequiredPhrases => "Include the required phrases in the response.",
        ViolationField::ForbiddenPhrases => "Avoid using forbidden phrases.",
        ViolationField::Pace => "Adjust pace to fall within the required range.",
        ViolationField::Confidence => "Reduce uncertainty markers and use stronger statements.",
    }
}

fn violation(field: ViolationField, expected: String, actual: Observed) -> Violation {
    Violation {
        field,
        expected,
        actual,
        suggestion: suggestion_for(field).to_string(),
    }
}

/// Check a metrics record against a constraint set.
///
/// Every present constraint is evaluated, even after an earlier one fails.
/// Violations appear in a fixed order: duration, fillers, required phrases,
/// forbidden phrases, pace, confidence.
pub fn evaluate_constraints(
    transcript: &str,
    metrics: &MetricsRecord,
    constraints: &Constraints,
) -> ConstraintResult {
    let mut violations = Vec::new();
    let lower = transcript.to_lowercase();

    if let Some(target) = constraints.target_duration_seconds {
        let tolerance = constraints.tolerance();
        let actual = metrics.estimated_duration_seconds;
        if (actual - target).abs() > tolerance {
            violations.push(violation(
                ViolationField::Duration,
                format!("{}±{}s", target, tolerance),
                Observed::Seconds(actual),
            ));
        }
    }

    if let Some(max) = constraints.max_fillers {
        let total = metrics.filler_words.total;
        if total > max {
            violations.push(violation(
                ViolationField::Fillers,
                format!("<= {}", max),
                Observed::Count(total),
            ));
        }
    }

    if let Some(required) = &constraints.required_phrases {
        let missing: Vec<String> = required
            .iter()
            .filter(|p| !lower.contains(&p.to_lowercase()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            violations.push(violation(
                ViolationField::RequiredPhrases,
                format!("all of {:?}", required),
                Observed::Missing(missing),
            ));
        }
    }

    if let Some(forbidden) = &constraints.forbidden_phrases {
        let present: Vec<String> = forbidden
            .iter()
            .filter(|p| lower.contains(&p.to_lowercase()))
            .cloned()
            .collect();
        if !present.is_empty() {
            violations.push(violation(
                ViolationField::ForbiddenPhrases,
                format!("none of {:?}", forbidden),
                Observed::Present(present),
            ));
        }
    }

    if let Some(range) = constraints.pace_range {
        if !range.contains(metrics.pace_wpm) {
            violations.push(violation(
                ViolationField::Pace,
                describe_range(&range),
                Observed::Wpm(metrics.pace_wpm),
            ));
        }
    }

    if let Some(min) = constraints.min_confidence_score {
        let score = metrics.confidence.score;
        if score < min {
            violations.push(violation(
                ViolationField::Confidence,
                format!(">= {}", min),
                Observed::Score(score),
            ));
        }
    }

    for v in &violations {
        debug!("Constraint {} violated: expected {}", v.field.as_str(), v.expected);
    }

    let result = ConstraintResult::from_violations(violations);
    debug!(
        "Constraints respected={} ({} violations)",
        result.respected,
        result.violations.len()
    );
    result
}

fn describe_range(range: &PaceRange) -> String {
    format!("{}-{} wpm", range.min, range.max)
}

/// Action items for a constraint result, one per violation, in order
pub fn suggestions_from(result: &ConstraintResult) -> Vec<String> {
    result
        .violations
        .iter()
        .map(|v| v.suggestion.clone())
        .collect()
}
