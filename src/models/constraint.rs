use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

pub const DEFAULT_TOLERANCE_SECONDS: f64 = 3.0;
pub const DEFAULT_PACE_MIN_WPM: f64 = 100.0;
pub const DEFAULT_PACE_MAX_WPM: f64 = 160.0;

/// Declarative checks against a metrics record. Every key is optional and an
/// absent key is not checked. Unknown keys are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_duration_seconds: Option<f64>,
    /// Allowed distance from the target duration (defaults to 3s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fillers: Option<usize>,
    /// All of these must appear (case-insensitive substring)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_phrases: Option<Vec<String>>,
    /// None of these may appear (case-insensitive substring)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forbidden_phrases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace_range: Option<PaceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_confidence_score: Option<f64>,
}

impl Constraints {
    pub fn tolerance(&self) -> f64 {
        self.tolerance_seconds.unwrap_or(DEFAULT_TOLERANCE_SECONDS)
    }

    /// Reject constraint documents that could never be satisfied or are
    /// numerically meaningless.
    pub fn validate(&self) -> Result<()> {
        if let Some(target) = self.target_duration_seconds {
            if !target.is_finite() || target < 0.0 {
                return Err(AnalysisError::InvalidConstraint(format!(
                    "target_duration_seconds must be a non-negative number, got {}",
                    target
                )));
            }
        }

        let tolerance = self.tolerance();
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(AnalysisError::InvalidConstraint(format!(
                "tolerance_seconds must be a non-negative number, got {}",
                tolerance
            )));
        }

        if let Some(range) = &self.pace_range {
            range.validate()?;
        }

        if let Some(min) = self.min_confidence_score {
            if !(0.0..=100.0).contains(&min) {
                return Err(AnalysisError::InvalidConstraint(format!(
                    "min_confidence_score must be within 0-100, got {}",
                    min
                )));
            }
        }

        Ok(())
    }
}

/// Inclusive words-per-minute range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceRange {
    #[serde(default = "default_pace_min")]
    pub min: f64,
    #[serde(default = "default_pace_max")]
    pub max: f64,
}

impl PaceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, wpm: f64) -> bool {
        wpm >= self.min && wpm <= self.max
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(AnalysisError::InvalidConstraint(format!(
                "pace range {}-{} wpm is not a valid range",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl Default for PaceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_PACE_MIN_WPM,
            max: DEFAULT_PACE_MAX_WPM,
        }
    }
}

fn default_pace_min() -> f64 {
    DEFAULT_PACE_MIN_WPM
}

fn default_pace_max() -> f64 {
    DEFAULT_PACE_MAX_WPM
}

/// The metric a violation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationField {
    Duration,
    Fillers,
    RequiredPhrases,
    ForbiddenPhrases,
    Pace,
    Confidence,
}

impl ViolationField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationField::Duration => "duration",
            ViolationField::Fillers => "fillers",
            ViolationField::RequiredPhrases => "required_phrases",
            ViolationField::ForbiddenPhrases => "forbidden_phrases",
            ViolationField::Pace => "pace",
            ViolationField::Confidence => "confidence",
        }
    }
}

/// The value that failed a check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Observed {
    Seconds(f64),
    Count(usize),
    Wpm(f64),
    Score(f64),
    /// Required phrases absent from the transcript
    Missing(Vec<String>),
    /// Forbidden phrases found in the transcript
    Present(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub field: ViolationField,
    pub expected: String,
    pub actual: Observed,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintResult {
    /// True iff `violations` is empty
    pub respected: bool,
    pub violations: Vec<Violation>,
}

impl ConstraintResult {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            respected: violations.is_empty(),
            violations,
        }
    }

    pub fn violation(&self, field: ViolationField) -> Option<&Violation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constraints_ignores_unknown_keys() {
        let json = r#"{
            "target_duration_seconds": 20,
            "tolerance_seconds": 5,
            "max_fillers": 3,
            "required_phrases": ["tacos", "health"],
            "forbidden_phrases": ["um"],
            "pace_range": {"min": 110},
            "min_confidence_score": 50,
            "max_gestures": 2
        }"#;

        let constraints: Constraints = serde_json::from_str(json).unwrap();

        assert_eq!(constraints.target_duration_seconds, Some(20.0));
        assert_eq!(constraints.tolerance(), 5.0);
        assert_eq!(constraints.max_fillers, Some(3));
        assert_eq!(constraints.pace_range, Some(PaceRange::new(110.0, 160.0)));
        assert!(constraints.validate().is_ok());
    }

    #[test]
    fn test_empty_constraints() {
        let constraints: Constraints = serde_json::from_str("{}").unwrap();

        assert_eq!(constraints, Constraints::default());
        assert_eq!(constraints.tolerance(), DEFAULT_TOLERANCE_SECONDS);
    }

    #[test]
    fn test_validate_rejects_inverted_pace_range() {
        let constraints = Constraints {
            pace_range: Some(PaceRange::new(180.0, 120.0)),
            ..Default::default()
        };

        let err = constraints.validate().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConstraint(_)));
    }

    #[test]
    fn test_validate_rejects_out_of_range_confidence() {
        let constraints = Constraints {
            min_confidence_score: Some(140.0),
            ..Default::default()
        };

        assert!(constraints.validate().is_err());
    }

    #[test]
    fn test_observed_serialization() {
        let json = serde_json::to_string(&Observed::Missing(vec!["pizza".to_string()])).unwrap();
        assert_eq!(json, r#"{"missing":["pizza"]}"#);
    }
}
