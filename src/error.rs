use thiserror::Error;

/// Errors raised while preparing inputs for the scoring core.
///
/// The scorers themselves are total over string input; these errors are
/// produced by the parsing and configuration layers before scoring starts.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transcript document contains no transcript text")]
    MissingTranscript,

    #[error("Invalid phrase pattern {phrase:?}: {source}")]
    InvalidPattern {
        phrase: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid constraint: {0}")]
    InvalidConstraint(String),

    #[error("Unknown focus area: {0}")]
    UnknownFocusArea(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
