pub mod analysis;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod models;

pub use analysis::{aggregate_metrics, AnalysisConfig, DurationHint, FillerSet, ToneMode};
pub use error::{AnalysisError, Result};
pub use evaluation::{
    evaluate_constraints, run_focus_exercise, suggest_exercises, suggestions_from,
    PresentationThresholds,
};
pub use io::{
    load_config, load_constraints, load_focus_constraints, load_sentiment, parse_transcript_file,
    FeedbackReport, HumanFeedback, TranscriptInput,
};
pub use models::{
    ConstraintResult, Constraints, FocusArea, FocusConstraints, FocusResult, MetricsRecord,
    SentimentDistribution, SentimentLabel, SentimentSignal,
};
