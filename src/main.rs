use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stage_buddy::{
    aggregate_metrics, evaluate_constraints, load_config, load_constraints,
    load_focus_constraints, load_sentiment, parse_transcript_file, run_focus_exercise,
    suggest_exercises, suggestions_from, AnalysisConfig, DurationHint, FeedbackReport, FillerSet,
    FocusArea, HumanFeedback, MetricsRecord, PresentationThresholds, SentimentSignal, ToneMode,
    TranscriptInput,
};

#[derive(Parser)]
#[command(name = "stage-buddy")]
#[command(author, version, about = "Speech delivery feedback for transcripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a transcript and check it against optional constraints
    Analyze {
        #[command(flatten)]
        common: CommonArgs,

        /// Constraint document (JSON)
        #[arg(long)]
        constraints: Option<PathBuf>,
    },

    /// Drill a single focus area
    Exercise {
        /// Focus area: pace, fillers, clarity, confidence or tone
        #[arg(long)]
        focus: FocusArea,

        #[command(flatten)]
        common: CommonArgs,

        /// Focus constraints (JSON)
        #[arg(long)]
        focus_constraints: Option<PathBuf>,
    },

    /// Score a full presentation and suggest practice exercises
    Presentation {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Input transcript (transcription service JSON or plain text)
    #[arg(short, long)]
    input: PathBuf,

    /// Sentiment classifier output (JSON)
    #[arg(long)]
    sentiment: Option<PathBuf>,

    /// Speech duration in seconds, used when the transcript carries no timing
    #[arg(long)]
    duration: Option<f64>,

    /// Scorer configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference speaking rate for duration estimates
    #[arg(long)]
    reference_wpm: Option<f64>,

    /// Use the extended filler vocabulary
    #[arg(long)]
    extended_fillers: bool,

    /// Tone report framing
    #[arg(long, value_enum)]
    tone_mode: Option<ToneModeArg>,

    /// Output file for machine-readable feedback (JSON)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file for human-readable feedback (text)
    #[arg(long)]
    human_readable: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ToneModeArg {
    Framing,
    PassThrough,
}

impl From<ToneModeArg> for ToneMode {
    fn from(arg: ToneModeArg) -> Self {
        match arg {
            ToneModeArg::Framing => ToneMode::Framing,
            ToneModeArg::PassThrough => ToneMode::PassThrough,
        }
    }
}

/// Everything a command needs before scoring
struct Session {
    transcript: TranscriptInput,
    sentiment: SentimentSignal,
    duration: DurationHint,
    config: AnalysisConfig,
}

impl Session {
    fn metrics(&self) -> MetricsRecord {
        aggregate_metrics(
            &self.transcript.text,
            &self.duration,
            &self.sentiment,
            &self.config,
        )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            common,
            constraints,
        } => {
            setup_logging(common.verbose);
            analyze(&common, constraints)
        }
        Commands::Exercise {
            focus,
            common,
            focus_constraints,
        } => {
            setup_logging(common.verbose);
            exercise(&common, focus, focus_constraints)
        }
        Commands::Presentation { common } => {
            setup_logging(common.verbose);
            presentation(&common)
        }
    }
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn load_session(args: &CommonArgs) -> Result<Session> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(wpm) = args.reference_wpm {
        if !(wpm.is_finite() && wpm > 0.0) {
            anyhow::bail!("--reference-wpm must be a positive number, got {}", wpm);
        }
        config.pace.reference_wpm = wpm;
    }
    if args.extended_fillers {
        config.fillers = FillerSet::extended();
    }
    if let Some(mode) = args.tone_mode {
        config.tone.mode = mode.into();
    }

    info!("Loading transcript from {:?}", args.input);
    let transcript =
        parse_transcript_file(&args.input).context("Failed to parse input transcript")?;
    let sentiment = load_sentiment(args.sentiment.as_deref())?;
    let duration = transcript.duration_hint(args.duration);

    info!(
        "Loaded transcript: {} characters, service duration {:?}, client duration {:?}",
        transcript.text.len(),
        duration.service_seconds,
        duration.client_seconds
    );

    Ok(Session {
        transcript,
        sentiment,
        duration,
        config,
    })
}

fn analyze(args: &CommonArgs, constraints: Option<PathBuf>) -> Result<()> {
    let session = load_session(args)?;
    let constraints = load_constraints(constraints.as_deref())?;

    let metrics = session.metrics();
    log_metrics(&metrics);

    let result = evaluate_constraints(&session.transcript.text, &metrics, &constraints);
    info!(
        "Constraints respected={} ({} violations)",
        result.respected,
        result.violations.len()
    );
    let suggestions = suggestions_from(&result);

    let report = FeedbackReport::new(&session.transcript.text, metrics)
        .with_constraints(result, suggestions);
    emit(&report, args)
}

fn exercise(args: &CommonArgs, focus: FocusArea, focus_constraints: Option<PathBuf>) -> Result<()> {
    let session = load_session(args)?;
    let constraints = load_focus_constraints(focus_constraints.as_deref())?;

    let metrics = session.metrics();
    log_metrics(&metrics);

    info!("Running {} exercise", focus);
    let result = run_focus_exercise(
        focus,
        &session.transcript.text,
        &session.duration,
        &session.sentiment,
        &constraints,
        &session.config,
    );
    info!("Exercise {}: {:?}", focus, result.status);

    let report = FeedbackReport::new(&session.transcript.text, metrics).with_focus(result);
    emit(&report, args)
}

fn presentation(args: &CommonArgs) -> Result<()> {
    let session = load_session(args)?;

    let metrics = session.metrics();
    log_metrics(&metrics);

    let exercises = suggest_exercises(&metrics, &PresentationThresholds::default());
    info!("{} practice exercises suggested", exercises.len());

    let report = FeedbackReport::new(&session.transcript.text, metrics).with_exercises(exercises);
    emit(&report, args)
}

fn log_metrics(metrics: &MetricsRecord) {
    info!(
        "Scored {} words over {:.1}s ({:?}): pace {:.1} wpm, {} fillers, clarity {:.1}, confidence {:.1}",
        metrics.word_count,
        metrics.estimated_duration_seconds,
        metrics.duration_source,
        metrics.pace_wpm,
        metrics.filler_words.total,
        metrics.clarity.score,
        metrics.confidence.score
    );
}

fn emit(report: &FeedbackReport, args: &CommonArgs) -> Result<()> {
    if let Some(path) = &args.output {
        report.write_json(path)?;
        info!("Output written to {:?}", path);
    }
    if let Some(path) = &args.human_readable {
        HumanFeedback::new(report).write_file(path)?;
        info!("Human-readable output written to {:?}", path);
    }
    if args.output.is_none() && args.human_readable.is_none() {
        print!("{}", HumanFeedback::new(report).format());
    }
    Ok(())
}
