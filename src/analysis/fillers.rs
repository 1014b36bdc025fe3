use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Deserialize;

use super::text::{split_sentences, PhrasePattern};
use crate::error::AnalysisError;
use crate::models::FillerReport;

const STANDARD_FILLERS: &[&str] = &["um", "uh", "like", "you know", "so", "actually"];

const EXTENDED_FILLERS: &[&str] = &[
    "uh", "like", "you know", "so", "actually", "sort of", "kind of", "basically", "well",
    "right",
];

/// Matches "um", "umm", "uhm", "uhmm" and similar under one label
const UM_VARIANTS: &str = r"(?i)\bu+h*m+\b";

/// The filler vocabulary a transcript is scanned against
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct FillerSet {
    patterns: Vec<PhrasePattern>,
}

impl FillerSet {
    /// um, uh, like, you know, so, actually
    pub fn standard() -> Self {
        Self {
            patterns: super::text::compile_vocabulary(STANDARD_FILLERS),
        }
    }

    /// The standard set plus hedging fillers, with "um" spelling variants
    /// folded into a single entry
    pub fn extended() -> Self {
        let mut patterns: Vec<PhrasePattern> =
            PhrasePattern::with_pattern("um", UM_VARIANTS).into_iter().collect();
        patterns.extend(super::text::compile_vocabulary(EXTENDED_FILLERS));
        Self { patterns }
    }

    /// Literal phrases, matched case-insensitively at word boundaries.
    /// Repeated phrases are kept once.
    pub fn from_phrases<S: AsRef<str>>(phrases: &[S]) -> Result<Self, AnalysisError> {
        let mut seen = HashSet::new();
        let mut patterns = Vec::with_capacity(phrases.len());
        for phrase in phrases {
            let pattern = PhrasePattern::literal(phrase.as_ref())?;
            if seen.insert(pattern.label().to_string()) {
                patterns.push(pattern);
            }
        }
        Ok(Self { patterns })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.label())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Restrict to the given labels, preserving this set's order
    pub fn subset<S: AsRef<str>>(&self, labels: &[S]) -> Self {
        let wanted: HashSet<String> = labels
            .iter()
            .map(|l| l.as_ref().trim().to_lowercase())
            .collect();
        Self {
            patterns: self
                .patterns
                .iter()
                .filter(|p| wanted.contains(p.label()))
                .cloned()
                .collect(),
        }
    }
}

impl Default for FillerSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<String>> for FillerSet {
    type Error = AnalysisError;

    fn try_from(phrases: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_phrases(&phrases)
    }
}

/// Count each filler in the transcript. Every filler in the set appears in
/// the report, with zero when absent.
pub fn count_fillers(transcript: &str, fillers: &FillerSet) -> FillerReport {
    let counts: BTreeMap<String, usize> = fillers
        .patterns
        .iter()
        .map(|p| (p.label().to_string(), p.count(transcript)))
        .collect();

    FillerReport::from_counts(counts)
}

/// Up to `max_examples` sentences containing a filler, in transcript order.
///
/// Sentences are first chosen so that each one shows a filler not already
/// shown; if that leaves room, further filler sentences fill the quota.
pub fn find_filler_examples(
    transcript: &str,
    fillers: &FillerSet,
    max_examples: usize,
) -> Vec<String> {
    if max_examples == 0 {
        return vec![];
    }

    let sentences = split_sentences(transcript);
    let matches: Vec<Vec<usize>> = sentences
        .iter()
        .map(|s| {
            fillers
                .patterns
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_match(s))
                .map(|(i, _)| i)
                .collect()
        })
        .collect();

    let mut chosen = BTreeSet::new();
    let mut shown = HashSet::new();

    // One sentence per distinct filler
    for (idx, found) in matches.iter().enumerate() {
        if chosen.len() >= max_examples {
            break;
        }
        if let Some(&filler) = found.iter().find(|f| !shown.contains(*f)) {
            shown.insert(filler);
            chosen.insert(idx);
        }
    }

    // Top up with any remaining filler sentences
    for (idx, found) in matches.iter().enumerate() {
        if chosen.len() >= max_examples {
            break;
        }
        if !found.is_empty() {
            chosen.insert(idx);
        }
    }

    chosen
        .into_iter()
        .map(|idx| sentences[idx].to_string())
        .collect()
}
