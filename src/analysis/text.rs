use regex::Regex;

use crate::error::{AnalysisError, Result};

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split text into sentences on terminal punctuation (`.`, `!`, `?`).
///
/// Runs of terminators end a single sentence. Text without any terminator is
/// returned as one sentence; blank text yields no sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A case-insensitive whole-word matcher for a phrase.
///
/// Literal phrases match only at word boundaries, so "like" never matches
/// inside "likely", and the words of a multi-word phrase may be separated by
/// any run of whitespace.
#[derive(Debug, Clone)]
pub struct PhrasePattern {
    label: String,
    regex: Regex,
}

impl PhrasePattern {
    /// Match `phrase` literally, labelled by its lowercase form
    pub fn literal(phrase: &str) -> Result<Self> {
        let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
        if words.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "phrase must contain at least one word".to_string(),
            ));
        }
        let pattern = format!(r"(?i)\b{}\b", words.join(r"\s+"));
        Self::with_pattern(&phrase.trim().to_lowercase(), &pattern)
    }

    /// Match a raw regular expression, reported under `label`
    pub fn with_pattern(label: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| AnalysisError::InvalidPattern {
            phrase: label.to_string(),
            source,
        })?;
        Ok(Self {
            label: label.to_string(),
            regex,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Non-overlapping occurrences in `text`
    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Compile a fixed vocabulary. Only used for built-in word lists.
pub(crate) fn compile_vocabulary(phrases: &[&str]) -> Vec<PhrasePattern> {
    phrases
        .iter()
        .filter_map(|p| PhrasePattern::literal(p).ok())
        .collect()
}

/// Total occurrences of every pattern in `text`
pub(crate) fn count_all(patterns: &[PhrasePattern], text: &str) -> usize {
    patterns.iter().map(|p| p.count(text)).sum()
}

/// First `limit` sentences, in order, that match any of `patterns`
pub(crate) fn sentences_matching(
    sentences: &[&str],
    patterns: &[PhrasePattern],
    limit: usize,
) -> Vec<String> {
    sentences
        .iter()
        .filter(|s| patterns.iter().any(|p| p.is_match(s)))
        .take(limit)
        .map(|s| s.to_string())
        .collect()
}
