//! Fake inference collaborators returning fixed outputs.
//!
//! The engine takes its collaborators as injected capabilities precisely so
//! tests can swap in deterministic stand-ins like these.

use std::collections::HashMap;

use crate::inference::{
    Classification, ExtractiveAnswer, ExtractiveAnswerer, InferenceError, InferenceResult,
    ScoredLabel, SummaryOptions, TextSummarizer, ZeroShotClassifier,
};

/// Classifier with a scripted verdict per positive label.
///
/// Labels without a scripted verdict report the backend as unavailable,
/// which exercises the per-fact fallback path.
pub struct FixedClassifier {
    decisions: HashMap<&'static str, bool>,
}

impl FixedClassifier {
    pub fn new(decisions: impl IntoIterator<Item = (&'static str, bool)>) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
        }
    }
}

impl ZeroShotClassifier for FixedClassifier {
    fn classify(&self, _text: &str, labels: &[&str]) -> InferenceResult<Classification> {
        if labels.len() < 2 {
            return Err(InferenceError::MalformedResponse(
                "expected a positive/negative label pair".to_string(),
            ));
        }

        match self.decisions.get(labels[0]) {
            Some(&affirm) => {
                let (positive_score, negative_score) = if affirm { (0.9, 0.1) } else { (0.1, 0.9) };
                Ok(Classification::new(vec![
                    ScoredLabel::new(labels[0], positive_score),
                    ScoredLabel::new(labels[1], negative_score),
                ]))
            }
            None => Err(InferenceError::Unavailable(format!(
                "no scripted decision for {:?}",
                labels[0]
            ))),
        }
    }
}

/// Classifier that always fails.
pub struct FailingClassifier;

impl ZeroShotClassifier for FailingClassifier {
    fn classify(&self, _text: &str, _labels: &[&str]) -> InferenceResult<Classification> {
        Err(InferenceError::Unavailable("model not loaded".to_string()))
    }
}

/// Answerer that always returns the same answer and score.
pub struct ScriptedAnswerer {
    text: String,
    score: f64,
}

impl ScriptedAnswerer {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

impl ExtractiveAnswerer for ScriptedAnswerer {
    fn answer(&self, _question: &str, _context: &str) -> InferenceResult<ExtractiveAnswer> {
        Ok(ExtractiveAnswer::new(self.text.clone(), self.score))
    }
}

/// Answerer that always times out.
pub struct FailingAnswerer;

impl ExtractiveAnswerer for FailingAnswerer {
    fn answer(&self, _question: &str, _context: &str) -> InferenceResult<ExtractiveAnswer> {
        Err(InferenceError::Timeout(1_000))
    }
}

/// Summarizer that keeps the first `words` words of its input.
pub struct HeadWordsSummarizer {
    words: usize,
}

impl HeadWordsSummarizer {
    pub fn new(words: usize) -> Self {
        Self { words }
    }
}

impl TextSummarizer for HeadWordsSummarizer {
    fn summarize(&self, text: &str, _options: &SummaryOptions) -> InferenceResult<String> {
        Ok(text
            .split_whitespace()
            .take(self.words)
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// Summarizer that always fails.
pub struct FailingSummarizer;

impl TextSummarizer for FailingSummarizer {
    fn summarize(&self, _text: &str, _options: &SummaryOptions) -> InferenceResult<String> {
        Err(InferenceError::Unavailable("summarizer offline".to_string()))
    }
}
