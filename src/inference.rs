//! Injected inference collaborators.
//!
//! The extractor and summarizer never talk to a model runtime directly;
//! they are handed capabilities at construction:
//!
//! - [`ZeroShotClassifier`] - picks between mutually exclusive label pairs
//! - [`ExtractiveAnswerer`] - question answering over a policy context
//! - [`TextSummarizer`] - bounded-length summarization of one chunk
//!
//! Every collaborator call is best-effort: an [`InferenceError`] is a local
//! fallback condition for the caller, never a fatal analysis error.

use thiserror::Error;

/// Errors a collaborator may surface.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The backing service or model is not reachable/loaded.
    #[error("inference backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with something the caller cannot use.
    #[error("malformed inference response: {0}")]
    MalformedResponse(String),

    /// The request exceeded its time budget.
    #[error("inference request timed out after {0} ms")]
    Timeout(u64),
}

/// Result type for collaborator calls.
pub type InferenceResult<T> = Result<T, InferenceError>;

/// One candidate label with its confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLabel {
    pub label: String,
    /// Confidence in 0.0-1.0.
    pub score: f64,
}

impl ScoredLabel {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Ranked output of a zero-shot classification call.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Candidate labels with scores; not assumed pre-sorted.
    pub labels: Vec<ScoredLabel>,
}

impl Classification {
    pub fn new(labels: Vec<ScoredLabel>) -> Self {
        Self { labels }
    }

    /// The highest-scoring label, if any.
    pub fn top(&self) -> Option<&ScoredLabel> {
        self.labels.iter().max_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

/// Output of an extractive question-answering call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractiveAnswer {
    /// The answer span lifted from the context.
    pub text: String,
    /// Confidence in 0.0-1.0.
    pub score: f64,
}

impl ExtractiveAnswer {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }

    /// Returns true for the explicit no-answer sentinel or a blank span.
    pub fn is_not_found(&self) -> bool {
        let trimmed = self.text.trim();
        trimmed.is_empty() || trimmed.eq_ignore_ascii_case("not found")
    }
}

/// Length bounds for one summarization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Upper bound on the summary length, in model tokens.
    pub max_length: usize,
    /// Lower bound on the summary length, in model tokens.
    pub min_length: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_length: 150,
            min_length: 50,
        }
    }
}

/// Chooses between mutually exclusive candidate descriptions of a text.
pub trait ZeroShotClassifier {
    /// Rank `labels` against `text`. Callers use only the top label's
    /// identity, not its score.
    fn classify(&self, text: &str, labels: &[&str]) -> InferenceResult<Classification>;
}

/// Answers a question from a policy context.
pub trait ExtractiveAnswerer {
    fn answer(&self, question: &str, context: &str) -> InferenceResult<ExtractiveAnswer>;
}

/// Produces a bounded-length synopsis of one chunk of text.
pub trait TextSummarizer {
    fn summarize(&self, text: &str, options: &SummaryOptions) -> InferenceResult<String>;
}
