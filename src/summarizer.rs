//! Policy summarization orchestration.
//!
//! The injected [`TextSummarizer`] handles one bounded chunk at a time;
//! this module owns the rest: splitting long input into word-budget
//! chunks, summarizing each, re-summarizing the joined chunk summaries
//! until they fit a single chunk, and formatting the result as a short
//! bullet list.

use crate::inference::{InferenceResult, SummaryOptions, TextSummarizer};

/// Re-summarization passes stop after this many rounds; a backend that
/// fails to shrink its input would otherwise loop.
const MAX_RECURSION_PASSES: usize = 4;

/// Tuning for the summarization orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Word budget per chunk handed to the backend.
    pub chunk_words: usize,
    /// Maximum number of bullet sentences in the formatted output.
    pub max_bullets: usize,
    /// Length bounds passed through to the backend.
    pub options: SummaryOptions,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            chunk_words: 900,
            max_bullets: 5,
            options: SummaryOptions::default(),
        }
    }
}

/// Summarizes policy text into a bullet list via an injected backend.
pub struct PolicySummarizer {
    backend: Box<dyn TextSummarizer>,
    config: SummaryConfig,
}

impl PolicySummarizer {
    /// Summarizer with the default configuration.
    pub fn new(backend: Box<dyn TextSummarizer>) -> Self {
        Self {
            backend,
            config: SummaryConfig::default(),
        }
    }

    /// Summarizer with custom tuning.
    pub fn with_config(backend: Box<dyn TextSummarizer>, config: SummaryConfig) -> Self {
        Self { backend, config }
    }

    /// Produce a bullet-list synopsis of `text`.
    ///
    /// Chunked input is summarized per chunk; when more than one chunk was
    /// needed, the joined summaries are re-summarized until they fit one
    /// chunk. Errors from the backend propagate to the caller, which is
    /// expected to degrade (the analysis pipeline drops the summary).
    pub fn summarize(&self, text: &str) -> InferenceResult<String> {
        let mut chunks = chunk_text(text, self.config.chunk_words);
        if chunks.is_empty() {
            return Ok(String::new());
        }

        let mut passes = 0;
        let combined = loop {
            let mut summaries = Vec::with_capacity(chunks.len());
            for chunk in &chunks {
                summaries.push(self.backend.summarize(chunk, &self.config.options)?);
            }
            let combined = summaries.join(" ");

            if summaries.len() <= 1 || passes >= MAX_RECURSION_PASSES {
                break combined;
            }

            chunks = chunk_text(&combined, self.config.chunk_words);
            passes += 1;
        };

        Ok(format_as_bullets(&combined, self.config.max_bullets))
    }
}

/// Split text into word-budget chunks, preserving word order.
fn chunk_text(text: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(max_words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Format up to `max_bullets` sentences as a bullet list.
///
/// Each bullet is a trimmed sentence terminated with a period.
fn format_as_bullets(text: &str, max_bullets: usize) -> String {
    text.split(". ")
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .take(max_bullets)
        .map(|sentence| format!("• {}.", sentence.trim_end_matches('.')))
        .collect::<Vec<_>>()
        .join("\n")
}
