//! One-call analysis orchestration.
//!
//! [`AnalysisPipeline`] wires the stages in dependency order: extraction,
//! then per-field comparison, then report aggregation, with an optional
//! summarization pass. Collaborator failures inside the stages degrade;
//! the only caller-facing error is blank input.

use thiserror::Error;
use tracing::warn;

use crate::comparator::{FieldComparator, MismatchRecord};
use crate::config::AuditConfig;
use crate::extractor::FactExtractor;
use crate::facts::{ClaimSet, PolicyFacts};
use crate::inference::SummaryOptions;
use crate::report::{ReconciliationReport, ReconciliationReporter};
use crate::summarizer::{PolicySummarizer, SummaryConfig};

/// Caller-input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The policy text was empty or whitespace-only.
    #[error("nothing to analyze: policy text is empty")]
    EmptyPolicyText,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyAnalysis {
    /// Extracted facts, complete over the vocabulary.
    pub facts: PolicyFacts,
    /// Per-field disagreements, in claim order.
    pub mismatches: Vec<MismatchRecord>,
    /// Aggregated report.
    pub report: ReconciliationReport,
    /// Bullet-list synopsis, when a summarizer is attached and succeeds.
    pub summary: Option<String>,
}

/// Preset wiring of extractor, comparator and reporter.
pub struct AnalysisPipeline {
    extractor: FactExtractor,
    comparator: FieldComparator,
    reporter: ReconciliationReporter,
    summarizer: Option<PolicySummarizer>,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl AnalysisPipeline {
    /// The deterministic preset: keyword-only extraction, default
    /// thresholds, no summarizer.
    pub fn standard() -> Self {
        Self {
            extractor: FactExtractor::new(),
            comparator: FieldComparator::new(),
            reporter: ReconciliationReporter::new(),
            summarizer: None,
        }
    }

    /// Build a pipeline from a configuration; collaborators are attached
    /// separately via the builder methods.
    pub fn from_config(config: &AuditConfig) -> Self {
        Self {
            extractor: FactExtractor::new().with_precedence(config.precedence),
            comparator: FieldComparator::with_thresholds(
                config.retention_tolerance_months,
                config.retention_high_severity_months,
            ),
            reporter: ReconciliationReporter::with_thresholds(
                config.medium_escalation_threshold,
                config.comprehensive_review_threshold,
            ),
            summarizer: None,
        }
    }

    /// Replace the extractor (e.g. to attach classifier/answerer
    /// collaborators).
    pub fn with_extractor(mut self, extractor: FactExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the comparator.
    pub fn with_comparator(mut self, comparator: FieldComparator) -> Self {
        self.comparator = comparator;
        self
    }

    /// Replace the reporter.
    pub fn with_reporter(mut self, reporter: ReconciliationReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Attach a summarizer; its failures degrade to `summary: None`.
    pub fn with_summarizer(mut self, summarizer: PolicySummarizer) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Run extraction, comparison and reporting over one policy text.
    pub fn run(&self, policy_text: &str, claims: &ClaimSet) -> Result<PolicyAnalysis, AnalysisError> {
        if policy_text.trim().is_empty() {
            return Err(AnalysisError::EmptyPolicyText);
        }

        let facts = self.extractor.extract(policy_text);
        let mismatches = self.comparator.find_mismatches(&facts, claims);
        let report = self.reporter.report(&mismatches);

        let summary = self.summarizer.as_ref().and_then(|summarizer| {
            match summarizer.summarize(policy_text) {
                Ok(text) if !text.is_empty() => Some(text),
                Ok(_) => None,
                Err(error) => {
                    warn!(%error, "summarization failed; continuing without a summary");
                    None
                }
            }
        });

        Ok(PolicyAnalysis {
            facts,
            mismatches,
            report,
            summary,
        })
    }
}

/// Derive the summarizer tuning from an [`AuditConfig`].
pub fn summary_config(config: &AuditConfig) -> SummaryConfig {
    SummaryConfig {
        chunk_words: config.summary.chunk_words,
        max_bullets: config.summary.max_bullets,
        options: SummaryOptions {
            max_length: config.summary.max_length,
            min_length: config.summary.min_length,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::FactField;

    #[test]
    fn test_blank_policy_text_is_rejected() {
        let pipeline = AnalysisPipeline::standard();
        let claims = ClaimSet::new().with(FactField::CollectsEmails, true);

        assert_eq!(
            pipeline.run("", &claims),
            Err(AnalysisError::EmptyPolicyText)
        );
        assert_eq!(
            pipeline.run("   \n\t ", &claims),
            Err(AnalysisError::EmptyPolicyText)
        );
    }

    #[test]
    fn test_empty_claims_yield_clean_report() {
        let pipeline = AnalysisPipeline::standard();
        let analysis = pipeline
            .run("We collect emails.", &ClaimSet::new())
            .unwrap();

        assert!(analysis.mismatches.is_empty());
        assert_eq!(analysis.report.total_mismatches, 0);
        assert!(analysis.summary.is_none());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AnalysisError::EmptyPolicyText.to_string(),
            "nothing to analyze: policy text is empty"
        );
    }

    #[test]
    fn test_summary_config_derivation() {
        let mut config = AuditConfig::default();
        config.summary.chunk_words = 100;
        config.summary.max_length = 80;

        let derived = summary_config(&config);
        assert_eq!(derived.chunk_words, 100);
        assert_eq!(derived.options.max_length, 80);
        assert_eq!(derived.max_bullets, 5);
    }
}
