//! Privacy-policy fact extraction and claim reconciliation engine.
//!
//! Given a privacy policy's free text and a set of asserted claims, this
//! crate extracts structured facts and reconciles them field by field,
//! surfacing mismatches with severity and recommendations:
//!
//! - [`FactExtractor`] - keyword/regex fact detection with optional
//!   classifier and question-answering overlays
//! - [`FieldComparator`] - per-field diffing with duration normalization
//!   and direction-sensitive severity
//! - [`ReconciliationReporter`] - severity breakdown, overall risk, and
//!   ordered recommendations
//! - [`PolicySummarizer`] - chunked, recursive summarization into bullets
//! - [`AnalysisPipeline`] - one-call orchestration of the stages
//!
//! Inference collaborators (zero-shot classification, extractive QA,
//! summarization) are injected capabilities behind the traits in
//! [`inference`]; every collaborator failure degrades to the deterministic
//! keyword result rather than failing the analysis.
//!
//! ## Example
//!
//! ```
//! use policy_audit::{AnalysisPipeline, ClaimSet, FactField};
//!
//! let pipeline = AnalysisPipeline::standard();
//! let claims = ClaimSet::new()
//!     .with(FactField::CollectsEmails, true)
//!     .with(FactField::SharesData, false);
//!
//! let analysis = pipeline
//!     .run("We collect user emails. We do not share data.", &claims)
//!     .unwrap();
//! assert_eq!(analysis.report.total_mismatches, 0);
//! ```

mod comparator;
mod config;
mod duration;
mod extractor;
mod facts;
pub mod inference;
mod pipeline;
mod report;
mod summarizer;

pub use comparator::{
    FieldComparator, MismatchRecord, Severity, RETENTION_HIGH_SEVERITY_MONTHS,
    RETENTION_TOLERANCE_MONTHS,
};
pub use config::{AuditConfig, ConfigError, SummaryTuning};
pub use duration::{parse_duration_months, INDEFINITE_MONTHS};
pub use extractor::{FactExtractor, SignalPrecedence, RETENTION_ANSWER_MIN_SCORE};
pub use facts::{
    ClaimSet, FactField, FactValue, PolicyFacts, RetentionBucket, UnknownFactField,
};
pub use pipeline::{summary_config, AnalysisError, AnalysisPipeline, PolicyAnalysis};
pub use report::{
    ReconciliationReport, ReconciliationReporter, SeverityBreakdown,
    COMPREHENSIVE_REVIEW_THRESHOLD, MEDIUM_ESCALATION_THRESHOLD,
};
pub use summarizer::{PolicySummarizer, SummaryConfig};
