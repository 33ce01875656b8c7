//! Engine configuration.
//!
//! Every tunable threshold lives here with a default equal to its named
//! constant, so deployments can override severity tuning from a TOML
//! snippet without touching code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::comparator::{RETENTION_HIGH_SEVERITY_MONTHS, RETENTION_TOLERANCE_MONTHS};
use crate::extractor::SignalPrecedence;
use crate::report::{COMPREHENSIVE_REVIEW_THRESHOLD, MEDIUM_ESCALATION_THRESHOLD};

/// Error loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document did not parse or did not match the schema.
    #[error("invalid audit config: {0}")]
    Invalid(#[from] toml::de::Error),
}

/// Summarization tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryTuning {
    /// Word budget per chunk handed to the summarization backend.
    pub chunk_words: usize,
    /// Maximum number of bullet sentences in the formatted output.
    pub max_bullets: usize,
    /// Upper summary length bound, in model tokens.
    pub max_length: usize,
    /// Lower summary length bound, in model tokens.
    pub min_length: usize,
}

impl Default for SummaryTuning {
    fn default() -> Self {
        Self {
            chunk_words: 900,
            max_bullets: 5,
            max_length: 150,
            min_length: 50,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Which signal wins when keyword and classifier disagree.
    pub precedence: SignalPrecedence,
    /// Allowed retention gap before a mismatch is reported, in months.
    pub retention_tolerance_months: i64,
    /// Retention gap above which a mismatch is high severity, in months.
    pub retention_high_severity_months: i64,
    /// Medium-severity count above which overall risk becomes high.
    pub medium_escalation_threshold: usize,
    /// Mismatch count above which the comprehensive-review
    /// recommendation is appended.
    pub comprehensive_review_threshold: usize,
    /// Summarization tuning.
    pub summary: SummaryTuning,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            precedence: SignalPrecedence::default(),
            retention_tolerance_months: RETENTION_TOLERANCE_MONTHS,
            retention_high_severity_months: RETENTION_HIGH_SEVERITY_MONTHS,
            medium_escalation_threshold: MEDIUM_ESCALATION_THRESHOLD,
            comprehensive_review_threshold: COMPREHENSIVE_REVIEW_THRESHOLD,
            summary: SummaryTuning::default(),
        }
    }
}

impl AuditConfig {
    /// Parse a configuration from a TOML document; absent keys keep their
    /// defaults.
    pub fn from_toml_str(toml_text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_text)?)
    }
}
