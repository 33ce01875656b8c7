//! Aggregation of mismatches into a reconciliation report.
//!
//! The reporter is a read-only view builder: it counts mismatches per
//! severity, classifies overall risk, and emits deterministic per-field
//! recommendations in input order.

use serde::{Deserialize, Serialize};

use crate::comparator::{MismatchRecord, Severity};
use crate::facts::FactField;

/// Medium-severity count above which overall risk escalates to high.
pub const MEDIUM_ESCALATION_THRESHOLD: usize = 2;

/// Mismatch count above which the generic comprehensive-review
/// recommendation is appended.
pub const COMPREHENSIVE_REVIEW_THRESHOLD: usize = 3;

/// Mismatch counts per severity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityBreakdown {
    fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }
}

/// Derived, read-only summary of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Total number of mismatches.
    pub total_mismatches: usize,
    /// Counts per severity.
    pub breakdown: SeverityBreakdown,
    /// Overall risk classification.
    pub overall_risk: Severity,
    /// One-sentence summary of the outcome.
    pub summary: String,
    /// Ordered recommendations, field-specific first, generic last.
    pub recommendations: Vec<String>,
}

impl ReconciliationReport {
    /// Export to JSON for external processing.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Import from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Builds a [`ReconciliationReport`] from a set of mismatches.
#[derive(Debug, Clone)]
pub struct ReconciliationReporter {
    /// Medium-severity count above which overall risk becomes high.
    pub medium_escalation_threshold: usize,
    /// Mismatch count above which the comprehensive-review
    /// recommendation is appended.
    pub comprehensive_review_threshold: usize,
}

impl Default for ReconciliationReporter {
    fn default() -> Self {
        Self {
            medium_escalation_threshold: MEDIUM_ESCALATION_THRESHOLD,
            comprehensive_review_threshold: COMPREHENSIVE_REVIEW_THRESHOLD,
        }
    }
}

impl ReconciliationReporter {
    /// Reporter with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reporter with custom thresholds.
    pub fn with_thresholds(
        medium_escalation_threshold: usize,
        comprehensive_review_threshold: usize,
    ) -> Self {
        Self {
            medium_escalation_threshold,
            comprehensive_review_threshold,
        }
    }

    /// Aggregate `mismatches` into a report.
    pub fn report(&self, mismatches: &[MismatchRecord]) -> ReconciliationReport {
        if mismatches.is_empty() {
            return ReconciliationReport {
                total_mismatches: 0,
                breakdown: SeverityBreakdown::default(),
                overall_risk: Severity::Low,
                summary: "No mismatches found; the claims are consistent with the policy text."
                    .to_string(),
                recommendations: Vec::new(),
            };
        }

        let mut breakdown = SeverityBreakdown::default();
        for mismatch in mismatches {
            breakdown.increment(mismatch.severity);
        }

        let overall_risk = if breakdown.high > 0 || breakdown.medium > self.medium_escalation_threshold
        {
            Severity::High
        } else if breakdown.medium > 0 {
            Severity::Medium
        } else {
            Severity::Low
        };

        let summary = format!(
            "Found {} mismatch{} ({} high, {} medium, {} low); overall risk is {}.",
            mismatches.len(),
            if mismatches.len() == 1 { "" } else { "es" },
            breakdown.high,
            breakdown.medium,
            breakdown.low,
            overall_risk.as_str(),
        );

        let mut recommendations: Vec<String> = mismatches
            .iter()
            .filter_map(field_recommendation)
            .map(str::to_string)
            .collect();

        if mismatches.len() > self.comprehensive_review_threshold {
            recommendations.push(
                "Conduct a comprehensive review of the policy against actual data practices."
                    .to_string(),
            );
        }

        ReconciliationReport {
            total_mismatches: mismatches.len(),
            breakdown,
            overall_risk,
            summary,
            recommendations,
        }
    }
}

/// Fixed recommendation template per mismatched field.
///
/// Rights recommendations fire when the policy lacks the right; practice
/// recommendations fire when the policy discloses the practice. Fields
/// without a template produce nothing.
fn field_recommendation(mismatch: &MismatchRecord) -> Option<&'static str> {
    let policy_affirms = mismatch.policy_bool.unwrap_or(false);

    match mismatch.field {
        FactField::RightToDelete if !policy_affirms => {
            Some("Consider requesting clarification about the right to delete your data")
        }
        FactField::RightToAccess if !policy_affirms => {
            Some("Ask about how you can access your personal data")
        }
        FactField::DataPortability if !policy_affirms => {
            Some("Inquire about options to export your data if needed")
        }
        FactField::SharesData if policy_affirms => {
            Some("Review which third parties receive your data and for what purposes")
        }
        FactField::UsesTracking if policy_affirms => {
            Some("Consider using privacy tools to limit tracking")
        }
        FactField::RetentionDuration => {
            Some("Reconcile the stated retention period with actual practice")
        }
        _ => None,
    }
}
