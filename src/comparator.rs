//! Field-by-field comparison of extracted facts against claims.
//!
//! The comparator dispatches on field semantics:
//!
//! - **Duration fields** normalize both sides to months and apply a
//!   tolerance before scoring the gap.
//! - **Boolean-compatible fields** coerce the policy value and compare
//!   booleans, with direction-sensitive severity.
//! - **Anything else** falls back to a plain inequality test.
//!
//! Agreement never produces a record; a [`MismatchRecord`] exists only for
//! values judged unequal under the field's rule.

use serde::{Deserialize, Serialize};

use crate::duration::parse_duration_months;
use crate::facts::{ClaimSet, FactField, FactValue, PolicyFacts};

/// Allowed gap, in months, between retention values before a mismatch is
/// reported.
pub const RETENTION_TOLERANCE_MONTHS: i64 = 1;

/// Retention gap, in months, above which a mismatch is high severity.
pub const RETENTION_HIGH_SEVERITY_MONTHS: i64 = 6;

/// How serious a mismatch is, ascending.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minor or indeterminate disagreement.
    Low,
    /// Substantive disagreement.
    Medium,
    /// Disagreement with direct compliance or user-trust impact.
    High,
}

impl Severity {
    /// Lowercase name used in rendered reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// One detected disagreement between a policy fact and a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MismatchRecord {
    /// The field the values disagree on.
    pub field: FactField,
    /// The policy-side value, as given.
    pub policy_value: FactValue,
    /// The claim-side value, as given.
    pub claim_value: FactValue,
    /// Coerced policy boolean, for boolean comparisons.
    pub policy_bool: Option<bool>,
    /// Coerced claim boolean, for boolean comparisons.
    pub claim_bool: Option<bool>,
    /// Normalized policy months, for duration comparisons.
    pub policy_months: Option<i64>,
    /// Normalized claim months, for duration comparisons.
    pub claim_months: Option<i64>,
    /// Absolute month gap, when both sides normalized.
    pub difference_months: Option<i64>,
    /// How serious the disagreement is.
    pub severity: Severity,
    /// Human-readable explanation of the disagreement.
    pub explanation: String,
    /// Human-readable field description.
    pub field_description: String,
}

/// Compares one extracted fact against one claimed value.
#[derive(Debug, Clone)]
pub struct FieldComparator {
    /// Allowed retention gap before a mismatch is reported, in months.
    pub retention_tolerance_months: i64,
    /// Retention gap above which a mismatch is high severity, in months.
    pub retention_high_severity_months: i64,
}

impl Default for FieldComparator {
    fn default() -> Self {
        Self {
            retention_tolerance_months: RETENTION_TOLERANCE_MONTHS,
            retention_high_severity_months: RETENTION_HIGH_SEVERITY_MONTHS,
        }
    }
}

impl FieldComparator {
    /// Comparator with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Comparator with custom retention thresholds.
    pub fn with_thresholds(tolerance_months: i64, high_severity_months: i64) -> Self {
        Self {
            retention_tolerance_months: tolerance_months,
            retention_high_severity_months: high_severity_months,
        }
    }

    /// Compare every claimed field against the extracted facts.
    ///
    /// Comparison is scoped to the intersection: a field present on only
    /// one side is skipped, not reported.
    pub fn find_mismatches(&self, facts: &PolicyFacts, claims: &ClaimSet) -> Vec<MismatchRecord> {
        let mut mismatches = Vec::new();

        for (field, claim_value) in claims.iter() {
            if let Some(policy_value) = facts.get(field) {
                if let Some(record) = self.compare(field, policy_value, claim_value) {
                    mismatches.push(record);
                }
            }
        }

        mismatches
    }

    /// Compare one field; `None` means the values agree under its rule.
    pub fn compare(
        &self,
        field: FactField,
        policy_value: &FactValue,
        claim_value: &FactValue,
    ) -> Option<MismatchRecord> {
        if field.is_duration() {
            return self.compare_retention(field, policy_value, claim_value);
        }

        if let FactValue::Bool(claim_bool) = claim_value {
            return self.compare_boolean(field, policy_value, claim_value, *claim_bool);
        }

        // Fallback: plain inequality on the rendered values.
        if policy_value != claim_value {
            return Some(MismatchRecord {
                field,
                policy_value: policy_value.clone(),
                claim_value: claim_value.clone(),
                policy_bool: None,
                claim_bool: None,
                policy_months: None,
                claim_months: None,
                difference_months: None,
                severity: Severity::Medium,
                explanation: generic_explanation(field),
                field_description: field.description().to_string(),
            });
        }

        None
    }

    fn compare_boolean(
        &self,
        field: FactField,
        policy_value: &FactValue,
        claim_value: &FactValue,
        claim_bool: bool,
    ) -> Option<MismatchRecord> {
        let policy_bool = policy_value.as_bool();
        if policy_bool == claim_bool {
            return None;
        }

        let severity = boolean_severity(field, policy_bool, claim_bool);
        let explanation = directional_explanation(field, policy_bool)
            .map(str::to_string)
            .unwrap_or_else(|| generic_explanation(field));

        Some(MismatchRecord {
            field,
            policy_value: policy_value.clone(),
            claim_value: claim_value.clone(),
            policy_bool: Some(policy_bool),
            claim_bool: Some(claim_bool),
            policy_months: None,
            claim_months: None,
            difference_months: None,
            severity,
            explanation,
            field_description: field.description().to_string(),
        })
    }

    fn compare_retention(
        &self,
        field: FactField,
        policy_value: &FactValue,
        claim_value: &FactValue,
    ) -> Option<MismatchRecord> {
        let policy_raw = policy_value.to_string();
        let claim_raw = claim_value.to_string();

        let policy_months = parse_duration_months(&policy_raw);
        let claim_months = parse_duration_months(&claim_raw);

        let (policy_months, claim_months) = match (policy_months, claim_months) {
            (Some(p), Some(c)) => (p, c),
            _ => {
                // One or both sides unparseable: only a raw-text
                // disagreement is worth surfacing, and only as low severity.
                if policy_raw.to_lowercase() == claim_raw.to_lowercase() {
                    return None;
                }
                return Some(MismatchRecord {
                    field,
                    policy_value: policy_value.clone(),
                    claim_value: claim_value.clone(),
                    policy_bool: None,
                    claim_bool: None,
                    policy_months,
                    claim_months,
                    difference_months: None,
                    severity: Severity::Low,
                    explanation: "Unable to accurately compare retention periods; one or both \
                                  values are unclear"
                        .to_string(),
                    field_description: field.description().to_string(),
                });
            }
        };

        let difference = (policy_months - claim_months).abs();
        if difference <= self.retention_tolerance_months {
            return None;
        }

        let severity = if difference > self.retention_high_severity_months {
            Severity::High
        } else {
            Severity::Medium
        };

        Some(MismatchRecord {
            field,
            policy_value: policy_value.clone(),
            claim_value: claim_value.clone(),
            policy_bool: None,
            claim_bool: None,
            policy_months: Some(policy_months),
            claim_months: Some(claim_months),
            difference_months: Some(difference),
            severity,
            explanation: format!(
                "Retention periods differ: the policy says {}, the claim says {}",
                policy_raw, claim_raw
            ),
            field_description: field.description().to_string(),
        })
    }
}

/// Severity rule for boolean mismatches.
///
/// Rights fields are always high when unmet. Practice fields are high when
/// the policy affirms a practice the claim denies, medium in the opposite
/// direction. Everything else defaults to medium.
fn boolean_severity(field: FactField, policy_bool: bool, claim_bool: bool) -> Severity {
    if field.is_user_right() {
        return Severity::High;
    }
    if field.is_practice() && policy_bool && !claim_bool {
        return Severity::High;
    }
    Severity::Medium
}

/// Direction-specific explanation text, keyed by the policy-side boolean.
fn directional_explanation(field: FactField, policy_bool: bool) -> Option<&'static str> {
    let text = match (field, policy_bool) {
        (FactField::CollectsEmails, true) => {
            "The policy mentions collecting emails, but the claim says it does not."
        }
        (FactField::CollectsEmails, false) => {
            "The claim asserts email collection, but the policy does not mention it."
        }
        (FactField::UsesTracking, true) => {
            "The policy mentions tracking/analytics, but the claim says it does not."
        }
        (FactField::UsesTracking, false) => {
            "The claim asserts tracking usage, but the policy does not mention it."
        }
        (FactField::CollectsLocation, true) => {
            "The policy mentions collecting location data, but the claim says it does not."
        }
        (FactField::CollectsLocation, false) => {
            "The claim asserts location collection, but the policy does not mention it."
        }
        (FactField::SharesData, true) => {
            "The policy mentions sharing data with third parties, but the claim says it does not."
        }
        (FactField::SharesData, false) => {
            "The claim asserts data sharing, but the policy does not mention it."
        }
        (FactField::RightToDelete, true) => {
            "The policy mentions data deletion rights, but the claim says it does not."
        }
        (FactField::RightToDelete, false) => {
            "The claim asserts deletion rights, but the policy does not mention them."
        }
        (FactField::RightToAccess, true) => {
            "The policy mentions data access rights, but the claim says it does not."
        }
        (FactField::RightToAccess, false) => {
            "The claim asserts access rights, but the policy does not mention them."
        }
        (FactField::DataPortability, true) => {
            "The policy mentions data portability, but the claim says it does not."
        }
        (FactField::DataPortability, false) => {
            "The claim asserts data portability, but the policy does not mention it."
        }
        _ => return None,
    };
    Some(text)
}

fn generic_explanation(field: FactField) -> String {
    format!("Mismatch detected in {}", field.as_str().replace('_', " "))
}
