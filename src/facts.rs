//! Fact vocabulary and typed values for policy analysis.
//!
//! The engine works over a fixed vocabulary of named facts about a privacy
//! policy's practices:
//!
//! - **Practice facts**: `collects_emails`, `uses_tracking`,
//!   `collects_location`, `shares_data`
//! - **Rights facts**: `right_to_delete`, `right_to_access`, `data_portability`
//! - **Retention**: `retention_duration` (free text, normalized elsewhere)
//!
//! [`PolicyFacts`] holds the extractor's output (always complete over the
//! vocabulary); [`ClaimSet`] holds a caller's asserted values (any subset).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named fact in the fixed policy vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactField {
    /// Whether the policy mentions collecting email addresses.
    CollectsEmails,
    /// Whether the policy mentions analytics/tracking tooling.
    UsesTracking,
    /// Whether the policy mentions collecting location data.
    CollectsLocation,
    /// Whether the policy mentions sharing data with third parties.
    SharesData,
    /// Whether the policy grants a right to delete user data.
    RightToDelete,
    /// Whether the policy grants a right to access user data.
    RightToAccess,
    /// Whether the policy grants data portability/export.
    DataPortability,
    /// How long user data is retained (free text).
    #[serde(alias = "retains_data_duration")]
    RetentionDuration,
}

impl FactField {
    /// Every field in the vocabulary, in canonical order.
    pub const ALL: [FactField; 8] = [
        FactField::CollectsEmails,
        FactField::UsesTracking,
        FactField::CollectsLocation,
        FactField::SharesData,
        FactField::RightToDelete,
        FactField::RightToAccess,
        FactField::DataPortability,
        FactField::RetentionDuration,
    ];

    /// Canonical snake_case name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FactField::CollectsEmails => "collects_emails",
            FactField::UsesTracking => "uses_tracking",
            FactField::CollectsLocation => "collects_location",
            FactField::SharesData => "shares_data",
            FactField::RightToDelete => "right_to_delete",
            FactField::RightToAccess => "right_to_access",
            FactField::DataPortability => "data_portability",
            FactField::RetentionDuration => "retention_duration",
        }
    }

    /// Human-readable description used in mismatch records and reports.
    pub fn description(&self) -> &'static str {
        match self {
            FactField::CollectsEmails => "Email Collection",
            FactField::UsesTracking => "Analytics/Tracking Usage",
            FactField::CollectsLocation => "Location Data Collection",
            FactField::SharesData => "Third-Party Data Sharing",
            FactField::RightToDelete => "Right to Delete Data",
            FactField::RightToAccess => "Right to Access Data",
            FactField::DataPortability => "Data Portability",
            FactField::RetentionDuration => "Data Retention Period",
        }
    }

    /// Returns true for fields compared as booleans.
    pub fn is_boolean(&self) -> bool {
        !matches!(self, FactField::RetentionDuration)
    }

    /// Returns true for fields compared as normalized durations.
    pub fn is_duration(&self) -> bool {
        matches!(self, FactField::RetentionDuration)
    }

    /// Returns true for user-rights fields (deletion, access, portability).
    pub fn is_user_right(&self) -> bool {
        matches!(
            self,
            FactField::RightToDelete | FactField::RightToAccess | FactField::DataPortability
        )
    }

    /// Returns true for data-practice fields (collection, tracking, sharing).
    pub fn is_practice(&self) -> bool {
        matches!(
            self,
            FactField::CollectsEmails
                | FactField::UsesTracking
                | FactField::CollectsLocation
                | FactField::SharesData
        )
    }
}

impl fmt::Display for FactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a field name is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fact field: {0}")]
pub struct UnknownFactField(pub String);

impl FromStr for FactField {
    type Err = UnknownFactField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collects_emails" => Ok(FactField::CollectsEmails),
            "uses_tracking" => Ok(FactField::UsesTracking),
            "collects_location" => Ok(FactField::CollectsLocation),
            "shares_data" => Ok(FactField::SharesData),
            "right_to_delete" => Ok(FactField::RightToDelete),
            "right_to_access" => Ok(FactField::RightToAccess),
            "data_portability" => Ok(FactField::DataPortability),
            // "retains_data_duration" survives as a claim-side alias from
            // older clients; both names resolve to the same field.
            "retention_duration" | "retains_data_duration" => Ok(FactField::RetentionDuration),
            other => Err(UnknownFactField(other.to_string())),
        }
    }
}

/// A fact or claim value: boolean, free text, or the unknown sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    /// A boolean signal (present/absent, granted/not granted).
    Bool(bool),
    /// Free text, e.g. a verbatim retention phrase.
    Text(String),
    /// Nothing determinable from the input.
    Unknown,
}

impl FactValue {
    /// Coerce to a boolean.
    ///
    /// Booleans pass through. Strings are false only when they equal one of
    /// `"false"`, `"no"`, `"none"`, `""`, `"unknown"` case-insensitively;
    /// any other string is true. The unknown sentinel is false.
    pub fn as_bool(&self) -> bool {
        match self {
            FactValue::Bool(b) => *b,
            FactValue::Text(s) => !matches!(
                s.to_lowercase().as_str(),
                "false" | "no" | "none" | "" | "unknown"
            ),
            FactValue::Unknown => false,
        }
    }

    /// Returns the free-text content, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FactValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns true for the unknown sentinel.
    pub fn is_unknown(&self) -> bool {
        matches!(self, FactValue::Unknown)
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Bool(b) => write!(f, "{}", b),
            FactValue::Text(s) => f.write_str(s),
            FactValue::Unknown => f.write_str("unknown"),
        }
    }
}

impl From<bool> for FactValue {
    fn from(b: bool) -> Self {
        FactValue::Bool(b)
    }
}

impl From<&str> for FactValue {
    fn from(s: &str) -> Self {
        FactValue::Text(s.to_string())
    }
}

impl From<String> for FactValue {
    fn from(s: String) -> Self {
        FactValue::Text(s)
    }
}

/// Extracted facts for one policy text.
///
/// Always contains every field in [`FactField::ALL`]; fields with no signal
/// carry `Bool(false)` (boolean fields) or [`FactValue::Unknown`]
/// (retention). Produced fresh per analysis and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyFacts {
    facts: BTreeMap<FactField, FactValue>,
}

impl Default for PolicyFacts {
    fn default() -> Self {
        let mut facts = BTreeMap::new();
        for field in FactField::ALL {
            let value = if field.is_duration() {
                FactValue::Unknown
            } else {
                FactValue::Bool(false)
            };
            facts.insert(field, value);
        }
        Self { facts }
    }
}

impl PolicyFacts {
    /// A complete fact set with all-negative defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up one field. Present for every field of a well-formed set.
    pub fn get(&self, field: FactField) -> Option<&FactValue> {
        self.facts.get(&field)
    }

    /// Set one field's value.
    pub fn set(&mut self, field: FactField, value: FactValue) {
        self.facts.insert(field, value);
    }

    /// Iterate fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FactField, &FactValue)> {
        self.facts.iter().map(|(f, v)| (*f, v))
    }
}

/// Caller-asserted values over the same vocabulary (any subset).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: BTreeMap<FactField, FactValue>,
}

impl ClaimSet {
    /// An empty claim set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, field: FactField, value: impl Into<FactValue>) -> Self {
        self.claims.insert(field, value.into());
        self
    }

    /// Insert or replace one claim.
    pub fn insert(&mut self, field: FactField, value: impl Into<FactValue>) {
        self.claims.insert(field, value.into());
    }

    /// Look up one claim.
    pub fn get(&self, field: FactField) -> Option<&FactValue> {
        self.claims.get(&field)
    }

    /// Iterate claims in canonical field order.
    pub fn iter(&self) -> impl Iterator<Item = (FactField, &FactValue)> {
        self.claims.iter().map(|(f, v)| (*f, v))
    }

    /// Number of asserted claims.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Returns true when no claims are asserted.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Retention values offered by a constrained selector control.
///
/// Free-text retention claims are also accepted; these are the fixed
/// choices a UI dropdown presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetentionBucket {
    #[serde(rename = "Not specified")]
    NotSpecified,
    #[serde(rename = "3 months")]
    ThreeMonths,
    #[serde(rename = "6 months")]
    SixMonths,
    #[serde(rename = "1 year")]
    OneYear,
    #[serde(rename = "2+ years")]
    TwoPlusYears,
}

impl RetentionBucket {
    /// All buckets in selector order.
    pub const ALL: [RetentionBucket; 5] = [
        RetentionBucket::NotSpecified,
        RetentionBucket::ThreeMonths,
        RetentionBucket::SixMonths,
        RetentionBucket::OneYear,
        RetentionBucket::TwoPlusYears,
    ];

    /// The selector label, which doubles as the claim text.
    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionBucket::NotSpecified => "Not specified",
            RetentionBucket::ThreeMonths => "3 months",
            RetentionBucket::SixMonths => "6 months",
            RetentionBucket::OneYear => "1 year",
            RetentionBucket::TwoPlusYears => "2+ years",
        }
    }
}

impl fmt::Display for RetentionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RetentionBucket> for FactValue {
    fn from(bucket: RetentionBucket) -> Self {
        FactValue::Text(bucket.as_str().to_string())
    }
}
