//! Fact extraction from privacy-policy text.
//!
//! Extraction runs up to three passes per analysis:
//!
//! 1. **Keyword pass** (always, deterministic): case-insensitive substring
//!    tables per boolean fact, a negation table that forces `shares_data`
//!    false, and an ordered retention-pattern scan.
//! 2. **Classifier pass** (optional, per-fact fail-open): a zero-shot
//!    classifier picks between a positive/negative description pair for
//!    each boolean fact and may override the keyword value.
//! 3. **Retention QA pass** (optional, fail-open): an extractive answer
//!    replaces the keyword retention phrase when it clears a fixed
//!    confidence floor and is not a no-answer sentinel.
//!
//! A collaborator failure leaves the affected fact at its keyword value;
//! extraction itself never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::facts::{FactField, FactValue, PolicyFacts};
use crate::inference::{ExtractiveAnswerer, ZeroShotClassifier};

/// Minimum confidence for an extractive retention answer to replace the
/// keyword-derived value. Extractive scores over long policy contexts run
/// low, so the floor sits near the bottom of the usable range; the
/// no-answer sentinel filters the junk spans.
pub const RETENTION_ANSWER_MIN_SCORE: f64 = 0.05;

/// Question posed to the extractive answerer for the retention fact.
const RETENTION_QUESTION: &str = "How long is user data retained?";

/// Which signal wins when both keyword and classifier produce a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalPrecedence {
    /// Run only the keyword pass; fully deterministic.
    KeywordOnly,
    /// Classifier output overrides the keyword value when available.
    #[default]
    ClassifierPreferred,
    /// Keyword hits win; the classifier only supplements facts the
    /// keyword pass left negative.
    KeywordPreferred,
}

/// Retention patterns in priority order; the first match is kept verbatim.
static RETENTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Numeric durations: "30 days", "6 months", "2 years"
        Regex::new(r"\d+\s*(?:day|month|year)s?").unwrap(),
        // Forever
        Regex::new(r"indefinitely|permanently").unwrap(),
        // Account-bound: "until you delete your account"
        Regex::new(r"until.*?(?:delete|remove)").unwrap(),
        // Open-ended clauses: "as long as necessary"
        Regex::new(r"(?:for\s+)?as\s+long\s+as\s+\w+(?:\s+\w+){0,3}").unwrap(),
    ]
});

/// Extracts [`PolicyFacts`] from policy text.
pub struct FactExtractor {
    /// Keywords signalling email collection
    email_keywords: Vec<&'static str>,
    /// Keywords signalling analytics/tracking usage
    tracking_keywords: Vec<&'static str>,
    /// Keywords signalling location collection
    location_keywords: Vec<&'static str>,
    /// Keywords signalling third-party sharing
    sharing_keywords: Vec<&'static str>,
    /// Keywords that negate a sharing signal, regardless of match order
    no_sharing_keywords: Vec<&'static str>,
    /// Keywords signalling a right to delete data
    deletion_keywords: Vec<&'static str>,
    /// Keywords signalling a right to access data
    access_keywords: Vec<&'static str>,
    /// Keywords signalling data portability
    portability_keywords: Vec<&'static str>,
    precedence: SignalPrecedence,
    classifier: Option<Box<dyn ZeroShotClassifier>>,
    answerer: Option<Box<dyn ExtractiveAnswerer>>,
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self {
            email_keywords: vec!["email", "e-mail", "email address", "contact information"],
            tracking_keywords: vec![
                "analytics",
                "tracking",
                "cookies",
                "google analytics",
                "facebook pixel",
            ],
            location_keywords: vec!["location", "geolocation", "gps", "ip address"],
            sharing_keywords: vec!["third party", "third-party", "share", "sharing", "partners"],
            no_sharing_keywords: vec!["do not share", "not share", "no sharing", "never share"],
            deletion_keywords: vec![
                "right to delete",
                "request data deletion",
                "request deletion",
                "delete your data",
                "erasure",
            ],
            access_keywords: vec![
                "right to access",
                "access your data",
                "access request",
                "copy of your data",
            ],
            portability_keywords: vec![
                "portability",
                "export your data",
                "data export",
                "download your data",
            ],
            precedence: SignalPrecedence::default(),
            classifier: None,
            answerer: None,
        }
    }
}

impl FactExtractor {
    /// Keyword-only extractor with the default tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a zero-shot classifier for the boolean facts.
    pub fn with_classifier(mut self, classifier: Box<dyn ZeroShotClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Attach an extractive answerer for the retention fact.
    pub fn with_answerer(mut self, answerer: Box<dyn ExtractiveAnswerer>) -> Self {
        self.answerer = Some(answerer);
        self
    }

    /// Choose which signal wins when keyword and classifier disagree.
    pub fn with_precedence(mut self, precedence: SignalPrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Extract all facts from `text`.
    ///
    /// Always returns a complete fact set; collaborator passes only refine
    /// the keyword result and fail open per fact.
    pub fn extract(&self, text: &str) -> PolicyFacts {
        let mut facts = self.keyword_facts(text);

        if self.precedence == SignalPrecedence::KeywordOnly {
            return facts;
        }

        self.apply_classifier(text, &mut facts);
        self.apply_retention_answer(text, &mut facts);

        facts
    }

    /// The deterministic keyword pass on its own.
    pub fn keyword_facts(&self, text: &str) -> PolicyFacts {
        let lower = text.to_lowercase();
        let mut facts = PolicyFacts::new();

        facts.set(
            FactField::CollectsEmails,
            FactValue::Bool(matches_any(&lower, &self.email_keywords)),
        );
        facts.set(
            FactField::UsesTracking,
            FactValue::Bool(matches_any(&lower, &self.tracking_keywords)),
        );
        facts.set(
            FactField::CollectsLocation,
            FactValue::Bool(matches_any(&lower, &self.location_keywords)),
        );
        facts.set(
            FactField::RightToDelete,
            FactValue::Bool(matches_any(&lower, &self.deletion_keywords)),
        );
        facts.set(
            FactField::RightToAccess,
            FactValue::Bool(matches_any(&lower, &self.access_keywords)),
        );
        facts.set(
            FactField::DataPortability,
            FactValue::Bool(matches_any(&lower, &self.portability_keywords)),
        );

        // Negation takes precedence over any sharing keyword hit.
        let shares = matches_any(&lower, &self.sharing_keywords)
            && !matches_any(&lower, &self.no_sharing_keywords);
        facts.set(FactField::SharesData, FactValue::Bool(shares));

        facts.set(FactField::RetentionDuration, detect_retention(&lower));

        facts
    }

    /// Overlay classifier decisions onto the keyword facts.
    fn apply_classifier(&self, text: &str, facts: &mut PolicyFacts) {
        let classifier = match &self.classifier {
            Some(classifier) => classifier,
            None => return,
        };

        for field in FactField::ALL {
            let (positive, negative) = match classifier_labels(field) {
                Some(pair) => pair,
                None => continue,
            };

            let keyword_value = facts.get(field).map(FactValue::as_bool).unwrap_or(false);
            if self.precedence == SignalPrecedence::KeywordPreferred && keyword_value {
                continue;
            }

            match classifier.classify(text, &[positive, negative]) {
                Ok(classification) => {
                    if let Some(top) = classification.top() {
                        facts.set(field, FactValue::Bool(top.label == positive));
                    }
                }
                Err(error) => {
                    debug!(field = %field, %error, "classifier pass failed; keeping keyword value");
                }
            }
        }
    }

    /// Overlay a confident extractive answer onto the retention fact.
    fn apply_retention_answer(&self, text: &str, facts: &mut PolicyFacts) {
        let answerer = match &self.answerer {
            Some(answerer) => answerer,
            None => return,
        };

        match answerer.answer(RETENTION_QUESTION, text) {
            Ok(answer) => {
                if answer.score > RETENTION_ANSWER_MIN_SCORE && !answer.is_not_found() {
                    facts.set(FactField::RetentionDuration, FactValue::Text(answer.text));
                }
            }
            Err(error) => {
                debug!(%error, "retention answer pass failed; keeping keyword value");
            }
        }
    }
}

/// Positive/negative description pair presented to the classifier.
fn classifier_labels(field: FactField) -> Option<(&'static str, &'static str)> {
    match field {
        FactField::CollectsEmails => {
            Some(("collects email addresses", "does not collect emails"))
        }
        FactField::UsesTracking => Some(("uses tracking tools", "no tracking or analytics")),
        FactField::CollectsLocation => {
            Some(("collects location data", "does not collect location data"))
        }
        FactField::SharesData => {
            Some(("shares data with third parties", "does not share user data"))
        }
        FactField::RightToDelete => {
            Some(("lets users delete their data", "no data deletion rights"))
        }
        FactField::RightToAccess => {
            Some(("lets users access their data", "no data access rights"))
        }
        FactField::DataPortability => {
            Some(("lets users export their data", "no data portability"))
        }
        FactField::RetentionDuration => None,
    }
}

fn matches_any(lower_text: &str, keywords: &[&'static str]) -> bool {
    keywords.iter().any(|keyword| lower_text.contains(keyword))
}

/// First retention-pattern match, verbatim, or the unknown sentinel.
fn detect_retention(lower_text: &str) -> FactValue {
    for pattern in RETENTION_PATTERNS.iter() {
        if let Some(found) = pattern.find(lower_text) {
            return FactValue::Text(found.as_str().to_string());
        }
    }
    FactValue::Unknown
}
