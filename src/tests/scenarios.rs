//! End-to-end reconciliation scenarios over realistic policy text.

use crate::comparator::Severity;
use crate::facts::{ClaimSet, FactField, FactValue, RetentionBucket};
use crate::pipeline::AnalysisPipeline;

/// The sample policy a small startup might publish.
const STARTUP_POLICY: &str = "\
Our startup collects user email addresses for login. We also use Google \
Analytics to track page views and user behavior. We retain user data for up \
to 1 year.

We do not collect any financial or health-related data. Users may contact us \
to request data deletion.

We do not share user data with third parties unless legally required.";

fn bool_fact(analysis: &crate::pipeline::PolicyAnalysis, field: FactField) -> bool {
    analysis
        .facts
        .get(field)
        .map(FactValue::as_bool)
        .unwrap_or(false)
}

#[test]
fn scenario_over_claimed_sharing_is_the_only_mismatch() {
    let text = "We collect user emails and use Google Analytics. We do not \
                share data with third parties. We retain data for 1 year.";
    let claims = ClaimSet::new()
        .with(FactField::CollectsEmails, true)
        .with(FactField::UsesTracking, true)
        .with(FactField::SharesData, true)
        .with(FactField::RetentionDuration, "1 year");

    let analysis = AnalysisPipeline::standard().run(text, &claims).unwrap();

    assert_eq!(analysis.mismatches.len(), 1, "{:?}", analysis.mismatches);
    let mismatch = &analysis.mismatches[0];
    assert_eq!(mismatch.field, FactField::SharesData);
    assert_eq!(mismatch.policy_bool, Some(false));
    assert_eq!(mismatch.claim_bool, Some(true));
    assert_eq!(mismatch.severity, Severity::Medium);
}

#[test]
fn scenario_retention_gap_of_nine_months_is_high() {
    let text = "We retain data for 1 year.";
    let claims = ClaimSet::new().with(FactField::RetentionDuration, RetentionBucket::ThreeMonths);

    let analysis = AnalysisPipeline::standard().run(text, &claims).unwrap();

    assert_eq!(analysis.mismatches.len(), 1);
    let mismatch = &analysis.mismatches[0];
    assert_eq!(mismatch.policy_months, Some(12));
    assert_eq!(mismatch.claim_months, Some(3));
    assert_eq!(mismatch.difference_months, Some(9));
    assert_eq!(mismatch.severity, Severity::High);
    assert_eq!(analysis.report.overall_risk, Severity::High);
}

#[test]
fn scenario_accurate_claims_produce_clean_report() {
    let claims = ClaimSet::new()
        .with(FactField::CollectsEmails, true)
        .with(FactField::UsesTracking, true)
        .with(FactField::SharesData, false)
        .with(FactField::RightToDelete, true)
        .with(FactField::RetentionDuration, RetentionBucket::OneYear);

    let analysis = AnalysisPipeline::standard()
        .run(STARTUP_POLICY, &claims)
        .unwrap();

    assert!(analysis.mismatches.is_empty(), "{:?}", analysis.mismatches);
    assert_eq!(analysis.report.total_mismatches, 0);
    assert_eq!(analysis.report.overall_risk, Severity::Low);
    assert!(analysis.report.recommendations.is_empty());
    assert!(analysis.report.summary.contains("No mismatches"));
}

#[test]
fn scenario_startup_policy_facts() {
    let analysis = AnalysisPipeline::standard()
        .run(STARTUP_POLICY, &ClaimSet::new())
        .unwrap();

    assert!(bool_fact(&analysis, FactField::CollectsEmails));
    assert!(bool_fact(&analysis, FactField::UsesTracking));
    assert!(!bool_fact(&analysis, FactField::SharesData));
    assert!(bool_fact(&analysis, FactField::RightToDelete));
    assert_eq!(
        analysis
            .facts
            .get(FactField::RetentionDuration)
            .and_then(|v| v.as_text()),
        Some("1 year")
    );
}

#[test]
fn scenario_under_disclosed_tracking_escalates() {
    // Policy discloses tracking; the operator claims there is none.
    let text = "We use cookies and analytics across the site. We retain data \
                for 6 months.";
    let claims = ClaimSet::new()
        .with(FactField::UsesTracking, false)
        .with(FactField::RetentionDuration, RetentionBucket::SixMonths);

    let analysis = AnalysisPipeline::standard().run(text, &claims).unwrap();

    assert_eq!(analysis.mismatches.len(), 1);
    assert_eq!(analysis.mismatches[0].severity, Severity::High);
    assert_eq!(analysis.report.overall_risk, Severity::High);
    assert_eq!(analysis.report.breakdown.high, 1);
}

#[test]
fn scenario_claim_key_alias_parses_to_retention_field() {
    // Older clients send "retains_data_duration"; it maps onto the same
    // field the extractor fills.
    let field: FactField = "retains_data_duration".parse().unwrap();
    assert_eq!(field, FactField::RetentionDuration);

    let claims = ClaimSet::new().with(field, RetentionBucket::NotSpecified);
    let analysis = AnalysisPipeline::standard()
        .run("We take privacy seriously.", &claims)
        .unwrap();

    // Extracted retention is unknown, claimed is "Not specified": both
    // unparseable with different raw text, so a low-severity note.
    assert_eq!(analysis.mismatches.len(), 1);
    assert_eq!(analysis.mismatches[0].severity, Severity::Low);
    assert_eq!(analysis.report.overall_risk, Severity::Low);
}

#[test]
fn scenario_many_mismatches_trigger_comprehensive_review() {
    let text = "We use Google Analytics and share data with partners. \
                We retain data indefinitely.";
    let claims = ClaimSet::new()
        .with(FactField::UsesTracking, false)
        .with(FactField::SharesData, false)
        .with(FactField::RightToDelete, true)
        .with(FactField::RightToAccess, true)
        .with(FactField::RetentionDuration, RetentionBucket::OneYear);

    let analysis = AnalysisPipeline::standard().run(text, &claims).unwrap();

    assert_eq!(analysis.mismatches.len(), 5);
    assert_eq!(analysis.report.overall_risk, Severity::High);
    assert!(analysis
        .report
        .recommendations
        .last()
        .unwrap()
        .contains("comprehensive review"));
    // Field-specific recommendations come first, in mismatch order.
    assert!(analysis.report.recommendations[0].contains("privacy tools"));
}
