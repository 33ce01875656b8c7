//! Retention-duration normalization.
//!
//! Free-text duration phrases ("1 year", "90 days", "indefinitely") are
//! normalized to whole months so two phrases can be compared numerically.
//! Phrases with no recoverable duration normalize to `None` (unparseable),
//! never to an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Months assigned to "indefinitely"/"permanently".
///
/// Larger than any finite phrase the patterns can produce, so a forever
/// policy always clears the high-severity cutoff against a finite claim.
pub const INDEFINITE_MONTHS: i64 = 9999;

const DAYS_PER_MONTH: i64 = 30;
const MONTHS_PER_YEAR: i64 = 12;

/// Time unit recognized by the numeric duration patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationUnit {
    Days,
    Months,
    Years,
}

impl DurationUnit {
    fn to_months(self, value: i64) -> i64 {
        match self {
            // Truncates toward zero: "45 days" is 1 month, "29 days" is 0.
            DurationUnit::Days => value / DAYS_PER_MONTH,
            DurationUnit::Months => value,
            DurationUnit::Years => value.saturating_mul(MONTHS_PER_YEAR),
        }
    }
}

/// Numeric patterns in priority order; the first match wins.
static NUMERIC_PATTERNS: Lazy<Vec<(Regex, DurationUnit)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(\d+)\s*days?").unwrap(), DurationUnit::Days),
        (Regex::new(r"(\d+)\s*months?").unwrap(), DurationUnit::Months),
        (Regex::new(r"(\d+)\s*years?").unwrap(), DurationUnit::Years),
    ]
});

/// Literal phrases with fixed meanings, checked before the numeric patterns.
///
/// Covers the constrained selector buckets plus common free-text spellings.
/// A `None` entry marks a phrase that is explicitly unparseable.
const LITERAL_DURATIONS: [(&str, Option<i64>); 11] = [
    ("not specified", None),
    ("not sure", None),
    ("unknown", None),
    ("indefinitely", Some(INDEFINITE_MONTHS)),
    ("permanently", Some(INDEFINITE_MONTHS)),
    ("1 month", Some(1)),
    ("3 months", Some(3)),
    ("6 months", Some(6)),
    ("1 year", Some(12)),
    ("2+ years", Some(24)),
    ("2 years", Some(24)),
];

/// Normalize a free-text duration to whole months.
///
/// Returns `None` when no duration can be recovered from the text. Matching
/// is case-insensitive and never panics.
pub fn parse_duration_months(text: &str) -> Option<i64> {
    let lower = text.trim().to_lowercase();

    for (literal, months) in LITERAL_DURATIONS {
        if lower == literal {
            return months;
        }
    }

    for (pattern, unit) in NUMERIC_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&lower) {
            if let Ok(value) = caps[1].parse::<i64>() {
                return Some(unit.to_months(value));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unparseable_phrases() {
        assert_eq!(parse_duration_months("not specified"), None);
        assert_eq!(parse_duration_months("Not Sure"), None);
        assert_eq!(parse_duration_months("unknown"), None);
    }

    #[test]
    fn test_literal_indefinite_phrases() {
        assert_eq!(parse_duration_months("indefinitely"), Some(INDEFINITE_MONTHS));
        assert_eq!(parse_duration_months("Permanently"), Some(INDEFINITE_MONTHS));
    }

    #[test]
    fn test_selector_buckets_all_parse() {
        assert_eq!(parse_duration_months("Not specified"), None);
        assert_eq!(parse_duration_months("3 months"), Some(3));
        assert_eq!(parse_duration_months("6 months"), Some(6));
        assert_eq!(parse_duration_months("1 year"), Some(12));
        assert_eq!(parse_duration_months("2+ years"), Some(24));
    }

    #[test]
    fn test_numeric_months_and_years() {
        assert_eq!(parse_duration_months("18 months"), Some(18));
        assert_eq!(parse_duration_months("1 month"), Some(1));
        assert_eq!(parse_duration_months("2 years"), Some(24));
        assert_eq!(parse_duration_months("we retain data for 3 years"), Some(36));
    }

    #[test]
    fn test_day_conversion_truncates() {
        assert_eq!(parse_duration_months("30 days"), Some(1));
        assert_eq!(parse_duration_months("90 days"), Some(3));
        assert_eq!(parse_duration_months("45 days"), Some(1));
        assert_eq!(parse_duration_months("29 days"), Some(0));
    }

    #[test]
    fn test_first_pattern_wins() {
        // Day pattern has priority over the later month mention.
        assert_eq!(parse_duration_months("30 days, then archived for 6 months"), Some(1));
    }

    #[test]
    fn test_unparseable_free_text() {
        assert_eq!(parse_duration_months(""), None);
        assert_eq!(parse_duration_months("a reasonable period"), None);
        assert_eq!(parse_duration_months("until you delete your account"), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(parse_duration_months("1 YEAR"), Some(12));
        assert_eq!(parse_duration_months("INDEFINITELY"), Some(INDEFINITE_MONTHS));
    }

    #[test]
    fn test_monotonic_over_parseable_durations() {
        let phrases = ["29 days", "3 months", "6 months", "1 year", "2 years", "indefinitely"];
        let months: Vec<i64> = phrases
            .iter()
            .map(|p| parse_duration_months(p).unwrap())
            .collect();
        for pair in months.windows(2) {
            assert!(pair[0] < pair[1], "expected {:?} < {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_huge_numbers_do_not_panic() {
        // Overflowing the integer parse degrades to unparseable.
        assert_eq!(parse_duration_months("99999999999999999999 years"), None);
        assert_eq!(parse_duration_months("9999999 years"), Some(9999999 * 12));
    }
}
