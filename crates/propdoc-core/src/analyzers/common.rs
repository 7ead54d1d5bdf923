//! Shared rule-evaluation primitives for the type analyzers.
//!
//! Every analyzer works over lower-cased text with three kinds of rules:
//! keyword presence checks, prioritized labelled regex captures, and
//! small derivation tables (compliance precedence, tiered risk).

use crate::model::{ComplianceStatus, RiskLevel};
use regex::Regex;
use std::sync::LazyLock;

/// True if any term appears as a substring of the text.
pub fn contains_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| text.contains(t))
}

/// True if every term appears as a substring of the text.
pub fn contains_all(text: &str, terms: &[&str]) -> bool {
    terms.iter().all(|t| text.contains(t))
}

/// Collect the terms that appear in the text, preserving table order.
pub fn matched_terms(text: &str, terms: &[&str]) -> Vec<String> {
    terms
        .iter()
        .filter(|t| text.contains(**t))
        .map(|t| t.to_string())
        .collect()
}

/// First capture group of the first pattern that matches; patterns are
/// tried in priority order. Absence yields `None`, never an error.
pub fn first_capture(text: &str, patterns: &[Regex]) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                let value = m.as_str().trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// All first-group captures across all patterns, in pattern order.
pub fn all_captures(text: &str, patterns: &[Regex]) -> Vec<String> {
    let mut out = Vec::new();
    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                let value = m.as_str().trim();
                if !value.is_empty() {
                    out.push(value.to_string());
                }
            }
        }
    }
    out
}

static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})").unwrap());

/// Numeric dates (`12/03/2024`, `1-6-24`) in order of appearance.
pub fn slash_dates(text: &str) -> Vec<String> {
    SLASH_DATE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Compile a literal pattern table. Only called from `LazyLock`
/// initializers over static pattern strings.
pub fn compile_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static pattern must compile"))
        .collect()
}

/// Marker-based compliance precedence: positive markers without any
/// negative marker mean compliant; any negative marker means
/// non-compliant; partial markers alone mean partially compliant.
pub fn marker_status(
    text: &str,
    positive: &[&str],
    negative: &[&str],
    partial: &[&str],
) -> ComplianceStatus {
    let has_positive = contains_any(text, positive);
    let has_negative = contains_any(text, negative);

    if has_positive && !has_negative {
        ComplianceStatus::Compliant
    } else if has_negative {
        ComplianceStatus::NonCompliant
    } else if contains_any(text, partial) {
        ComplianceStatus::PartiallyCompliant
    } else {
        ComplianceStatus::Unknown
    }
}

/// Evidence-checklist compliance precedence: the anchor signal plus both
/// supporting signals mean compliant; the anchor plus one means partially
/// compliant; a missing anchor means non-compliant.
pub fn checklist_status(anchor: bool, second: bool, third: bool) -> ComplianceStatus {
    if anchor && second && third {
        ComplianceStatus::Compliant
    } else if anchor && (second || third) {
        ComplianceStatus::PartiallyCompliant
    } else if !anchor {
        ComplianceStatus::NonCompliant
    } else {
        ComplianceStatus::Unknown
    }
}

/// Step function from matched risk-factor count to overall risk.
pub fn tiered_risk(factor_count: usize) -> RiskLevel {
    match factor_count {
        0 => RiskLevel::Low,
        1..=2 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

pub const NOT_SPECIFIED: &str = "not specified";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_capture_priority_order() {
        let patterns = compile_patterns(&[
            r"next test due[:\s]+([^.\n]+)",
            r"valid until[:\s]+([^.\n]+)",
        ]);
        let text = "valid until: june 2026. next test due: march 2025.";
        // First pattern in the table wins even though the other matches
        // earlier in the text.
        assert_eq!(
            first_capture(text, &patterns),
            Some("march 2025".to_string())
        );
    }

    #[test]
    fn test_first_capture_absent_is_none() {
        let patterns = compile_patterns(&[r"next test due[:\s]+([^.\n]+)"]);
        assert_eq!(first_capture("no dates here", &patterns), None);
        assert_eq!(first_capture("", &patterns), None);
    }

    #[test]
    fn test_slash_dates_in_order() {
        let dates = slash_dates("survey 01/02/2024, review 15-03-24, next 2/2");
        assert_eq!(dates, vec!["01/02/2024", "15-03-24"]);
    }

    #[test]
    fn test_marker_status_precedence() {
        let pos = &["satisfactory"];
        let neg = &["unsatisfactory", "dangerous"];
        let part = &["partially", "some remedial"];

        assert_eq!(
            marker_status("result satisfactory", pos, neg, part),
            ComplianceStatus::Compliant
        );
        // "unsatisfactory" contains "satisfactory"; the negative marker
        // must still win.
        assert_eq!(
            marker_status("result unsatisfactory", pos, neg, part),
            ComplianceStatus::NonCompliant
        );
        assert_eq!(
            marker_status("some remedial work advised", pos, neg, part),
            ComplianceStatus::PartiallyCompliant
        );
        assert_eq!(
            marker_status("", pos, neg, part),
            ComplianceStatus::Unknown
        );
    }

    #[test]
    fn test_checklist_status_tiers() {
        assert_eq!(
            checklist_status(true, true, true),
            ComplianceStatus::Compliant
        );
        assert_eq!(
            checklist_status(true, true, false),
            ComplianceStatus::PartiallyCompliant
        );
        assert_eq!(
            checklist_status(false, true, true),
            ComplianceStatus::NonCompliant
        );
    }

    #[test]
    fn test_tiered_risk_steps() {
        assert_eq!(tiered_risk(0), RiskLevel::Low);
        assert_eq!(tiered_risk(1), RiskLevel::Medium);
        assert_eq!(tiered_risk(2), RiskLevel::Medium);
        assert_eq!(tiered_risk(3), RiskLevel::High);
        assert_eq!(tiered_risk(9), RiskLevel::High);
    }
}
