//! General analyzer for documents outside the recognized categories.
//!
//! Also the documented fallback for any type without a specialist
//! analyzer, so its output carries the canonical field names directly.

use crate::analyzers::common::{
    all_captures, compile_patterns, contains_any, first_capture, marker_status, matched_terms,
};
use crate::model::{ComplianceStatus, RiskLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralReport {
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub key_dates: GeneralDates,
    pub compliance_review: GeneralComplianceReview,
    pub actions: GeneralActions,
    pub responsible_parties: ResponsibleParties,
    pub risk: GeneralRisk,
    pub legal: GeneralLegal,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralDates {
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub next_review_date: Option<String>,
    pub deadlines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralComplianceReview {
    pub overall: ComplianceStatus,
    pub areas: Vec<String>,
    pub gaps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralActions {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub completed: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibleParties {
    pub primary: Option<String>,
    pub secondary: Vec<String>,
    pub contractors: Vec<String>,
    pub consultants: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralRisk {
    pub overall: RiskLevel,
    pub factors: Vec<String>,
    pub mitigation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralLegal {
    pub regulations: Vec<String>,
    pub obligations: Vec<String>,
    pub penalties: Vec<String>,
    pub deadlines: Vec<String>,
}

const COMPLIANCE_AREAS: &[&str] = &[
    "safety",
    "health",
    "environmental",
    "structural",
    "electrical",
    "fire safety",
    "accessibility",
    "maintenance",
    "insurance",
    "planning",
];

const COMPLIANCE_GAPS: &[&str] = &[
    "non-compliant",
    "violation",
    "defect",
    "issue",
    "problem",
    "deficiency",
    "gap",
    "missing",
    "inadequate",
    "insufficient",
];

const IMMEDIATE_MARKERS: &[&str] = &[
    "immediate action",
    "urgent",
    "emergency",
    "critical",
    "dangerous",
    "hazard",
];

const SHORT_TERM_MARKERS: &[&str] = &[
    "action required",
    "must complete",
    "deadline",
    "remedial",
    "repair",
    "fix",
];

const LONG_TERM_MARKERS: &[&str] = &[
    "upgrade",
    "improve",
    "enhance",
    "modernise",
    "replace",
    "install",
];

const COMPLETED_MARKERS: &[&str] = &[
    "completed",
    "finished",
    "done",
    "resolved",
    "fixed",
    "repaired",
];

const SECONDARY_PARTIES: &[&str] = &[
    "landlord",
    "tenant",
    "leaseholder",
    "management company",
    "freeholder",
    "resident",
];

const CONTRACTOR_PARTIES: &[&str] = &[
    "contractor",
    "builder",
    "engineer",
    "technician",
    "specialist",
    "maintenance",
];

const CONSULTANT_PARTIES: &[&str] = &[
    "consultant",
    "surveyor",
    "architect",
    "advisor",
    "expert",
];

const RISK_FACTORS: &[&str] = &[
    "structural issue",
    "safety concern",
    "compliance gap",
    "maintenance backlog",
    "ageing infrastructure",
    "inadequate protection",
    "poor condition",
    "defect",
    "hazard",
];

const MITIGATION_MEASURES: &[&str] = &[
    "mitigation",
    "prevention",
    "protection",
    "safety measure",
    "maintenance",
    "inspection",
    "monitoring",
    "upgrade",
];

const REGULATIONS: &[&str] = &[
    "building regulations",
    "health and safety",
    "fire safety",
    "planning permission",
    "environmental",
    "accessibility",
    "energy efficiency",
];

const OBLIGATION_MARKERS: &[&str] = &[
    "must",
    "shall",
    "required",
    "obligation",
    "duty",
    "responsibility",
    "compliance",
];

const PENALTY_MARKERS: &[&str] = &[
    "penalty",
    "fine",
    "enforcement",
    "prosecution",
    "legal action",
    "sanction",
    "breach",
];

const DEADLINE_MARKERS: &[&str] = &[
    "deadline",
    "due date",
    "time limit",
    "within",
    "before",
];

const RECOMMENDATION_MARKERS: &[&str] = &[
    "recommend",
    "suggest",
    "advise",
    "consider",
    "should",
    "best practice",
    "improvement",
    "upgrade",
];

static ISSUE_DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"(?:issue|creation|completion)\s+date[:\s]+([^.\n]+)",
        r"(?:issued|dated)[:\s]+([^.\n]+)",
    ])
});

static EXPIRY_DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"(?:expiry|expiration)\s+date[:\s]+([^.\n]+)",
        r"(?:expires|valid until)[:\s]+([^.\n]+)",
    ])
});

static REVIEW_DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"(?:next review|review due)[:\s]+([^.\n]+)",
        r"(?:review|renewal)\s+date[:\s]+([^.\n]+)",
    ])
});

static DEADLINE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:deadline|due by|must complete)[:\s]+([^.\n]+)"])
});

static PRIMARY_PARTY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"responsible (?:person|party)[:\s]+([^.\n]+)",
        r"duty holder[:\s]+([^.\n]+)",
    ])
});

/// Analyze a general property management document.
pub fn analyze(text: &str, filename: &str) -> GeneralReport {
    let text = text.to_lowercase();

    GeneralReport {
        summary: summarize(&text, filename),
        compliance_status: compliance_status(&text),
        key_dates: key_dates(&text),
        compliance_review: compliance_review(&text),
        actions: bucket_actions(&text),
        responsible_parties: responsible_parties(&text),
        risk: assess_risk(&text),
        legal: legal(&text),
        recommendations: matched_terms(&text, RECOMMENDATION_MARKERS),
        next_steps: next_steps(&text),
    }
}

fn summarize(text: &str, filename: &str) -> String {
    let has_issues = contains_any(text, &["issue", "problem", "defect"]);
    let has_actions = contains_any(text, &["action", "required", "must"]);
    let looks_compliant = contains_any(text, &["compliant", "satisfactory", "approved"]);

    if has_issues {
        format!(
            "Document {filename} identifies issues requiring attention. Review required \
             to determine appropriate actions and compliance status."
        )
    } else if has_actions {
        format!(
            "Document {filename} outlines actions or requirements. Review needed to \
             ensure compliance and proper implementation."
        )
    } else if looks_compliant {
        format!(
            "Document {filename} indicates compliance with relevant standards. No \
             immediate action required."
        )
    } else {
        format!(
            "Document {filename} has been processed. Review required to determine \
             content, compliance status, and any necessary actions."
        )
    }
}

/// Precedence: the document's own compliance wording decides.
fn compliance_status(text: &str) -> ComplianceStatus {
    marker_status(
        text,
        &["compliant"],
        &["non-compliant", "violation"],
        &["partially", "some issues"],
    )
}

fn key_dates(text: &str) -> GeneralDates {
    GeneralDates {
        issue_date: first_capture(text, &ISSUE_DATE_PATTERNS),
        expiry_date: first_capture(text, &EXPIRY_DATE_PATTERNS),
        next_review_date: first_capture(text, &REVIEW_DATE_PATTERNS),
        deadlines: all_captures(text, &DEADLINE_PATTERNS),
    }
}

fn compliance_review(text: &str) -> GeneralComplianceReview {
    GeneralComplianceReview {
        overall: compliance_status(text),
        areas: matched_terms(text, COMPLIANCE_AREAS),
        gaps: matched_terms(text, COMPLIANCE_GAPS),
    }
}

fn bucket_actions(text: &str) -> GeneralActions {
    GeneralActions {
        immediate: matched_terms(text, IMMEDIATE_MARKERS)
            .into_iter()
            .map(|m| format!("Address {m} issues"))
            .collect(),
        short_term: matched_terms(text, SHORT_TERM_MARKERS)
            .into_iter()
            .map(|m| format!("Complete {m} requirements"))
            .collect(),
        long_term: matched_terms(text, LONG_TERM_MARKERS)
            .into_iter()
            .map(|m| format!("Consider {m} options"))
            .collect(),
        completed: matched_terms(text, COMPLETED_MARKERS)
            .into_iter()
            .map(|m| format!("Action {m}"))
            .collect(),
    }
}

fn responsible_parties(text: &str) -> ResponsibleParties {
    ResponsibleParties {
        primary: first_capture(text, &PRIMARY_PARTY_PATTERNS),
        secondary: matched_terms(text, SECONDARY_PARTIES),
        contractors: matched_terms(text, CONTRACTOR_PARTIES),
        consultants: matched_terms(text, CONSULTANT_PARTIES),
    }
}

fn assess_risk(text: &str) -> GeneralRisk {
    let overall = if contains_any(text, &["high risk", "dangerous", "critical"]) {
        RiskLevel::High
    } else if contains_any(text, &["medium risk", "moderate", "attention"]) {
        RiskLevel::Medium
    } else if contains_any(text, &["low risk", "safe", "compliant"]) {
        RiskLevel::Low
    } else {
        RiskLevel::Unknown
    };

    GeneralRisk {
        overall,
        factors: matched_terms(text, RISK_FACTORS),
        mitigation: matched_terms(text, MITIGATION_MEASURES),
    }
}

fn legal(text: &str) -> GeneralLegal {
    GeneralLegal {
        regulations: matched_terms(text, REGULATIONS),
        obligations: matched_terms(text, OBLIGATION_MARKERS),
        penalties: matched_terms(text, PENALTY_MARKERS),
        deadlines: matched_terms(text, DEADLINE_MARKERS),
    }
}

fn next_steps(text: &str) -> Vec<String> {
    let mut steps = Vec::new();

    if contains_any(text, &["action required", "must complete"]) {
        steps.push("Review and prioritize action items".to_string());
    }
    if contains_any(text, &["deadline", "due date"]) {
        steps.push("Set reminders for upcoming deadlines".to_string());
    }
    if contains_any(text, &["compliance", "regulation"]) {
        steps.push("Verify compliance with relevant regulations".to_string());
    }
    if contains_any(text, &["review", "inspection"]) {
        steps.push("Schedule next review or inspection".to_string());
    }
    if contains_any(text, &["contractor", "specialist"]) {
        steps.push("Engage appropriate contractors or specialists".to_string());
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_fully_neutral() {
        let report = analyze("", "empty.pdf");
        assert_eq!(report.compliance_status, ComplianceStatus::Unknown);
        assert_eq!(report.key_dates.issue_date, None);
        assert_eq!(report.key_dates.expiry_date, None);
        assert!(report.key_dates.deadlines.is_empty());
        assert_eq!(report.risk.overall, RiskLevel::Unknown);
        assert!(report.risk.factors.is_empty());
        assert!(report.legal.regulations.is_empty());
        assert!(report.recommendations.is_empty());
        assert!(report.next_steps.is_empty());
        assert_eq!(report.responsible_parties.primary, None);
    }

    #[test]
    fn test_compliant_document() {
        let text = "annual maintenance summary: all items compliant and approved";
        let report = analyze(text, "summary.pdf");
        assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
        assert_eq!(report.risk.overall, RiskLevel::Low);
    }

    #[test]
    fn test_violation_is_non_compliant() {
        let report = analyze("notice of violation served on the freeholder", "notice.pdf");
        assert_eq!(report.compliance_status, ComplianceStatus::NonCompliant);
        assert!(report
            .responsible_parties
            .secondary
            .contains(&"freeholder".to_string()));
    }

    #[test]
    fn test_date_extraction() {
        let text = "issue date: 1 january 2024\nexpires: 1 january 2025\n\
                    next review: december 2024\ndeadline: 30 june 2024";
        let report = analyze(text, "doc.pdf");
        assert_eq!(
            report.key_dates.issue_date,
            Some("1 january 2024".to_string())
        );
        assert_eq!(
            report.key_dates.expiry_date,
            Some("1 january 2025".to_string())
        );
        assert_eq!(
            report.key_dates.next_review_date,
            Some("december 2024".to_string())
        );
        assert_eq!(report.key_dates.deadlines, vec!["30 june 2024"]);
    }

    #[test]
    fn test_urgent_document_actions() {
        let text = "urgent remedial repair required; upgrade recommended; work completed \
                    on the east wing";
        let report = analyze(text, "doc.pdf");
        assert!(!report.actions.immediate.is_empty());
        assert!(!report.actions.short_term.is_empty());
        assert!(!report.actions.long_term.is_empty());
        assert!(!report.actions.completed.is_empty());
    }
}
