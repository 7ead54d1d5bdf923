//! Fire risk assessment analyzer.

use crate::analyzers::common::{
    compile_patterns, contains_any, first_capture, marker_status, matched_terms, NOT_SPECIFIED,
};
use crate::model::{ComplianceStatus, RiskLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireRiskReport {
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub risk_rating: RiskRating,
    pub action_plan: ActionPlan,
    pub compliance_review: ComplianceReview,
    pub safety_measures: SafetyMeasures,
    pub assessment_date: Option<String>,
    pub next_review_date: Option<String>,
    pub responsible_person: ResponsiblePerson,
    pub emergency_procedures: EmergencyProcedures,
    pub recommendations: Vec<String>,
    pub actions: FireActions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRating {
    pub overall: RiskLevel,
    pub factors: Vec<String>,
    pub justification: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub priority1: Vec<String>,
    pub priority2: Vec<String>,
    pub priority3: Vec<String>,
    pub completed: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReview {
    pub overall: ComplianceStatus,
    pub areas: Vec<String>,
    pub gaps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyMeasures {
    pub detection: Vec<String>,
    pub warning: Vec<String>,
    pub escape: Vec<String>,
    pub fighting: Vec<String>,
    pub maintenance: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiblePerson {
    pub name: Option<String>,
    pub role: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyProcedures {
    pub evacuation: bool,
    pub assembly_point: Option<String>,
    pub fire_drills: bool,
    pub training: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireActions {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

const RISK_FACTORS: &[&str] = &[
    "combustible materials",
    "ignition sources",
    "electrical hazards",
    "cooking facilities",
    "smoking areas",
    "storage of flammable materials",
    "poor housekeeping",
    "inadequate escape routes",
    "lack of fire detection",
    "inadequate fire fighting equipment",
];

const PRIORITY1_MARKERS: &[&str] = &[
    "immediate action",
    "urgent",
    "critical",
    "dangerous",
    "priority 1",
    "high priority",
];

const PRIORITY2_MARKERS: &[&str] = &[
    "short term",
    "within 3 months",
    "priority 2",
    "medium priority",
    "action required",
];

const PRIORITY3_MARKERS: &[&str] = &[
    "long term",
    "consider",
    "recommend",
    "priority 3",
    "low priority",
    "improvement",
];

const COMPLETED_MARKERS: &[&str] = &[
    "completed",
    "implemented",
    "installed",
    "maintained",
    "upgraded",
    "replaced",
];

const COMPLIANCE_AREAS: &[&str] = &[
    "fire detection",
    "fire warning",
    "escape routes",
    "fire fighting equipment",
    "emergency lighting",
    "fire doors",
    "compartmentation",
    "signage",
    "training",
    "maintenance",
];

const COMPLIANCE_GAPS: &[&str] = &[
    "missing",
    "inadequate",
    "poor condition",
    "not working",
    "out of date",
    "insufficient",
    "requires attention",
    "needs replacement",
];

const DETECTION: &[&str] = &[
    "smoke detectors",
    "heat detectors",
    "fire alarm system",
    "automatic detection",
    "manual call points",
];

const WARNING: &[&str] = &[
    "fire alarm",
    "sounders",
    "visual alarms",
    "strobe lights",
    "voice evacuation",
];

const ESCAPE: &[&str] = &[
    "escape routes",
    "fire exits",
    "emergency lighting",
    "exit signs",
    "escape stairs",
    "fire doors",
];

const FIGHTING: &[&str] = &[
    "fire extinguishers",
    "hose reels",
    "sprinkler system",
    "fire blankets",
    "hydrants",
];

const MAINTENANCE: &[&str] = &[
    "regular testing",
    "weekly testing",
    "monthly testing",
    "annual service",
    "maintenance schedule",
    "inspection regime",
];

const RECOMMENDATIONS: &[&str] = &[
    "improve fire detection",
    "upgrade fire alarm",
    "enhance escape routes",
    "install additional equipment",
    "improve maintenance",
    "increase training",
    "regular fire drills",
    "update procedures",
];

static ASSESSMENT_DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"(?:review|assessment)\s+date[:\s]+([^.\n]+)",
        r"(?:completed|carried out)[:\s]+([^.\n]+)",
        r"(?:date|issued)[:\s]+([^.\n]+)",
    ])
});

static NEXT_REVIEW_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"next\s+review[:\s]+([^.\n]+)",
        r"review\s+due[:\s]+([^.\n]+)",
        r"renewal[:\s]+([^.\n]+)",
        r"valid\s+until[:\s]+([^.\n]+)",
    ])
});

static JUSTIFICATION_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:risk rating|justification)[:\s]+([^.\n]+)"])
});

static PERSON_NAME_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:responsible person|fire safety manager|duty holder)[:\s]+([a-z][a-z ]+)"])
});

static PERSON_ROLE_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(?:role|position|title)[:\s]+([a-z][a-z ]+)"]));

static PERSON_CONTACT_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(?:contact|phone|email)[:\s]+([^.\n]+)"]));

static ASSEMBLY_POINT_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:assembly point|meeting point|safe area)[:\s]+([^.\n]+)"])
});

/// Analyze a fire risk assessment.
pub fn analyze(text: &str, filename: &str) -> FireRiskReport {
    let text = text.to_lowercase();

    FireRiskReport {
        summary: summarize(&text, filename),
        compliance_status: compliance_status(&text),
        risk_rating: risk_rating(&text),
        action_plan: action_plan(&text),
        compliance_review: compliance_review(&text),
        safety_measures: safety_measures(&text),
        assessment_date: first_capture(&text, &ASSESSMENT_DATE_PATTERNS),
        next_review_date: first_capture(&text, &NEXT_REVIEW_PATTERNS),
        responsible_person: responsible_person(&text),
        emergency_procedures: emergency_procedures(&text),
        recommendations: matched_terms(&text, RECOMMENDATIONS),
        actions: bucket_actions(&text),
    }
}

fn summarize(text: &str, filename: &str) -> String {
    let has_high_risk = contains_any(text, &["high risk", "significant risk"]);
    let has_actions = contains_any(text, &["action required", "priority"]);
    let looks_compliant = contains_any(text, &["compliant", "satisfactory"]);

    if has_high_risk {
        format!(
            "Fire risk assessment for {filename} identifies significant fire safety risks \
             requiring immediate attention. Priority actions must be implemented to ensure \
             building safety."
        )
    } else if has_actions {
        format!(
            "Fire risk assessment for {filename} identifies fire safety improvements \
             needed. Action plan should be implemented to enhance fire safety measures."
        )
    } else if looks_compliant {
        format!(
            "Fire risk assessment for {filename} shows fire safety measures are adequate \
             and compliant with current regulations. Regular review and maintenance \
             required."
        )
    } else {
        format!(
            "Fire risk assessment for {filename} has been completed. Review required to \
             determine risk levels and necessary fire safety improvements."
        )
    }
}

/// Precedence: the document's own compliance wording decides; a stated
/// significant risk counts as non-compliant.
fn compliance_status(text: &str) -> ComplianceStatus {
    marker_status(
        text,
        &["compliant"],
        &["non-compliant", "significant risk"],
        &["partially", "some actions"],
    )
}

/// The assessor's stated rating wins; absent a stated rating the result
/// stays unknown rather than being inferred.
fn risk_rating(text: &str) -> RiskRating {
    let overall = if contains_any(text, &["high risk", "significant risk"]) {
        RiskLevel::High
    } else if contains_any(text, &["medium risk", "moderate risk"]) {
        RiskLevel::Medium
    } else if contains_any(text, &["low risk", "minimal risk"]) {
        RiskLevel::Low
    } else {
        RiskLevel::Unknown
    };

    RiskRating {
        overall,
        factors: matched_terms(text, RISK_FACTORS),
        justification: first_capture(text, &JUSTIFICATION_PATTERN)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
    }
}

fn action_plan(text: &str) -> ActionPlan {
    ActionPlan {
        priority1: matched_terms(text, PRIORITY1_MARKERS)
            .into_iter()
            .map(|m| format!("Address {m} issues"))
            .collect(),
        priority2: matched_terms(text, PRIORITY2_MARKERS)
            .into_iter()
            .map(|m| format!("Complete {m} requirements"))
            .collect(),
        priority3: matched_terms(text, PRIORITY3_MARKERS)
            .into_iter()
            .map(|m| format!("Consider {m} options"))
            .collect(),
        completed: matched_terms(text, COMPLETED_MARKERS)
            .into_iter()
            .map(|m| format!("Action {m}"))
            .collect(),
    }
}

fn compliance_review(text: &str) -> ComplianceReview {
    ComplianceReview {
        overall: compliance_status(text),
        areas: matched_terms(text, COMPLIANCE_AREAS),
        gaps: matched_terms(text, COMPLIANCE_GAPS),
    }
}

fn safety_measures(text: &str) -> SafetyMeasures {
    SafetyMeasures {
        detection: matched_terms(text, DETECTION),
        warning: matched_terms(text, WARNING),
        escape: matched_terms(text, ESCAPE),
        fighting: matched_terms(text, FIGHTING),
        maintenance: matched_terms(text, MAINTENANCE),
    }
}

fn responsible_person(text: &str) -> ResponsiblePerson {
    ResponsiblePerson {
        name: first_capture(text, &PERSON_NAME_PATTERN),
        role: first_capture(text, &PERSON_ROLE_PATTERN),
        contact: first_capture(text, &PERSON_CONTACT_PATTERN),
    }
}

fn emergency_procedures(text: &str) -> EmergencyProcedures {
    EmergencyProcedures {
        evacuation: contains_any(text, &["evacuation", "escape procedure"]),
        assembly_point: first_capture(text, &ASSEMBLY_POINT_PATTERN),
        fire_drills: contains_any(text, &["fire drill", "evacuation drill"]),
        training: text.contains("training"),
    }
}

fn bucket_actions(text: &str) -> FireActions {
    let mut actions = FireActions {
        immediate: Vec::new(),
        short_term: Vec::new(),
        long_term: Vec::new(),
    };

    if contains_any(text, &["immediate", "urgent", "critical"]) {
        actions
            .immediate
            .push("Address critical fire safety issues immediately".to_string());
    }
    if contains_any(text, &["action required", "priority"]) {
        actions
            .short_term
            .push("Implement priority fire safety actions".to_string());
    }
    if contains_any(text, &["review", "assessment"]) {
        actions
            .short_term
            .push("Schedule next fire risk assessment".to_string());
    }
    if contains_any(text, &["improve", "enhance"]) {
        actions
            .long_term
            .push("Consider fire safety system improvements".to_string());
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_risk_assessment() {
        let text = "Fire risk assessment. Overall rating: high risk. Combustible materials \
                    stored in escape routes, inadequate escape routes, lack of fire \
                    detection. Immediate action required. Next review: June 2025.";
        let report = analyze(text, "fra.pdf");

        assert_eq!(report.risk_rating.overall, RiskLevel::High);
        assert_eq!(report.risk_rating.factors.len(), 3);
        assert!(!report.action_plan.priority1.is_empty());
        assert_eq!(report.next_review_date, Some("june 2025".to_string()));
        assert!(report.summary.contains("significant fire safety risks"));
    }

    #[test]
    fn test_compliant_assessment() {
        let text = "Fire risk assessment found the premises compliant. Low risk. Fire \
                    alarm system and emergency lighting in place, maintenance schedule \
                    followed.";
        let report = analyze(text, "fra.pdf");

        assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
        assert_eq!(report.risk_rating.overall, RiskLevel::Low);
        assert!(report
            .safety_measures
            .detection
            .contains(&"fire alarm system".to_string()));
        assert!(report
            .safety_measures
            .escape
            .contains(&"emergency lighting".to_string()));
    }

    #[test]
    fn test_non_compliant_on_significant_risk() {
        let report = analyze("assessment identified a significant risk to occupants", "f.pdf");
        assert_eq!(report.compliance_status, ComplianceStatus::NonCompliant);
    }

    #[test]
    fn test_emergency_procedures_extraction() {
        let text = "Evacuation procedure posted. Assembly point: front car park\n\
                    Fire drill held quarterly, staff training provided.";
        let report = analyze(text, "fra.pdf");

        assert!(report.emergency_procedures.evacuation);
        assert!(report.emergency_procedures.fire_drills);
        assert!(report.emergency_procedures.training);
        assert_eq!(
            report.emergency_procedures.assembly_point,
            Some("front car park".to_string())
        );
    }

    #[test]
    fn test_empty_input_degrades_to_defaults() {
        let report = analyze("", "empty.pdf");
        assert_eq!(report.compliance_status, ComplianceStatus::Unknown);
        assert_eq!(report.risk_rating.overall, RiskLevel::Unknown);
        assert_eq!(report.risk_rating.justification, NOT_SPECIFIED);
        assert!(report.action_plan.priority1.is_empty());
        assert_eq!(report.responsible_person.name, None);
    }
}
