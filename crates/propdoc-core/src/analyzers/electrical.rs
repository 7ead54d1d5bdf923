//! Electrical installation condition report analyzer.

use crate::analyzers::common::{
    compile_patterns, contains_any, first_capture, marker_status, matched_terms, NOT_SPECIFIED,
};
use crate::model::{ComplianceStatus, RiskLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricalReport {
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub test_results: TestResults,
    pub remedial_actions: RemedialActions,
    pub next_test_due: Option<String>,
    pub installation: InstallationChecks,
    pub engineer: EngineerDetails,
    pub standards: Standards,
    pub risk: ElectricalRisk,
    pub recommendations: Vec<String>,
    pub actions: ElectricalActions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub overall: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemedialPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemedialActions {
    pub required: bool,
    pub actions: Vec<String>,
    pub priority: RemedialPriority,
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationChecks {
    pub consumer_unit: String,
    pub wiring: String,
    pub earthing: String,
    pub bonding: String,
    pub circuits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineerDetails {
    pub name: Option<String>,
    pub company: Option<String>,
    pub qualifications: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standards {
    pub wiring_regulations: bool,
    pub iee_regulations: bool,
    pub other: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricalRisk {
    pub overall: RiskLevel,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricalActions {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

const TEST_DETAILS: &[&str] = &[
    "circuit breaker test",
    "rcd test",
    "earth fault loop impedance",
    "continuity test",
    "insulation resistance",
    "polarity test",
    "voltage drop",
];

const REMEDIAL_MARKERS: &[&str] = &["remedial", "action required", "unsatisfactory"];

const REMEDIAL_ACTIONS: &[&str] = &[
    "replace consumer unit",
    "upgrade wiring",
    "install rcd protection",
    "improve earthing",
    "fix circuit faults",
    "upgrade bonding",
    "replace defective equipment",
];

const RISK_FACTORS: &[&str] = &[
    "old wiring",
    "overloaded circuits",
    "poor earthing",
    "defective equipment",
    "inadequate protection",
    "missing rcd",
    "deteriorated insulation",
];

const RECOMMENDATIONS: &[&str] = &[
    "upgrade consumer unit",
    "install rcd protection",
    "improve earthing system",
    "replace old wiring",
    "upgrade bonding",
    "regular maintenance",
    "annual inspection",
    "immediate remedial action",
];

const QUALIFICATIONS: &[&str] = &[
    "napit",
    "niceic",
    "elecsa",
    "city and guilds",
    "electrical engineer",
    "qualified electrician",
];

const OTHER_STANDARDS: &[&str] = &[
    "building regulations",
    "part p",
    "iee wiring regulations",
    "electrical safety standards",
];

const CIRCUIT_TYPES: &[&str] = &["lighting", "power", "kitchen", "bathroom", "outdoor", "emergency"];

static NEXT_TEST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"next\s+test\s+due[:\s]+([^.\n]+)",
        r"re-inspection\s+due[:\s]+([^.\n]+)",
        r"next\s+inspection[:\s]+([^.\n]+)",
        r"valid\s+until[:\s]+([^.\n]+)",
    ])
});

static DEADLINE_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:within|by|deadline|due)\s+(\d+\s+(?:days?|weeks?|months?))"])
});

static NAME_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:engineer|inspector|qualified person)[:\s]+([a-z][a-z ]+)"])
});

static COMPANY_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:company|firm|organisation)[:\s]+([a-z][a-z ]+)"])
});

/// Analyze an electrical installation condition report.
pub fn analyze(text: &str, filename: &str) -> ElectricalReport {
    let text = text.to_lowercase();

    ElectricalReport {
        summary: summarize(&text, filename),
        compliance_status: compliance_status(&text),
        test_results: test_results(&text),
        remedial_actions: remedial_actions(&text),
        next_test_due: first_capture(&text, &NEXT_TEST_PATTERNS),
        installation: installation_checks(&text),
        engineer: engineer_details(&text),
        standards: standards(&text),
        risk: assess_risk(&text),
        recommendations: matched_terms(&text, RECOMMENDATIONS),
        actions: bucket_actions(&text),
    }
}

fn summarize(text: &str, filename: &str) -> String {
    let has_remedial = contains_any(text, REMEDIAL_MARKERS);
    let looks_satisfactory = contains_any(text, &["satisfactory", "compliant", "pass"]);

    if has_remedial {
        format!(
            "Electrical installation condition report for {filename} identifies electrical \
             safety issues requiring remedial action. The installation requires attention \
             to ensure compliance with BS 7671 standards."
        )
    } else if looks_satisfactory {
        format!(
            "Electrical installation condition report for {filename} shows the installation \
             is satisfactory and compliant with current regulations. No immediate remedial \
             action required."
        )
    } else {
        format!(
            "Electrical installation condition report for {filename} has been completed. \
             Review required to determine compliance status and any necessary actions."
        )
    }
}

/// Precedence: satisfactory without unsatisfactory wins; any
/// unsatisfactory or dangerous marker forces non-compliant.
fn compliance_status(text: &str) -> ComplianceStatus {
    marker_status(
        text,
        &["satisfactory"],
        &["unsatisfactory", "dangerous"],
        &["partially", "some remedial"],
    )
}

fn test_results(text: &str) -> TestResults {
    let overall = if text.contains("partially satisfactory") {
        "Partially satisfactory"
    } else if text.contains("unsatisfactory") {
        "Unsatisfactory"
    } else if text.contains("satisfactory") {
        "Satisfactory"
    } else {
        NOT_SPECIFIED
    };

    TestResults {
        overall: overall.to_string(),
        details: matched_terms(text, TEST_DETAILS),
    }
}

fn remedial_actions(text: &str) -> RemedialActions {
    let required = contains_any(text, REMEDIAL_MARKERS);

    let (actions, priority) = if required {
        let priority = if contains_any(text, &["dangerous", "immediate", "urgent"]) {
            RemedialPriority::High
        } else if contains_any(text, &["soon", "short term"]) {
            RemedialPriority::Medium
        } else {
            RemedialPriority::Low
        };
        (matched_terms(text, REMEDIAL_ACTIONS), priority)
    } else {
        (Vec::new(), RemedialPriority::Medium)
    };

    RemedialActions {
        required,
        actions,
        priority,
        deadline: first_capture(text, &DEADLINE_PATTERN),
    }
}

fn installation_checks(text: &str) -> InstallationChecks {
    let presence = |term: &str, present: &str| {
        if text.contains(term) {
            present.to_string()
        } else {
            NOT_SPECIFIED.to_string()
        }
    };

    let circuits = CIRCUIT_TYPES
        .iter()
        .filter(|t| {
            text.contains(&format!("{t} circuit")) || text.contains(&format!("{t} circuits"))
        })
        .map(|t| t.to_string())
        .collect();

    InstallationChecks {
        consumer_unit: presence("consumer unit", "Present"),
        wiring: presence("wiring", "Inspected"),
        earthing: presence("earthing", "Present"),
        bonding: presence("bonding", "Present"),
        circuits,
    }
}

fn engineer_details(text: &str) -> EngineerDetails {
    EngineerDetails {
        name: first_capture(text, &NAME_PATTERN),
        company: first_capture(text, &COMPANY_PATTERN),
        qualifications: matched_terms(text, QUALIFICATIONS),
    }
}

fn standards(text: &str) -> Standards {
    Standards {
        wiring_regulations: contains_any(text, &["bs 7671", "bs7671"]),
        iee_regulations: contains_any(text, &["iee", "institution of electrical engineers"]),
        other: matched_terms(text, OTHER_STANDARDS),
    }
}

/// Overall risk is marker-driven for this type: a dangerous finding is
/// high, an unsatisfactory outcome is medium, a clean pass is low.
fn assess_risk(text: &str) -> ElectricalRisk {
    let overall = if contains_any(text, &["dangerous", "immediate danger"]) {
        RiskLevel::High
    } else if contains_any(text, &["unsatisfactory", "remedial action"]) {
        RiskLevel::Medium
    } else if text.contains("satisfactory") {
        RiskLevel::Low
    } else {
        RiskLevel::Unknown
    };

    ElectricalRisk {
        overall,
        factors: matched_terms(text, RISK_FACTORS),
    }
}

fn bucket_actions(text: &str) -> ElectricalActions {
    let mut actions = ElectricalActions {
        immediate: Vec::new(),
        short_term: Vec::new(),
        long_term: Vec::new(),
    };

    if contains_any(text, &["immediate", "urgent", "dangerous"]) {
        actions
            .immediate
            .push("Address dangerous electrical conditions immediately".to_string());
    }
    if contains_any(text, &["remedial action", "action required"]) {
        actions
            .short_term
            .push("Complete required remedial actions".to_string());
    }
    if contains_any(text, &["next test", "re-inspection"]) {
        actions
            .short_term
            .push("Schedule next electrical inspection".to_string());
    }
    if contains_any(text, &["upgrade", "improve"]) {
        actions
            .long_term
            .push("Consider electrical system upgrades".to_string());
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsatisfactory_report() {
        let text = "EICR results: UNSATISFACTORY. Remedial action required within 28 days. \
                    Old wiring and missing RCD protection observed. Upgrade wiring advised. \
                    Next test due: 12 March 2026.";
        let report = analyze(text, "eicr.pdf");

        assert_eq!(report.compliance_status, ComplianceStatus::NonCompliant);
        assert!(report.remedial_actions.required);
        assert_eq!(report.remedial_actions.actions, vec!["upgrade wiring"]);
        assert_eq!(
            report.remedial_actions.deadline,
            Some("28 days".to_string())
        );
        assert_eq!(report.next_test_due, Some("12 march 2026".to_string()));
        assert_eq!(report.risk.overall, RiskLevel::Medium);
        assert_eq!(report.risk.factors.len(), 2);
    }

    #[test]
    fn test_satisfactory_report() {
        let text = "Periodic inspection completed to BS 7671. Overall assessment: \
                    satisfactory. Consumer unit present, earthing and bonding verified.";
        let report = analyze(text, "eicr.pdf");

        assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
        assert_eq!(report.test_results.overall, "Satisfactory");
        assert!(!report.remedial_actions.required);
        assert!(report.standards.wiring_regulations);
        assert_eq!(report.risk.overall, RiskLevel::Low);
        assert_eq!(report.installation.consumer_unit, "Present");
        assert_eq!(report.installation.earthing, "Present");
    }

    #[test]
    fn test_dangerous_condition_is_high_risk() {
        let report = analyze(
            "dangerous condition at consumer unit, remedial action required urgently",
            "e.pdf",
        );
        assert_eq!(report.risk.overall, RiskLevel::High);
        assert_eq!(report.remedial_actions.priority, RemedialPriority::High);
        assert!(!report.actions.immediate.is_empty());
    }

    #[test]
    fn test_empty_input_degrades_to_defaults() {
        let report = analyze("", "empty.pdf");
        assert_eq!(report.compliance_status, ComplianceStatus::Unknown);
        assert_eq!(report.test_results.overall, NOT_SPECIFIED);
        assert_eq!(report.next_test_due, None);
        assert!(report.risk.factors.is_empty());
        assert_eq!(report.risk.overall, RiskLevel::Unknown);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_circuits_need_circuit_suffix() {
        let report = analyze("kitchen circuits and lighting circuit tested; bathroom fan", "e.pdf");
        assert_eq!(report.installation.circuits, vec!["lighting", "kitchen"]);
    }
}
