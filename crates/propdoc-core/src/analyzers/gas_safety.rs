//! Landlord gas safety record (CP12) analyzer.

use crate::analyzers::common::{
    compile_patterns, contains_any, first_capture, marker_status, matched_terms, NOT_SPECIFIED,
};
use crate::model::ComplianceStatus;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasSafetyReport {
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub appliance_checks: ApplianceChecks,
    pub flue_tests: FlueTests,
    pub next_inspection_due: Option<String>,
    pub engineer: GasEngineerDetails,
    pub safety_features: SafetyFeatures,
    pub recommendations: Vec<String>,
    pub actions: GasSafetyActions,
    pub compliance_notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceChecks {
    pub total: usize,
    pub satisfactory: usize,
    pub unsatisfactory: usize,
    pub not_determined: usize,
    pub details: Vec<ApplianceCheck>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceCheck {
    pub appliance: String,
    pub location: String,
    pub condition: CheckResult,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckResult {
    Satisfactory,
    Unsatisfactory,
    NotDetermined,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlueTests {
    pub total: usize,
    pub satisfactory: usize,
    pub unsatisfactory: usize,
    pub details: Vec<FlueTest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlueTest {
    pub appliance: String,
    pub result: CheckResult,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasEngineerDetails {
    pub name: Option<String>,
    pub company: Option<String>,
    pub registration_number: Option<String>,
    pub qualifications: Vec<String>,
    pub signed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyFeatures {
    pub flame_failure: bool,
    pub overheat_protection: bool,
    pub pressure_relief: bool,
    pub ventilation: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasSafetyActions {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

const APPLIANCE_TYPES: &[&str] = &[
    "boiler",
    "cooker",
    "fire",
    "heater",
    "water heater",
    "gas hob",
    "oven",
];

const LOCATIONS: &[&str] = &[
    "kitchen",
    "living room",
    "bedroom",
    "bathroom",
    "utility",
    "hall",
    "conservatory",
];

const APPLIANCE_ISSUES: &[&str] = &[
    "flame failure",
    "overheat protection",
    "pressure relief",
    "ventilation",
    "flue condition",
    "gas pressure",
    "safety device",
];

const FLUE_ISSUES: &[&str] = &[
    "blocked",
    "damaged",
    "inadequate",
    "poor condition",
    "insufficient draw",
    "spillage",
];

const QUALIFICATIONS: &[&str] = &[
    "gas safe registered",
    "gas engineer",
    "gas installer",
    "gas fitter",
    "accredited",
    "certified",
    "qualified",
];

const RECOMMENDATIONS: &[&str] = &[
    "annual inspection",
    "regular maintenance",
    "upgrade appliances",
    "improve ventilation",
    "install safety devices",
    "replace old equipment",
    "professional servicing",
];

const COMPLIANCE_NOTES: &[&str] = &[
    "gas safety regulations",
    "cp12 certificate",
    "annual requirement",
    "landlord obligation",
    "tenant notification",
    "safety standards",
    "building regulations",
];

static NEXT_INSPECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"next\s+inspection\s+due[:\s]+([^.\n]+)",
        r"next\s+check\s+due[:\s]+([^.\n]+)",
        r"valid\s+until[:\s]+([^.\n]+)",
        r"expires[:\s]+([^.\n]+)",
        r"renewal\s+due[:\s]+([^.\n]+)",
    ])
});

static FLUE_TEST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"flue\s+test[:\s]+([^.\n]+)",
        r"chimney\s+test[:\s]+([^.\n]+)",
        r"ventilation\s+test[:\s]+([^.\n]+)",
    ])
});

static NAME_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:engineer|inspector|qualified person)[:\s]+([a-z][a-z ]+)"])
});

static COMPANY_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:company|firm|organisation)[:\s]+([a-z][a-z ]+)"])
});

static GAS_SAFE_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"gas\s+safe\s+(?:number|reg|registration)[:\s]*([a-z0-9]+)"])
});

/// Analyze a gas safety certificate.
pub fn analyze(text: &str, filename: &str) -> GasSafetyReport {
    let text = text.to_lowercase();

    GasSafetyReport {
        summary: summarize(&text, filename),
        compliance_status: compliance_status(&text),
        appliance_checks: appliance_checks(&text),
        flue_tests: flue_tests(&text),
        next_inspection_due: first_capture(&text, &NEXT_INSPECTION_PATTERNS),
        engineer: engineer_details(&text),
        safety_features: safety_features(&text),
        recommendations: matched_terms(&text, RECOMMENDATIONS),
        actions: bucket_actions(&text),
        compliance_notes: matched_terms(&text, COMPLIANCE_NOTES),
    }
}

fn summarize(text: &str, filename: &str) -> String {
    let has_unsatisfactory = contains_any(text, &["unsatisfactory", "action required"]);
    let is_clean = text.contains("satisfactory") && !text.contains("unsatisfactory");

    if has_unsatisfactory {
        format!(
            "Gas safety certificate for {filename} identifies safety issues requiring \
             attention. Some appliances or flues require remedial work to ensure \
             compliance with gas safety regulations."
        )
    } else if is_clean {
        format!(
            "Gas safety certificate for {filename} shows all gas appliances and flues \
             are satisfactory and compliant with current safety standards. No immediate \
             remedial action required."
        )
    } else {
        format!(
            "Gas safety certificate for {filename} has been completed. Review required \
             to determine compliance status and any necessary actions."
        )
    }
}

/// Same precedence family as the electrical report: results markers,
/// negative outranking positive.
fn compliance_status(text: &str) -> ComplianceStatus {
    marker_status(
        text,
        &["satisfactory"],
        &["unsatisfactory", "dangerous"],
        &["partially", "some remedial"],
    )
}

fn appliance_checks(text: &str) -> ApplianceChecks {
    let mut checks = ApplianceChecks {
        total: 0,
        satisfactory: 0,
        unsatisfactory: 0,
        not_determined: 0,
        details: Vec::new(),
    };

    for appliance in APPLIANCE_TYPES {
        if !text.contains(appliance) {
            continue;
        }
        checks.total += 1;

        let condition = if text.contains(&format!("{appliance} unsatisfactory"))
            || text.contains(&format!("unsatisfactory {appliance}"))
        {
            checks.unsatisfactory += 1;
            CheckResult::Unsatisfactory
        } else if text.contains(&format!("{appliance} satisfactory"))
            || text.contains(&format!("satisfactory {appliance}"))
        {
            checks.satisfactory += 1;
            CheckResult::Satisfactory
        } else {
            checks.not_determined += 1;
            CheckResult::NotDetermined
        };

        let location = LOCATIONS
            .iter()
            .find(|loc| {
                text.contains(&format!("{loc} {appliance}"))
                    || text.contains(&format!("{appliance} {loc}"))
            })
            .map(|loc| loc.to_string())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        let issues = if condition == CheckResult::Unsatisfactory {
            matched_terms(text, APPLIANCE_ISSUES)
        } else {
            Vec::new()
        };

        checks.details.push(ApplianceCheck {
            appliance: appliance.to_string(),
            location,
            condition,
            issues,
        });
    }

    checks
}

fn flue_tests(text: &str) -> FlueTests {
    let mut tests = FlueTests {
        total: 0,
        satisfactory: 0,
        unsatisfactory: 0,
        details: Vec::new(),
    };

    for pattern in FLUE_TEST_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            let test_text = m.as_str();
            tests.total += 1;

            let result = if contains_any(test_text, &["unsatisfactory", "failed"]) {
                tests.unsatisfactory += 1;
                CheckResult::Unsatisfactory
            } else {
                tests.satisfactory += 1;
                CheckResult::Satisfactory
            };

            let appliance = ["boiler", "cooker", "fire", "heater"]
                .iter()
                .find(|a| test_text.contains(**a))
                .map(|a| a.to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string());

            let issues = if result == CheckResult::Unsatisfactory {
                matched_terms(test_text, FLUE_ISSUES)
            } else {
                Vec::new()
            };

            tests.details.push(FlueTest {
                appliance,
                result,
                issues,
            });
        }
    }

    tests
}

fn engineer_details(text: &str) -> GasEngineerDetails {
    GasEngineerDetails {
        name: first_capture(text, &NAME_PATTERN),
        company: first_capture(text, &COMPANY_PATTERN),
        registration_number: first_capture(text, &GAS_SAFE_PATTERN),
        qualifications: matched_terms(text, QUALIFICATIONS),
        signed: contains_any(text, &["signature", "signed", "authorised"]),
    }
}

fn safety_features(text: &str) -> SafetyFeatures {
    SafetyFeatures {
        flame_failure: contains_any(text, &["flame failure", "ffd"]),
        overheat_protection: contains_any(text, &["overheat protection", "thermostat"]),
        pressure_relief: contains_any(text, &["pressure relief", "safety valve"]),
        ventilation: contains_any(text, &["ventilation", "air supply"]),
    }
}

fn bucket_actions(text: &str) -> GasSafetyActions {
    let mut actions = GasSafetyActions {
        immediate: Vec::new(),
        short_term: Vec::new(),
        long_term: Vec::new(),
    };

    if contains_any(text, &["immediate", "urgent", "dangerous"]) {
        actions
            .immediate
            .push("Address dangerous gas conditions immediately".to_string());
    }
    if contains_any(text, &["remedial action", "action required"]) {
        actions
            .short_term
            .push("Complete required remedial actions".to_string());
    }
    if contains_any(text, &["next inspection", "annual"]) {
        actions
            .short_term
            .push("Schedule next gas safety inspection".to_string());
    }
    if contains_any(text, &["upgrade", "improve"]) {
        actions
            .long_term
            .push("Consider gas appliance upgrades".to_string());
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_certificate() {
        let text = "Gas safety certificate. Boiler satisfactory. Flue test: satisfactory. \
                    Gas Safe registration: 123456. Valid until: 1 June 2026. Signed.";
        let report = analyze(text, "cp12.pdf");

        assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
        assert_eq!(report.appliance_checks.total, 1);
        assert_eq!(report.appliance_checks.satisfactory, 1);
        assert_eq!(report.flue_tests.total, 1);
        assert_eq!(report.flue_tests.satisfactory, 1);
        assert_eq!(
            report.engineer.registration_number,
            Some("123456".to_string())
        );
        assert!(report.engineer.signed);
        assert_eq!(
            report.next_inspection_due,
            Some("1 june 2026".to_string())
        );
    }

    #[test]
    fn test_unsatisfactory_appliance() {
        let text = "Kitchen cooker unsatisfactory: flue condition poor, gas pressure low. \
                    Remedial action required urgently.";
        let report = analyze(text, "cp12.pdf");

        assert_eq!(report.compliance_status, ComplianceStatus::NonCompliant);
        assert_eq!(report.appliance_checks.unsatisfactory, 1);
        let cooker = &report.appliance_checks.details[0];
        assert_eq!(cooker.appliance, "cooker");
        assert_eq!(cooker.location, "kitchen");
        assert!(cooker.issues.contains(&"flue condition".to_string()));
        assert!(!report.actions.immediate.is_empty());
        assert!(!report.actions.short_term.is_empty());
    }

    #[test]
    fn test_failed_flue_test_records_issues() {
        let text = "Flue test: boiler flue blocked and damaged, failed";
        let report = analyze(text, "cp12.pdf");
        assert_eq!(report.flue_tests.unsatisfactory, 1);
        let flue = &report.flue_tests.details[0];
        assert_eq!(flue.appliance, "boiler");
        assert_eq!(flue.result, CheckResult::Unsatisfactory);
        assert_eq!(flue.issues, vec!["blocked", "damaged"]);
    }

    #[test]
    fn test_empty_input_degrades_to_defaults() {
        let report = analyze("", "empty.pdf");
        assert_eq!(report.compliance_status, ComplianceStatus::Unknown);
        assert_eq!(report.appliance_checks.total, 0);
        assert_eq!(report.flue_tests.total, 0);
        assert_eq!(report.next_inspection_due, None);
        assert!(!report.engineer.signed);
        assert!(report.compliance_notes.is_empty());
    }

    #[test]
    fn test_safety_features_flags() {
        let report = analyze(
            "flame failure device fitted, pressure relief valve ok, ventilation adequate",
            "cp12.pdf",
        );
        assert!(report.safety_features.flame_failure);
        assert!(report.safety_features.pressure_relief);
        assert!(report.safety_features.ventilation);
        assert!(!report.safety_features.overheat_protection);
    }
}
