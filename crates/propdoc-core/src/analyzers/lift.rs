//! Lift inspection and thorough examination analyzer.

use crate::analyzers::common::{
    compile_patterns, contains_any, first_capture, marker_status, slash_dates, tiered_risk,
    NOT_SPECIFIED,
};
use crate::model::{ComplianceStatus, RiskLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftReport {
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub examination_type: ExaminationType,
    pub lift_details: LiftDetails,
    pub results: InspectionResults,
    pub certificate: SafetyCertificate,
    pub maintenance: MaintenanceSchedule,
    pub evidence: LiftEvidence,
    pub risk: LiftRisk,
    pub key_dates: LiftDates,
    pub actions: LiftActions,
    pub recommendations: Vec<String>,
    pub legal: LiftLegal,
    pub inspector: InspectorDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExaminationType {
    ThoroughExamination,
    PeriodicInspection,
    Maintenance,
    Unknown,
}

impl fmt::Display for ExaminationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExaminationType::ThoroughExamination => "thorough examination",
            ExaminationType::PeriodicInspection => "periodic inspection",
            ExaminationType::Maintenance => "maintenance",
            ExaminationType::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftDetails {
    pub lift_type: String,
    pub manufacturer: Option<String>,
    pub serial_number: Option<String>,
    pub capacity: Option<String>,
    pub floors_served: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResults {
    pub overall: String,
    pub details: Vec<String>,
    pub defects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyCertificate {
    pub issued: bool,
    pub expiry_date: Option<String>,
    pub next_examination: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSchedule {
    pub frequency: String,
    pub company: Option<String>,
    pub contract_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftEvidence {
    pub has_inspection: bool,
    pub has_certificate: bool,
    pub has_maintenance: bool,
    pub has_emergency_procedures: bool,
    pub has_training: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftRisk {
    pub overall: RiskLevel,
    pub factors: Vec<String>,
    pub mitigation: Vec<String>,
    pub priority_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftDates {
    pub inspection_date: Option<String>,
    pub certificate_expiry: Option<String>,
    pub next_inspection: Option<String>,
    pub next_maintenance: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftActions {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub completed: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftLegal {
    pub lifting_operations_regulations: bool,
    pub health_and_safety_at_work_act: bool,
    pub building_safety_act: bool,
    pub work_equipment_regulations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectorDetails {
    pub qualifications: Vec<String>,
    pub accreditation: Vec<String>,
}

const DEFECTS: &[&str] = &[
    "brake wear",
    "door fault",
    "worn ropes",
    "hydraulic leak",
    "alarm fault",
    "levelling fault",
    "safety gear defect",
];

const RECOMMENDATIONS_RULES: &[(&[&str], &str)] = &[
    (&["defect", "fault"], "Address all identified defects promptly"),
    (&["maintenance", "service"], "Maintain regular maintenance schedule"),
    (&["inspection", "examination"], "Ensure inspections are conducted on time"),
    (&["training", "competent"], "Provide regular staff training"),
    (&["emergency", "procedure"], "Review emergency procedures"),
    (&["upgrade", "modernisation"], "Consider lift modernisation"),
];

static MANUFACTURER_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(?:manufacturer|make)[:\s]+([a-z][a-z ]+)"]));

static SERIAL_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:serial number|serial no|unit reference)[:\s]*([a-z0-9-]+)"])
});

static CAPACITY_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(\d+\s*(?:kg|persons?))"])
});

static FLOORS_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(\d+)\s*(?:floors?|storeys?|levels?)"]));

static NEXT_EXAMINATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"next\s+(?:thorough\s+)?examination[:\s]+([^.\n]+)",
        r"next\s+inspection[:\s]+([^.\n]+)",
        r"re-examination\s+due[:\s]+([^.\n]+)",
    ])
});

static EXPIRY_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:certificate\s+)?(?:expiry|expires|valid until)[:\s]+([^.\n]+)"])
});

static MAINTENANCE_COMPANY_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:maintenance company|maintained by|service provider)[:\s]+([a-z][a-z ]+)"])
});

/// Analyze a lift inspection report.
pub fn analyze(text: &str, filename: &str) -> LiftReport {
    let text = text.to_lowercase();

    LiftReport {
        summary: summarize(&text, filename),
        compliance_status: compliance_status(&text),
        examination_type: examination_type(&text),
        lift_details: lift_details(&text),
        results: inspection_results(&text),
        certificate: certificate(&text),
        maintenance: maintenance(&text),
        evidence: evidence(&text),
        risk: assess_risk(&text),
        key_dates: key_dates(&text),
        actions: bucket_actions(&text),
        recommendations: recommendations(&text),
        legal: legal(&text),
        inspector: inspector(&text),
    }
}

fn summarize(text: &str, filename: &str) -> String {
    let exam = examination_type(text);
    let results = inspection_results(text);

    let mut summary = format!("Lift inspection report for {filename}");
    if exam != ExaminationType::Unknown {
        summary.push_str(&format!(" - {exam}"));
    }
    if results.overall != NOT_SPECIFIED {
        summary.push_str(&format!(". Result: {}", results.overall));
    }
    if !results.defects.is_empty() {
        summary.push_str(&format!(
            ". {} defect(s) recorded requiring attention",
            results.defects.len()
        ));
    }
    summary.push('.');

    summary
}

fn examination_type(text: &str) -> ExaminationType {
    if contains_any(text, &["thorough examination", "thorough inspection"]) {
        ExaminationType::ThoroughExamination
    } else if contains_any(text, &["periodic inspection", "periodic examination"]) {
        ExaminationType::PeriodicInspection
    } else if contains_any(text, &["maintenance", "service visit"]) {
        ExaminationType::Maintenance
    } else {
        ExaminationType::Unknown
    }
}

/// Precedence: result markers with a certificate requirement layered on
/// top — a satisfactory examination without a certificate only reaches
/// partially compliant.
fn compliance_status(text: &str) -> ComplianceStatus {
    let has_examination = contains_any(text, &["inspection", "examination"]);
    let has_certificate = contains_any(text, &["certificate", "safety certificate"]);
    let result = marker_status(
        text,
        &["satisfactory"],
        &["unsatisfactory", "dangerous"],
        &["partially", "some issues"],
    );

    match result {
        ComplianceStatus::Compliant if has_examination && has_certificate => {
            ComplianceStatus::Compliant
        }
        ComplianceStatus::Compliant if has_examination => ComplianceStatus::PartiallyCompliant,
        ComplianceStatus::NonCompliant if has_examination => ComplianceStatus::NonCompliant,
        ComplianceStatus::PartiallyCompliant if has_examination => {
            ComplianceStatus::PartiallyCompliant
        }
        _ => ComplianceStatus::Unknown,
    }
}

fn lift_details(text: &str) -> LiftDetails {
    let lift_type = if text.contains("passenger lift") {
        "Passenger lift"
    } else if text.contains("goods lift") {
        "Goods lift"
    } else if text.contains("platform lift") {
        "Platform lift"
    } else if text.contains("firefighting lift") {
        "Firefighting lift"
    } else {
        NOT_SPECIFIED
    };

    LiftDetails {
        lift_type: lift_type.to_string(),
        manufacturer: first_capture(text, &MANUFACTURER_PATTERN),
        serial_number: first_capture(text, &SERIAL_PATTERN),
        capacity: first_capture(text, &CAPACITY_PATTERN),
        floors_served: first_capture(text, &FLOORS_PATTERN).map(|n| format!("{n} floors")),
    }
}

fn inspection_results(text: &str) -> InspectionResults {
    let overall = if text.contains("partially satisfactory") || text.contains("some issues") {
        "Partially satisfactory"
    } else if contains_any(text, &["unsatisfactory", "dangerous"]) {
        "Unsatisfactory"
    } else if text.contains("satisfactory") {
        "Satisfactory"
    } else {
        NOT_SPECIFIED
    };

    let mut details = Vec::new();
    if contains_any(text, &["mechanical", "electrical"]) {
        details.push("Mechanical and electrical systems checked".to_string());
    }
    if contains_any(text, &["safety gear", "brake"]) {
        details.push("Safety systems and brakes tested".to_string());
    }
    if contains_any(text, &["emergency", "alarm"]) {
        details.push("Emergency systems and alarms tested".to_string());
    }
    if contains_any(text, &["door", "gate"]) {
        details.push("Door and gate operation checked".to_string());
    }

    InspectionResults {
        overall: overall.to_string(),
        details,
        defects: crate::analyzers::common::matched_terms(text, DEFECTS),
    }
}

fn certificate(text: &str) -> SafetyCertificate {
    SafetyCertificate {
        issued: contains_any(text, &["certificate issued", "safety certificate"]),
        expiry_date: first_capture(text, &EXPIRY_PATTERN),
        next_examination: first_capture(text, &NEXT_EXAMINATION_PATTERNS),
    }
}

fn maintenance(text: &str) -> MaintenanceSchedule {
    let frequency = if text.contains("monthly") {
        "Monthly"
    } else if text.contains("quarterly") {
        "Quarterly"
    } else if contains_any(text, &["six monthly", "6 monthly", "six-monthly"]) {
        "Six-monthly"
    } else if contains_any(text, &["annual", "yearly"]) {
        "Annual"
    } else {
        NOT_SPECIFIED
    };

    let contract_type = if text.contains("comprehensive contract") {
        Some("Comprehensive".to_string())
    } else if text.contains("basic contract") {
        Some("Basic".to_string())
    } else {
        None
    };

    MaintenanceSchedule {
        frequency: frequency.to_string(),
        company: first_capture(text, &MAINTENANCE_COMPANY_PATTERN),
        contract_type,
    }
}

fn evidence(text: &str) -> LiftEvidence {
    LiftEvidence {
        has_inspection: contains_any(text, &["inspection", "examination"]),
        has_certificate: contains_any(text, &["certificate", "safety certificate"]),
        has_maintenance: contains_any(text, &["maintenance", "service"]),
        has_emergency_procedures: contains_any(text, &["emergency procedure", "emergency plan"]),
        has_training: contains_any(text, &["training", "competent person"]),
    }
}

fn assess_risk(text: &str) -> LiftRisk {
    let mut factors = Vec::new();
    let mut mitigation = Vec::new();
    let mut priority_actions = Vec::new();

    if contains_any(text, &["unsatisfactory", "dangerous"]) {
        factors.push("Unsatisfactory inspection result".to_string());
        mitigation.push("Immediate remedial action required".to_string());
        priority_actions.push("Address all identified defects".to_string());
    }
    if contains_any(text, &["defect", "fault"]) {
        factors.push("Defects identified".to_string());
    }
    if contains_any(text, &["trapped", "entrapment"]) {
        factors.push("Passenger entrapment risk".to_string());
    }
    if contains_any(text, &["expired", "out of date"]) {
        factors.push("Certificate expired or out of date".to_string());
        mitigation.push("Schedule immediate inspection".to_string());
        priority_actions.push("Book qualified inspector".to_string());
    }
    if text.contains("overdue") {
        factors.push("Maintenance overdue".to_string());
        mitigation.push("Schedule maintenance work".to_string());
        priority_actions.push("Contact maintenance contractor".to_string());
    }

    LiftRisk {
        overall: tiered_risk(factors.len()),
        factors,
        mitigation,
        priority_actions,
    }
}

fn key_dates(text: &str) -> LiftDates {
    let dates = slash_dates(text);
    LiftDates {
        inspection_date: dates.first().cloned(),
        certificate_expiry: first_capture(text, &EXPIRY_PATTERN),
        next_inspection: first_capture(text, &NEXT_EXAMINATION_PATTERNS),
        next_maintenance: dates.get(1).cloned(),
    }
}

fn bucket_actions(text: &str) -> LiftActions {
    let mut actions = LiftActions {
        immediate: Vec::new(),
        short_term: Vec::new(),
        long_term: Vec::new(),
        completed: Vec::new(),
    };

    if contains_any(text, &["unsatisfactory", "dangerous"]) {
        actions
            .immediate
            .push("Address safety issues immediately".to_string());
    }
    if contains_any(text, &["expired", "out of date"]) {
        actions
            .immediate
            .push("Schedule immediate inspection".to_string());
    }
    if contains_any(text, &["defect", "fault"]) {
        actions.short_term.push("Repair identified defects".to_string());
    }
    if contains_any(text, &["maintenance", "overdue"]) {
        actions.short_term.push("Schedule maintenance work".to_string());
    }
    if contains_any(text, &["training", "competent"]) {
        actions.short_term.push("Schedule staff training".to_string());
    }
    if contains_any(text, &["upgrade", "modernisation"]) {
        actions.long_term.push("Plan lift modernisation".to_string());
    }
    if contains_any(text, &["replacement", "new lift"]) {
        actions.long_term.push("Plan lift replacement".to_string());
    }
    if contains_any(text, &["defects rectified", "repairs completed"]) {
        actions
            .completed
            .push("Previously notified defects rectified".to_string());
    }

    actions
}

fn recommendations(text: &str) -> Vec<String> {
    let mut out: Vec<String> = RECOMMENDATIONS_RULES
        .iter()
        .filter(|(terms, _)| contains_any(text, terms))
        .map(|(_, rec)| rec.to_string())
        .collect();
    if out.is_empty() {
        out.push("Follow standard lift maintenance procedures".to_string());
    }
    out
}

fn legal(text: &str) -> LiftLegal {
    LiftLegal {
        lifting_operations_regulations: contains_any(
            text,
            &["loler", "lifting operations", "lift regulations"],
        ),
        health_and_safety_at_work_act: contains_any(text, &["health and safety", "hswa"]),
        building_safety_act: contains_any(text, &["building safety", "bsa"]),
        work_equipment_regulations: contains_any(
            text,
            &["puwer", "provision and use of work equipment"],
        ),
    }
}

fn inspector(text: &str) -> InspectorDetails {
    let mut qualifications = Vec::new();
    if contains_any(text, &["engineer", "inspector"]) {
        qualifications.push("Qualified lift engineer".to_string());
    }
    if contains_any(text, &["licensed", "accredited"]) {
        qualifications.push("Licensed lift inspector".to_string());
    }
    if contains_any(text, &["competent", "experienced"]) {
        qualifications.push("Competent person".to_string());
    }

    let mut accreditation = Vec::new();
    if contains_any(text, &["ukas", "accreditation"]) {
        accreditation.push("UKAS accredited".to_string());
    }
    if contains_any(text, &["iso", "standard"]) {
        accreditation.push("ISO standard compliance".to_string());
    }
    if contains_any(text, &["professional body", "institution"]) {
        accreditation.push("Professional body membership".to_string());
    }

    InspectorDetails {
        qualifications,
        accreditation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfactory_thorough_examination() {
        let text = "Thorough examination of passenger lift carried out 03/04/2024 under \
                    LOLER. Result satisfactory. Safety certificate issued. Next \
                    examination: october 2024. Capacity 8 persons, serves 6 floors.";
        let report = analyze(text, "lift.pdf");

        assert_eq!(report.examination_type, ExaminationType::ThoroughExamination);
        assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
        assert_eq!(report.results.overall, "Satisfactory");
        assert!(report.certificate.issued);
        assert_eq!(
            report.certificate.next_examination,
            Some("october 2024".to_string())
        );
        assert_eq!(report.lift_details.lift_type, "Passenger lift");
        assert_eq!(report.lift_details.capacity, Some("8 persons".to_string()));
        assert_eq!(
            report.lift_details.floors_served,
            Some("6 floors".to_string())
        );
        assert!(report.legal.lifting_operations_regulations);
        assert_eq!(report.risk.overall, RiskLevel::Low);
    }

    #[test]
    fn test_unsatisfactory_examination() {
        let text = "Periodic inspection result unsatisfactory: brake wear and door fault \
                    defects found. Certificate expired.";
        let report = analyze(text, "lift.pdf");

        assert_eq!(report.compliance_status, ComplianceStatus::NonCompliant);
        assert_eq!(report.results.defects, vec!["brake wear", "door fault"]);
        // unsatisfactory + defects + expired certificate
        assert_eq!(report.risk.overall, RiskLevel::High);
        assert!(!report.actions.immediate.is_empty());
    }

    #[test]
    fn test_satisfactory_without_certificate_is_partial() {
        let report = analyze("lift inspection satisfactory", "lift.pdf");
        assert_eq!(
            report.compliance_status,
            ComplianceStatus::PartiallyCompliant
        );
    }

    #[test]
    fn test_empty_input_degrades_to_defaults() {
        let report = analyze("", "empty.pdf");
        assert_eq!(report.compliance_status, ComplianceStatus::Unknown);
        assert_eq!(report.examination_type, ExaminationType::Unknown);
        assert_eq!(report.results.overall, NOT_SPECIFIED);
        assert_eq!(report.lift_details.manufacturer, None);
        assert_eq!(report.risk.overall, RiskLevel::Low);
        assert_eq!(
            report.recommendations,
            vec!["Follow standard lift maintenance procedures"]
        );
    }
}
