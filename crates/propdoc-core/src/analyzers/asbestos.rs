//! Asbestos survey analyzer.

use crate::analyzers::common::{
    checklist_status, compile_patterns, contains_any, first_capture, slash_dates, tiered_risk,
};
use crate::model::{ComplianceStatus, RiskLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsbestosReport {
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub survey_type: AsbestosSurveyType,
    pub findings: AsbestosFindings,
    pub risk: AsbestosRisk,
    pub management_plan: ManagementPlan,
    pub evidence: AsbestosEvidence,
    pub key_dates: AsbestosDates,
    pub actions: AsbestosActions,
    pub recommendations: Vec<String>,
    pub legal: AsbestosLegal,
    pub surveyor: SurveyorDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsbestosSurveyType {
    Management,
    Refurbishment,
    Demolition,
    Unknown,
}

impl fmt::Display for AsbestosSurveyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AsbestosSurveyType::Management => "management",
            AsbestosSurveyType::Refurbishment => "refurbishment",
            AsbestosSurveyType::Demolition => "demolition",
            AsbestosSurveyType::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsbestosFindings {
    pub acm_identified: bool,
    pub acm_count: usize,
    pub locations: Vec<String>,
    pub stated_risk_levels: Vec<String>,
    pub material_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsbestosRisk {
    pub overall: RiskLevel,
    pub factors: Vec<String>,
    pub mitigation: Vec<String>,
    pub priority_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementPlan {
    pub exists: bool,
    pub monitoring_schedule: Vec<String>,
    pub reinspection_date: Option<String>,
    pub training_requirements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsbestosEvidence {
    pub has_survey: bool,
    pub has_management_plan: bool,
    pub has_risk_assessment: bool,
    pub has_training: bool,
    pub has_monitoring: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsbestosDates {
    pub survey_date: Option<String>,
    pub next_inspection: Option<String>,
    pub plan_review: Option<String>,
    pub training_due: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsbestosActions {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub completed: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsbestosLegal {
    pub control_of_asbestos_regulations: bool,
    pub health_and_safety_at_work_act: bool,
    pub building_safety_act: bool,
    pub management_regulations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyorDetails {
    pub qualifications: Vec<String>,
    pub accreditation: Vec<String>,
}

const ACM_LOCATIONS: &[&str] = &[
    "roof",
    "ceiling",
    "wall",
    "floor",
    "pipe",
    "duct",
    "boiler",
    "heating",
    "electrical",
    "insulation",
    "tile",
    "board",
    "cement",
    "textured coating",
];

const MATERIAL_TYPES: &[&str] = &[
    "chrysotile",
    "amosite",
    "crocidolite",
    "cement",
    "insulation board",
    "textured coating",
    "floor tile",
    "pipe lagging",
    "roofing felt",
];

static ACM_COUNT_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(\d+)\s*(?:acms?|asbestos containing materials?)"])
});

static REINSPECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"re.?inspection[:\s]+([^.\n]+)",
        r"next inspection[:\s]+([^.\n]+)",
        r"review date[:\s]+([^.\n]+)",
        r"monitoring date[:\s]+([^.\n]+)",
    ])
});

static TRAINING_DUE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"training due[:\s]+([^.\n]+)",
        r"awareness training[:\s]+([^.\n]+)",
        r"refresher due[:\s]+([^.\n]+)",
    ])
});

/// Analyze an asbestos survey report.
pub fn analyze(text: &str, filename: &str) -> AsbestosReport {
    let text = text.to_lowercase();

    AsbestosReport {
        summary: summarize(&text, filename),
        compliance_status: compliance_status(&text),
        survey_type: survey_type(&text),
        findings: findings(&text),
        risk: assess_risk(&text),
        management_plan: management_plan(&text),
        evidence: evidence(&text),
        key_dates: key_dates(&text),
        actions: bucket_actions(&text),
        recommendations: recommendations(&text),
        legal: legal(&text),
        surveyor: surveyor(&text),
    }
}

fn summarize(text: &str, filename: &str) -> String {
    let has_acm = contains_any(text, &["acm", "asbestos containing material"]);
    let survey_type = survey_type(text);
    let risk = assess_risk(text).overall;

    let mut summary = format!("Asbestos survey for {filename}");

    if survey_type != AsbestosSurveyType::Unknown {
        summary.push_str(&format!(" - {survey_type} survey"));
    }
    if has_acm {
        summary.push_str(" identifies asbestos containing materials requiring management");
    } else {
        summary.push_str(" - no asbestos containing materials identified");
    }
    if risk != RiskLevel::Unknown {
        summary.push_str(&format!(". Overall risk level: {risk}"));
    }
    summary.push('.');

    summary
}

fn survey_type(text: &str) -> AsbestosSurveyType {
    if contains_any(text, &["management survey", "management plan"]) {
        AsbestosSurveyType::Management
    } else if text.contains("refurbishment") {
        AsbestosSurveyType::Refurbishment
    } else if text.contains("demolition") {
        AsbestosSurveyType::Demolition
    } else {
        AsbestosSurveyType::Unknown
    }
}

/// Precedence: the survey itself anchors the checklist; a management plan
/// and a risk assessment are the supporting evidence.
fn compliance_status(text: &str) -> ComplianceStatus {
    let has_survey = contains_any(text, &["survey", "inspection"]);
    let has_plan = contains_any(text, &["management plan", "management strategy"]);
    let has_risk_assessment = contains_any(text, &["risk assessment", "risk evaluation"]);
    checklist_status(has_survey, has_plan, has_risk_assessment)
}

fn findings(text: &str) -> AsbestosFindings {
    let acm_identified = contains_any(text, &["acm", "asbestos containing material"]);

    let acm_count = first_capture(text, &ACM_COUNT_PATTERN)
        .and_then(|n| n.parse().ok())
        .unwrap_or(0);

    let locations = ACM_LOCATIONS
        .iter()
        .filter(|loc| text.contains(**loc))
        .map(|loc| capitalize(loc))
        .collect();

    let mut stated_risk_levels = Vec::new();
    if text.contains("high risk") {
        stated_risk_levels.push("high".to_string());
    }
    if text.contains("medium risk") {
        stated_risk_levels.push("medium".to_string());
    }
    if text.contains("low risk") {
        stated_risk_levels.push("low".to_string());
    }

    let material_types = MATERIAL_TYPES
        .iter()
        .filter(|m| text.contains(**m))
        .map(|m| capitalize(m))
        .collect();

    AsbestosFindings {
        acm_identified,
        acm_count,
        locations,
        stated_risk_levels,
        material_types,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Factor-count step function over condition signals; each matched factor
/// brings its own mitigation and priority action.
fn assess_risk(text: &str) -> AsbestosRisk {
    let mut factors = Vec::new();
    let mut mitigation = Vec::new();
    let mut priority_actions = Vec::new();

    if contains_any(text, &["high risk", "dangerous"]) {
        factors.push("High risk ACM identified".to_string());
        mitigation.push("Immediate professional assessment required".to_string());
        priority_actions.push("Engage licensed asbestos contractor".to_string());
    }
    if contains_any(text, &["damaged", "deteriorated"]) {
        factors.push("Damaged or deteriorated ACM".to_string());
        mitigation.push("Repair or encapsulate damaged ACM".to_string());
        priority_actions.push("Schedule remedial work".to_string());
    }
    if contains_any(text, &["accessible", "exposed"]) {
        factors.push("Accessible or exposed ACM".to_string());
        mitigation.push("Restrict access to ACM areas".to_string());
        priority_actions.push("Install warning signs and barriers".to_string());
    }
    if contains_any(text, &["friable", "loose"]) {
        factors.push("Friable or loose ACM".to_string());
    }
    if contains_any(text, &["disturbance", "drilling"]) {
        factors.push("Risk of ACM disturbance".to_string());
        mitigation.push("Implement safe working procedures".to_string());
        priority_actions.push("Provide asbestos awareness training".to_string());
    }

    AsbestosRisk {
        overall: tiered_risk(factors.len()),
        factors,
        mitigation,
        priority_actions,
    }
}

fn management_plan(text: &str) -> ManagementPlan {
    let mut monitoring_schedule = Vec::new();
    if text.contains("monthly") {
        monitoring_schedule.push("Monthly monitoring".to_string());
    }
    if contains_any(text, &["quarterly", "quarter"]) {
        monitoring_schedule.push("Quarterly monitoring".to_string());
    }
    if contains_any(text, &["annually", "annual"]) {
        monitoring_schedule.push("Annual monitoring".to_string());
    }
    if contains_any(text, &["6 months", "six months"]) {
        monitoring_schedule.push("6-monthly monitoring".to_string());
    }

    let mut training_requirements = Vec::new();
    if contains_any(text, &["asbestos awareness", "awareness training"]) {
        training_requirements.push("Asbestos awareness training".to_string());
    }
    if contains_any(text, &["licensed contractor", "specialist training"]) {
        training_requirements.push("Licensed contractor training".to_string());
    }
    if contains_any(text, &["supervisor", "management training"]) {
        training_requirements.push("Supervisor/management training".to_string());
    }
    if contains_any(text, &["refresher", "annual training"]) {
        training_requirements.push("Annual refresher training".to_string());
    }

    ManagementPlan {
        exists: contains_any(text, &["management plan", "management strategy"]),
        monitoring_schedule,
        reinspection_date: first_capture(text, &REINSPECTION_PATTERNS),
        training_requirements,
    }
}

fn evidence(text: &str) -> AsbestosEvidence {
    AsbestosEvidence {
        has_survey: contains_any(text, &["survey", "inspection"]),
        has_management_plan: contains_any(text, &["management plan", "management strategy"]),
        has_risk_assessment: contains_any(text, &["risk assessment", "risk evaluation"]),
        has_training: contains_any(text, &["training", "awareness"]),
        has_monitoring: contains_any(text, &["monitoring", "re-inspection"]),
    }
}

fn key_dates(text: &str) -> AsbestosDates {
    let dates = slash_dates(text);
    AsbestosDates {
        survey_date: dates.first().cloned(),
        next_inspection: first_capture(text, &REINSPECTION_PATTERNS),
        plan_review: dates.get(1).cloned(),
        training_due: first_capture(text, &TRAINING_DUE_PATTERNS),
    }
}

fn bucket_actions(text: &str) -> AsbestosActions {
    let mut actions = AsbestosActions {
        immediate: Vec::new(),
        short_term: Vec::new(),
        long_term: Vec::new(),
        completed: Vec::new(),
    };

    if contains_any(text, &["high risk", "dangerous"]) {
        actions
            .immediate
            .push("Immediate professional assessment of high-risk ACM".to_string());
    }
    if contains_any(text, &["damaged", "deteriorated"]) {
        actions
            .immediate
            .push("Assess and secure damaged ACM".to_string());
    }
    if text.contains("management plan") {
        actions
            .short_term
            .push("Develop or update asbestos management plan".to_string());
    }
    if contains_any(text, &["training", "awareness"]) {
        actions
            .short_term
            .push("Schedule asbestos awareness training".to_string());
    }
    if contains_any(text, &["monitoring", "inspection"]) {
        actions
            .short_term
            .push("Establish monitoring and inspection schedule".to_string());
    }
    if contains_any(text, &["remediation", "removal"]) {
        actions
            .long_term
            .push("Plan long-term ACM remediation strategy".to_string());
    }
    if contains_any(text, &["review", "update"]) {
        actions
            .long_term
            .push("Schedule regular management plan reviews".to_string());
    }
    if contains_any(text, &["removed and certified", "remediation completed"]) {
        actions
            .completed
            .push("ACM remediation completed".to_string());
    }

    actions
}

fn recommendations(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    if text.contains("management plan") {
        out.push("Develop comprehensive asbestos management plan".to_string());
    }
    if text.contains("risk assessment") {
        out.push("Conduct detailed risk assessment of identified ACM".to_string());
    }
    if text.contains("training") {
        out.push("Provide asbestos awareness training to staff".to_string());
    }
    if text.contains("monitoring") {
        out.push("Establish regular monitoring and inspection regime".to_string());
    }
    if text.contains("remediation") {
        out.push("Plan ACM remediation where necessary".to_string());
    }
    if text.contains("encapsulation") {
        out.push("Consider ACM encapsulation as alternative to removal".to_string());
    }
    if out.is_empty() {
        out.push("Follow standard asbestos management procedures".to_string());
    }
    out
}

fn legal(text: &str) -> AsbestosLegal {
    AsbestosLegal {
        control_of_asbestos_regulations: contains_any(text, &["control of asbestos", "car 2012"]),
        health_and_safety_at_work_act: contains_any(text, &["health and safety", "hswa"]),
        building_safety_act: contains_any(text, &["building safety", "bsa"]),
        management_regulations: contains_any(text, &["management regulations", "regulation 4"]),
    }
}

fn surveyor(text: &str) -> SurveyorDetails {
    let mut qualifications = Vec::new();
    if contains_any(text, &["surveyor", "inspector"]) {
        qualifications.push("Qualified asbestos surveyor".to_string());
    }
    if contains_any(text, &["licensed", "accredited"]) {
        qualifications.push("Licensed asbestos professional".to_string());
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

    SurveyorDetails {
        qualifications,
        accreditation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_management_survey_with_acm() {
        let text = "Asbestos management survey dated 14/02/2024. 6 ACMs identified: \
                    ceiling tile and pipe lagging, chrysotile. Damaged insulation board \
                    accessible in the boiler room. Management plan in place with annual \
                    monitoring. Re-inspection: february 2025. Risk assessment attached.";
        let report = analyze(text, "asbestos.pdf");

        assert_eq!(report.survey_type, AsbestosSurveyType::Management);
        assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
        assert!(report.findings.acm_identified);
        assert_eq!(report.findings.acm_count, 6);
        assert!(report.findings.material_types.contains(&"Chrysotile".to_string()));
        assert!(report.management_plan.exists);
        assert_eq!(
            report.key_dates.survey_date,
            Some("14/02/2024".to_string())
        );
        assert_eq!(
            report.management_plan.reinspection_date,
            Some("february 2025".to_string())
        );
        // damaged + accessible
        assert_eq!(report.risk.overall, RiskLevel::Medium);
    }

    #[test]
    fn test_no_acm_summary() {
        let report = analyze("asbestos survey: no suspect materials observed", "s.pdf");
        assert!(!report.findings.acm_identified);
        assert!(report
            .summary
            .contains("no asbestos containing materials identified"));
    }

    #[test]
    fn test_high_risk_factor_stack() {
        let text = "high risk acm, damaged and friable lagging, exposed in accessible \
                    riser, disturbance likely during works";
        let report = analyze(text, "s.pdf");
        assert_eq!(report.risk.overall, RiskLevel::High);
        assert!(report.risk.factors.len() >= 4);
        assert!(report
            .risk
            .priority_actions
            .contains(&"Engage licensed asbestos contractor".to_string()));
    }

    #[test]
    fn test_survey_without_plan_is_partial() {
        let report = analyze(
            "asbestos survey completed, risk assessment included",
            "s.pdf",
        );
        assert_eq!(
            report.compliance_status,
            ComplianceStatus::PartiallyCompliant
        );
    }

    #[test]
    fn test_empty_input_degrades_to_defaults() {
        let report = analyze("", "empty.pdf");
        assert_eq!(report.survey_type, AsbestosSurveyType::Unknown);
        assert_eq!(report.findings.acm_count, 0);
        assert!(report.findings.locations.is_empty());
        assert_eq!(report.key_dates.survey_date, None);
        assert_eq!(report.risk.overall, RiskLevel::Low);
        assert_eq!(
            report.recommendations,
            vec!["Follow standard asbestos management procedures"]
        );
    }
}
