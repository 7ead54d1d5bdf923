//! Building survey analyzer.
//!
//! The only variant that grades an internal `Critical` tier above the
//! canonical three-step scale; normalization clamps it to high.

use crate::analyzers::common::{
    checklist_status, compile_patterns, contains_all, contains_any, first_capture, slash_dates,
    tiered_risk, NOT_SPECIFIED,
};
use crate::model::{ComplianceStatus, RiskLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingSurveyReport {
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub survey_type: BuildingSurveyType,
    pub property: SurveyedProperty,
    pub structure: StructuralAssessment,
    pub defects: DefectSchedule,
    pub compliance_issues: ComplianceIssues,
    pub risk: BuildingRisk,
    pub evidence: SurveyEvidence,
    pub key_dates: SurveyDates,
    pub actions: SurveyActions,
    pub recommendations: Vec<String>,
    pub legal: SurveyLegal,
    pub surveyor: BuildingSurveyorDetails,
    pub methodology: SurveyMethodology,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildingSurveyType {
    FullStructural,
    Structural,
    Condition,
    Homebuyer,
    Unknown,
}

impl fmt::Display for BuildingSurveyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuildingSurveyType::FullStructural => "full structural",
            BuildingSurveyType::Structural => "structural",
            BuildingSurveyType::Condition => "condition",
            BuildingSurveyType::Homebuyer => "homebuyer",
            BuildingSurveyType::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Element condition grade; `Critical` sits above the canonical scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionGrade {
    Good,
    Fair,
    Poor,
    Critical,
    Unknown,
}

impl fmt::Display for ConditionGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConditionGrade::Good => "good",
            ConditionGrade::Fair => "fair",
            ConditionGrade::Poor => "poor",
            ConditionGrade::Critical => "critical",
            ConditionGrade::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyedProperty {
    pub property_type: String,
    pub address: Option<String>,
    pub construction_type: Option<String>,
    pub age: Option<String>,
    pub floors: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralAssessment {
    pub overall: ConditionGrade,
    pub foundation: String,
    pub walls: String,
    pub roof: String,
    pub floors: String,
    pub windows: String,
    pub doors: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectSchedule {
    pub critical: Vec<String>,
    pub major: Vec<String>,
    pub minor: Vec<String>,
    pub estimated_costs: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceIssues {
    pub building_regulations: Vec<String>,
    pub planning_permissions: Vec<String>,
    pub health_and_safety: Vec<String>,
    pub accessibility: Vec<String>,
    pub energy_efficiency: Vec<String>,
}

/// Risk for this variant keeps the internal critical tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRisk {
    pub critical: bool,
    pub overall: RiskLevel,
    pub factors: Vec<String>,
    pub mitigation: Vec<String>,
    pub priority_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyEvidence {
    pub has_survey: bool,
    pub has_structural_assessment: bool,
    pub has_defect_report: bool,
    pub has_cost_estimates: bool,
    pub has_recommendations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDates {
    pub survey_date: Option<String>,
    pub next_inspection: Option<String>,
    pub remedial_work_deadline: Option<String>,
    pub review_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyActions {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub completed: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyLegal {
    pub building_regulations: bool,
    pub planning_permissions: bool,
    pub health_and_safety: bool,
    pub building_safety_act: bool,
    pub accessibility_regulations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingSurveyorDetails {
    pub qualifications: Vec<String>,
    pub accreditation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyMethodology {
    pub inspection_level: String,
    pub access_provided: String,
    pub limitations: Vec<String>,
    pub assumptions: Vec<String>,
}

const CONSTRUCTION_TYPES: &[&str] = &[
    "reinforced concrete",
    "steel frame",
    "timber frame",
    "brick",
    "concrete",
    "steel",
    "timber",
    "masonry",
    "stone",
    "traditional",
    "modern",
];

static ADDRESS_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"address[:\s]+([^.\n]+)"]));

static AGE_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(\d+)\s*years?\s*old"]));

static FLOORS_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(\d+)\s*(?:floors?|storeys?|levels?)"]));

static COST_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"£([\d][\d,]*)"]));

static NEXT_INSPECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"next inspection[:\s]+([^.\n]+)",
        r"re-inspection[:\s]+([^.\n]+)",
        r"review date[:\s]+([^.\n]+)",
    ])
});

/// Analyze a building survey report.
pub fn analyze(text: &str, filename: &str) -> BuildingSurveyReport {
    let text = text.to_lowercase();

    BuildingSurveyReport {
        summary: summarize(&text, filename),
        compliance_status: compliance_status(&text),
        survey_type: survey_type(&text),
        property: property_details(&text),
        structure: structural_assessment(&text),
        defects: defects(&text),
        compliance_issues: compliance_issues(&text),
        risk: assess_risk(&text),
        evidence: evidence(&text),
        key_dates: key_dates(&text),
        actions: bucket_actions(&text),
        recommendations: recommendations(&text),
        legal: legal(&text),
        surveyor: surveyor(&text),
        methodology: methodology(&text),
    }
}

fn summarize(text: &str, filename: &str) -> String {
    let survey_type = survey_type(text);
    let structure = structural_assessment(text);
    let defects = defects(text);

    let mut summary = format!("Building survey for {filename}");
    if survey_type != BuildingSurveyType::Unknown {
        summary.push_str(&format!(" - {survey_type} survey"));
    }
    match structure.overall {
        ConditionGrade::Critical => {
            summary.push_str(" shows critical structural issues requiring immediate attention")
        }
        ConditionGrade::Poor => summary.push_str(" identifies significant structural problems"),
        ConditionGrade::Fair => summary.push_str(" shows some structural concerns"),
        ConditionGrade::Good => summary.push_str(" shows good structural condition"),
        ConditionGrade::Unknown => {}
    }
    if !defects.critical.is_empty() {
        summary.push_str(&format!(
            " with {} critical defect(s)",
            defects.critical.len()
        ));
    } else if !defects.major.is_empty() {
        summary.push_str(&format!(" with {} major defect(s)", defects.major.len()));
    }
    summary.push('.');

    summary
}

fn survey_type(text: &str) -> BuildingSurveyType {
    if contains_any(text, &["full structural", "comprehensive structural"]) {
        BuildingSurveyType::FullStructural
    } else if contains_any(text, &["structural survey", "structural assessment"]) {
        BuildingSurveyType::Structural
    } else if contains_any(text, &["condition survey", "condition report"]) {
        BuildingSurveyType::Condition
    } else if contains_any(text, &["homebuyer", "home buyer"]) {
        BuildingSurveyType::Homebuyer
    } else {
        BuildingSurveyType::Unknown
    }
}

/// Precedence: the survey anchors the checklist; structural coverage and
/// a defect record are the supporting evidence.
fn compliance_status(text: &str) -> ComplianceStatus {
    let has_survey = contains_any(text, &["survey", "inspection"]);
    let has_structural = contains_any(text, &["structural", "foundation", "roof"]);
    let has_defect_report = contains_any(text, &["defect", "issue", "problem"]);
    checklist_status(has_survey, has_structural, has_defect_report)
}

fn property_details(text: &str) -> SurveyedProperty {
    let property_type = if contains_any(text, &["residential", "house", "flat"]) {
        "Residential property"
    } else if contains_any(text, &["industrial", "warehouse", "factory"]) {
        "Industrial property"
    } else if contains_any(text, &["retail", "shop", "store"]) {
        "Retail property"
    } else if contains_any(text, &["office", "commercial"]) {
        "Office property"
    } else {
        "Commercial property"
    };

    let construction_type = CONSTRUCTION_TYPES
        .iter()
        .find(|c| text.contains(**c))
        .map(|c| {
            let mut chars = c.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        });

    let condition = if contains_any(text, &["good condition", "well maintained"]) {
        Some("Good".to_string())
    } else if contains_any(text, &["fair condition", "reasonable condition"]) {
        Some("Fair".to_string())
    } else if contains_any(text, &["poor condition", "deteriorated"]) {
        Some("Poor".to_string())
    } else if contains_any(text, &["critical condition", "unsafe"]) {
        Some("Critical".to_string())
    } else {
        None
    };

    SurveyedProperty {
        property_type: property_type.to_string(),
        address: first_capture(text, &ADDRESS_PATTERN),
        construction_type,
        age: first_capture(text, &AGE_PATTERN).map(|y| format!("{y} years old")),
        floors: first_capture(text, &FLOORS_PATTERN).map(|f| format!("{f} floors")),
        condition,
    }
}

fn structural_assessment(text: &str) -> StructuralAssessment {
    let overall = if contains_any(text, &["critical", "unsafe", "dangerous"]) {
        ConditionGrade::Critical
    } else if contains_any(text, &["poor condition", "deteriorated"]) {
        ConditionGrade::Poor
    } else if contains_any(text, &["fair condition", "reasonable"]) {
        ConditionGrade::Fair
    } else if contains_any(text, &["good condition", "sound"]) {
        ConditionGrade::Good
    } else {
        ConditionGrade::Unknown
    };

    let element = |name: &str, states: &[(&str, &str)]| -> String {
        if !text.contains(name) {
            return "Not assessed".to_string();
        }
        for (marker, verdict) in states {
            if text.contains(marker) {
                return verdict.to_string();
            }
        }
        "Not assessed".to_string()
    };

    StructuralAssessment {
        overall,
        foundation: element(
            "foundation",
            &[
                ("settlement", "Settlement issues"),
                ("crack", "Cracking"),
                ("damp", "Damp issues"),
                ("good", "Good"),
            ],
        ),
        walls: element(
            "wall",
            &[
                ("crack", "Cracking"),
                ("damp", "Damp issues"),
                ("movement", "Movement"),
                ("good", "Good"),
            ],
        ),
        roof: element(
            "roof",
            &[
                ("leak", "Leaking"),
                ("deteriorated", "Deteriorated"),
                ("good", "Good"),
            ],
        ),
        floors: element(
            "floor",
            &[
                ("sag", "Sagging"),
                ("movement", "Movement"),
                ("damp", "Damp issues"),
                ("good", "Good"),
            ],
        ),
        windows: element(
            "window",
            &[
                ("deteriorated", "Deteriorated"),
                ("seal", "Seal failure"),
                ("frame", "Frame issues"),
                ("good", "Good"),
            ],
        ),
        doors: element(
            "door",
            &[
                ("deteriorated", "Deteriorated"),
                ("frame", "Frame issues"),
                ("security", "Security issues"),
                ("good", "Good"),
            ],
        ),
    }
}

fn defects(text: &str) -> DefectSchedule {
    let mut critical = Vec::new();
    let mut major = Vec::new();
    let mut minor = Vec::new();

    if contains_any(text, &["critical", "dangerous", "unsafe"]) {
        critical.push("Critical structural issues identified".to_string());
    }
    if contains_all(text, &["foundation", "settlement"]) {
        critical.push("Foundation settlement issues".to_string());
    }
    if contains_all(text, &["structural", "movement"]) {
        critical.push("Structural movement detected".to_string());
    }

    if contains_any(text, &["major", "significant"]) {
        major.push("Major defects requiring attention".to_string());
    }
    if contains_all(text, &["roof", "leak"]) {
        major.push("Roof leaking issues".to_string());
    }
    if contains_all(text, &["damp", "penetrating"]) {
        major.push("Penetrating damp problems".to_string());
    }

    if contains_any(text, &["minor", "cosmetic"]) {
        minor.push("Minor cosmetic issues".to_string());
    }
    if contains_any(text, &["decorative", "finish"]) {
        minor.push("Decorative finish issues".to_string());
    }

    DefectSchedule {
        critical,
        major,
        minor,
        estimated_costs: first_capture(text, &COST_PATTERN).map(|c| format!("£{c}")),
    }
}

fn compliance_issues(text: &str) -> ComplianceIssues {
    let mut building_regulations = Vec::new();
    if contains_any(text, &["building regulations", "building regs"]) {
        building_regulations.push("Building regulations compliance issues".to_string());
    }
    if contains_any(text, &["fire safety", "fire regulations"]) {
        building_regulations.push("Fire safety compliance issues".to_string());
    }

    let mut planning_permissions = Vec::new();
    if contains_any(text, &["planning permission", "planning consent"]) {
        planning_permissions.push("Planning permission issues identified".to_string());
    }
    if contains_any(text, &["unauthorised", "unauthorized"]) {
        planning_permissions.push("Unauthorised works identified".to_string());
    }

    let mut health_and_safety = Vec::new();
    if contains_any(text, &["health and safety", "h&s"]) {
        health_and_safety.push("Health and safety concerns identified".to_string());
    }
    if contains_any(text, &["asbestos", "acm"]) {
        health_and_safety.push("Asbestos-related safety issues".to_string());
    }
    if contains_all(text, &["electrical", "safety"]) {
        health_and_safety.push("Electrical safety issues".to_string());
    }

    let mut accessibility = Vec::new();
    if contains_any(text, &["accessibility", "disabled access"]) {
        accessibility.push("Accessibility compliance issues".to_string());
    }

    let mut energy_efficiency = Vec::new();
    if contains_any(text, &["energy efficiency", "epc"]) {
        energy_efficiency.push("Energy efficiency compliance issues".to_string());
    }
    if contains_any(text, &["insulation", "heating"]) {
        energy_efficiency.push("Energy performance issues".to_string());
    }

    ComplianceIssues {
        building_regulations,
        planning_permissions,
        health_and_safety,
        accessibility,
        energy_efficiency,
    }
}

/// Factor-count step function with a critical override: severity keywords
/// escalate past the three-step scale regardless of count.
fn assess_risk(text: &str) -> BuildingRisk {
    let mut factors = Vec::new();
    let mut mitigation = Vec::new();
    let mut priority_actions = Vec::new();

    let critical = contains_any(text, &["critical", "dangerous", "unsafe"]);
    if critical {
        factors.push("Critical structural issues".to_string());
        mitigation.push("Immediate structural assessment required".to_string());
        priority_actions.push("Engage structural engineer immediately".to_string());
    }
    if contains_any(text, &["major", "significant"]) {
        factors.push("Major defects identified".to_string());
    }
    if contains_all(text, &["foundation", "settlement"]) {
        factors.push("Foundation settlement".to_string());
        mitigation.push("Foundation investigation required".to_string());
        priority_actions.push("Schedule foundation survey".to_string());
    }
    if contains_all(text, &["structural", "movement"]) {
        factors.push("Structural movement".to_string());
    }
    if contains_all(text, &["roof", "leak"]) {
        factors.push("Roof leaking".to_string());
        mitigation.push("Roof repair required".to_string());
        priority_actions.push("Schedule roof repairs".to_string());
    }
    if contains_all(text, &["damp", "penetrating"]) {
        factors.push("Penetrating damp".to_string());
    }

    let overall = if critical {
        RiskLevel::High
    } else {
        tiered_risk(factors.len())
    };

    BuildingRisk {
        critical,
        overall,
        factors,
        mitigation,
        priority_actions,
    }
}

fn evidence(text: &str) -> SurveyEvidence {
    SurveyEvidence {
        has_survey: contains_any(text, &["survey", "inspection"]),
        has_structural_assessment: contains_any(text, &["structural", "foundation"]),
        has_defect_report: contains_any(text, &["defect", "issue"]),
        has_cost_estimates: contains_any(text, &["cost", "estimate", "£"]),
        has_recommendations: contains_any(text, &["recommendation", "action"]),
    }
}

fn key_dates(text: &str) -> SurveyDates {
    let dates = slash_dates(text);
    SurveyDates {
        survey_date: dates.first().cloned(),
        next_inspection: first_capture(text, &NEXT_INSPECTION_PATTERNS),
        remedial_work_deadline: dates.get(1).cloned(),
        review_date: dates.get(2).cloned(),
    }
}

fn bucket_actions(text: &str) -> SurveyActions {
    let mut actions = SurveyActions {
        immediate: Vec::new(),
        short_term: Vec::new(),
        long_term: Vec::new(),
        completed: Vec::new(),
    };

    if contains_any(text, &["critical", "dangerous"]) {
        actions
            .immediate
            .push("Address critical structural issues immediately".to_string());
    }
    if contains_all(text, &["foundation", "settlement"]) {
        actions
            .immediate
            .push("Investigate foundation issues".to_string());
    }
    if contains_any(text, &["major", "significant"]) {
        actions.short_term.push("Address major defects".to_string());
    }
    if contains_all(text, &["roof", "leak"]) {
        actions.short_term.push("Repair roof leaks".to_string());
    }
    if contains_all(text, &["damp", "penetrating"]) {
        actions.short_term.push("Address damp issues".to_string());
    }
    if contains_any(text, &["maintenance", "upkeep"]) {
        actions
            .long_term
            .push("Implement maintenance schedule".to_string());
    }
    if contains_any(text, &["improvement", "upgrade"]) {
        actions
            .long_term
            .push("Plan property improvements".to_string());
    }
    if contains_any(text, &["repairs completed", "remedied"]) {
        actions
            .completed
            .push("Previously reported defects remedied".to_string());
    }

    actions
}

fn recommendations(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    if contains_any(text, &["critical", "dangerous"]) {
        out.push("Immediate structural assessment required".to_string());
    }
    if contains_any(text, &["foundation", "settlement"]) {
        out.push("Foundation investigation recommended".to_string());
    }
    if contains_any(text, &["roof", "leak"]) {
        out.push("Roof inspection and repair recommended".to_string());
    }
    if contains_any(text, &["damp", "moisture"]) {
        out.push("Damp survey and treatment recommended".to_string());
    }
    if contains_any(text, &["maintenance", "upkeep"]) {
        out.push("Regular maintenance schedule recommended".to_string());
    }
    if contains_any(text, &["professional", "specialist"]) {
        out.push("Engage specialist contractors for complex works".to_string());
    }
    if out.is_empty() {
        out.push("Follow standard building maintenance procedures".to_string());
    }
    out
}

fn legal(text: &str) -> SurveyLegal {
    SurveyLegal {
        building_regulations: contains_any(text, &["building regulations", "building regs"]),
        planning_permissions: contains_any(text, &["planning permission", "planning consent"]),
        health_and_safety: contains_any(text, &["health and safety", "h&s"]),
        building_safety_act: contains_any(text, &["building safety", "bsa"]),
        accessibility_regulations: contains_any(text, &["accessibility", "disabled access"]),
    }
}

fn surveyor(text: &str) -> BuildingSurveyorDetails {
    let mut qualifications = Vec::new();
    if contains_any(text, &["surveyor", "inspector"]) {
        qualifications.push("Qualified building surveyor".to_string());
    }
    if contains_any(text, &["structural engineer", "engineer"]) {
        qualifications.push("Structural engineer".to_string());
    }
    if contains_any(text, &["rics", "royal institution"]) {
        qualifications.push("RICS qualified".to_string());
    }

    let mut accreditation = Vec::new();
    if contains_any(text, &["rics", "royal institution"]) {
        accreditation.push("RICS member".to_string());
    }
    if contains_any(text, &["ukas", "accreditation"]) {
        accreditation.push("UKAS accredited".to_string());
    }
    if contains_any(text, &["iso", "standard"]) {
        accreditation.push("ISO standard compliance".to_string());
    }

    BuildingSurveyorDetails {
        qualifications,
        accreditation,
    }
}

fn methodology(text: &str) -> SurveyMethodology {
    let inspection_level = if contains_any(text, &["full access", "comprehensive"]) {
        "Full access inspection"
    } else if contains_any(text, &["limited access", "restricted"]) {
        "Limited access inspection"
    } else if contains_any(text, &["visual only", "non-intrusive"]) {
        "Visual inspection only"
    } else {
        NOT_SPECIFIED
    };

    let access_provided = if contains_any(text, &["full access", "unrestricted"]) {
        "Full access provided"
    } else if contains_any(text, &["limited access", "restricted"]) {
        "Limited access provided"
    } else if contains_any(text, &["no access", "inaccessible"]) {
        "No access to certain areas"
    } else {
        "Access level not specified"
    };

    let mut limitations = Vec::new();
    if contains_any(text, &["limitation", "restriction"]) {
        limitations.push("Standard survey limitations apply".to_string());
    }
    if contains_any(text, &["inaccessible", "no access"]) {
        limitations.push("Limited access to certain areas".to_string());
    }
    if contains_any(text, &["furniture", "fittings"]) {
        limitations.push("Furniture and fittings not moved".to_string());
    }

    let mut assumptions = Vec::new();
    if contains_any(text, &["assumption", "assume"]) {
        assumptions.push("Standard survey assumptions apply".to_string());
    }
    if contains_any(text, &["planning", "permission"]) {
        assumptions.push("Planning permissions in place".to_string());
    }
    if contains_any(text, &["services", "utilities"]) {
        assumptions.push("Services and utilities functioning normally".to_string());
    }

    SurveyMethodology {
        inspection_level: inspection_level.to_string(),
        access_provided: access_provided.to_string(),
        limitations,
        assumptions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_structural_survey() {
        let text = "Full structural survey. Dangerous structural movement observed; \
                    foundation settlement cracking. Roof leak in the main elevation. \
                    Estimated remedial costs £250,000. Major defects schedule attached.";
        let report = analyze(text, "survey.pdf");

        assert_eq!(report.survey_type, BuildingSurveyType::FullStructural);
        assert_eq!(report.structure.overall, ConditionGrade::Critical);
        assert!(report.risk.critical);
        assert_eq!(report.risk.overall, RiskLevel::High);
        assert!(report
            .defects
            .critical
            .contains(&"Foundation settlement issues".to_string()));
        assert_eq!(
            report.defects.estimated_costs,
            Some("£250,000".to_string())
        );
        assert!(report.summary.contains("critical"));
    }

    #[test]
    fn test_good_condition_survey() {
        let text = "Condition survey: the building is in good condition and structurally \
                    sound. No significant defects. Roof good, walls good.";
        let report = analyze(text, "survey.pdf");

        assert_eq!(report.survey_type, BuildingSurveyType::Condition);
        assert_eq!(report.structure.overall, ConditionGrade::Good);
        assert!(!report.risk.critical);
        assert_eq!(report.structure.roof, "Good");
    }

    #[test]
    fn test_element_assessment() {
        let text = "survey noted wall cracking, roof leak, window seal failure";
        let report = analyze(text, "survey.pdf");
        assert_eq!(report.structure.walls, "Cracking");
        assert_eq!(report.structure.roof, "Leaking");
        assert_eq!(report.structure.windows, "Seal failure");
        assert_eq!(report.structure.foundation, "Not assessed");
    }

    #[test]
    fn test_survey_without_defect_record_is_partial() {
        let report = analyze("building survey of the structural frame", "s.pdf");
        assert_eq!(
            report.compliance_status,
            ComplianceStatus::PartiallyCompliant
        );
    }

    #[test]
    fn test_empty_input_degrades_to_defaults() {
        let report = analyze("", "empty.pdf");
        assert_eq!(report.survey_type, BuildingSurveyType::Unknown);
        assert_eq!(report.structure.overall, ConditionGrade::Unknown);
        assert_eq!(report.structure.foundation, "Not assessed");
        assert_eq!(report.defects.estimated_costs, None);
        assert!(!report.risk.critical);
        assert_eq!(report.risk.overall, RiskLevel::Low);
    }
}
