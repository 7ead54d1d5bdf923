//! Major works project documentation analyzer.

use crate::analyzers::common::{
    compile_patterns, contains_any, first_capture, matched_terms, tiered_risk, NOT_SPECIFIED,
};
use crate::model::{ComplianceStatus, RiskLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorWorksReport {
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub project_scope: ProjectScope,
    pub costs: ProjectCosts,
    pub consultation: ConsultationRequirements,
    pub contractor: ContractorDetails,
    pub timeline: ProjectTimeline,
    pub statutory: StatutoryRequirements,
    pub risk: MajorWorksRisk,
    pub recommendations: Vec<String>,
    pub actions: MajorWorksActions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScope {
    pub description: String,
    pub categories: Vec<String>,
    pub locations: Vec<String>,
    pub extent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCosts {
    pub total: Option<String>,
    pub breakdown: Vec<String>,
    pub per_leaseholder: Option<String>,
    pub contingency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequirements {
    pub statutory_consultation: bool,
    pub stages: Vec<String>,
    pub leaseholder_rights: Vec<String>,
    pub response_deadlines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorDetails {
    pub name: Option<String>,
    pub company: Option<String>,
    pub qualifications: Vec<String>,
    pub insurance: Option<String>,
    pub references: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTimeline {
    pub start_date: Option<String>,
    pub completion_date: Option<String>,
    pub phases: Vec<String>,
    pub milestones: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatutoryRequirements {
    pub planning_permission: bool,
    pub building_regulations: bool,
    pub party_wall: bool,
    pub other: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorWorksRisk {
    pub overall: RiskLevel,
    pub factors: Vec<String>,
    pub mitigation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorWorksActions {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

const PROJECT_CATEGORIES: &[&str] = &[
    "roof replacement",
    "window replacement",
    "heating system",
    "electrical upgrade",
    "structural repair",
    "refurbishment",
    "maintenance",
    "renovation",
    "extension",
    "drainage",
];

const PROJECT_LOCATIONS: &[&str] = &[
    "roof",
    "windows",
    "heating",
    "electrical",
    "structural",
    "drainage",
    "common areas",
    "exterior",
    "interior",
    "grounds",
];

const COST_BREAKDOWN_ITEMS: &[&str] = &[
    "materials",
    "labour",
    "contractor",
    "professional fees",
    "planning",
    "building control",
    "insurance",
    "scaffolding",
    "waste disposal",
];

const CONSULTATION_STAGES: &[&str] = &[
    "stage 1",
    "stage 2",
    "stage 3",
    "notice of intention",
    "notice of estimates",
    "notice of award",
];

const LEASEHOLDER_RIGHTS: &[&str] = &[
    "right to comment",
    "right to nominate",
    "right to object",
    "response period",
    "consultation period",
    "deadline",
];

const CONTRACTOR_QUALIFICATIONS: &[&str] = &[
    "accredited",
    "certified",
    "licensed",
    "registered",
    "qualified",
    "experienced",
    "specialist",
];

const CONTRACTOR_REFERENCES: &[&str] = &[
    "reference",
    "previous work",
    "experience",
    "portfolio",
    "testimonial",
];

const PROJECT_PHASES: &[&str] = &[
    "phase 1",
    "phase 2",
    "phase 3",
    "planning",
    "preparation",
    "construction",
    "completion",
    "handover",
];

const PROJECT_MILESTONES: &[&str] = &["milestone", "key date", "deadline", "target", "checkpoint"];

const OTHER_STATUTORY: &[&str] = &[
    "listed building consent",
    "conservation area",
    "tree preservation",
    "environmental impact",
    "health and safety",
    "fire safety",
];

const RISK_FACTORS: &[&str] = &[
    "structural work",
    "complex project",
    "multiple phases",
    "tight timeline",
    "budget constraints",
    "access issues",
    "weather dependent",
    "disruption to residents",
    "coordination challenges",
];

const MITIGATION_MEASURES: &[&str] = &[
    "planning",
    "risk assessment",
    "method statement",
    "insurance",
    "contingency",
    "professional supervision",
    "quality control",
    "communication plan",
];

const RECOMMENDATIONS: &[&str] = &[
    "professional advice",
    "detailed planning",
    "risk assessment",
    "method statement",
    "quality control",
    "communication plan",
    "resident consultation",
    "timeline management",
    "budget control",
];

static DESCRIPTION_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(?:scope of works|scope|description)[:\s]+([^.\n]+)"]));

static EXTENT_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(?:extent|scale)[:\s]+([^.\n]+)"]));

static TOTAL_COST_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:total cost|budget|estimate)[:\s]*£?([0-9][0-9,]*)"])
});

static PER_LEASEHOLDER_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:per leaseholder|per unit|per flat)[:\s]*£?([0-9][0-9,]*)"])
});

static CONTINGENCY_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(?:contingency|allowance)[:\s]*£?([0-9][0-9,]*)"]));

static RESPONSE_DEADLINE_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:response|comment|objection)\s+deadline[:\s]+([^.\n]+)"])
});

static CONTRACTOR_NAME_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(?:contractor|builder)[:\s]+([a-z][a-z ]+)"]));

static COMPANY_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:company|firm|organisation)[:\s]+([a-z][a-z ]+)"])
});

static INSURANCE_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(?:insurance|public liability)[:\s]+([^.\n]+)"])
});

static START_DATE_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(?:start|commence|begin)[:\s]+([^.\n]+)"]));

static COMPLETION_DATE_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(?:completion|finish)[:\s]+([^.\n]+)"]));

/// Analyze major works project documentation.
pub fn analyze(text: &str, filename: &str) -> MajorWorksReport {
    let text = text.to_lowercase();

    MajorWorksReport {
        summary: summarize(&text, filename),
        compliance_status: compliance_status(&text),
        project_scope: project_scope(&text),
        costs: costs(&text),
        consultation: consultation(&text),
        contractor: contractor(&text),
        timeline: timeline(&text),
        statutory: statutory(&text),
        risk: assess_risk(&text),
        recommendations: matched_terms(&text, RECOMMENDATIONS),
        actions: bucket_actions(&text),
    }
}

fn summarize(text: &str, filename: &str) -> String {
    let has_consultation = contains_any(text, &["section 20", "consultation"]);
    let has_costs = contains_any(text, &["cost", "budget", "estimate"]);
    let has_contractor = contains_any(text, &["contractor", "builder", "company"]);

    if has_consultation && has_costs {
        format!(
            "Major works project for {filename} includes statutory consultation \
             requirements and cost estimates. Full consultation process must be followed."
        )
    } else if has_costs {
        format!(
            "Major works project for {filename} includes cost estimates and project \
             scope. Review required to determine consultation requirements."
        )
    } else if has_contractor {
        format!(
            "Major works project for {filename} includes contractor details and project \
             specifications. Cost analysis and consultation planning required."
        )
    } else {
        format!(
            "Major works project for {filename} has been identified. Full project \
             analysis required to determine scope, costs, and consultation requirements."
        )
    }
}

/// Precedence: evidence of the statutory consultation running alongside
/// the works means compliant; works with no consultation evidence at all
/// means non-compliant; consultation or costing evidence alone means
/// partially compliant.
fn compliance_status(text: &str) -> ComplianceStatus {
    let has_section20 = text.contains("section 20");
    let has_consultation = text.contains("consultation");
    let has_works = text.contains("major works");

    if has_section20 && has_consultation {
        ComplianceStatus::Compliant
    } else if has_works && !has_section20 && !has_consultation {
        ComplianceStatus::NonCompliant
    } else if has_consultation || text.contains("cost estimate") {
        ComplianceStatus::PartiallyCompliant
    } else {
        ComplianceStatus::Unknown
    }
}

fn project_scope(text: &str) -> ProjectScope {
    ProjectScope {
        description: first_capture(text, &DESCRIPTION_PATTERN)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        categories: matched_terms(text, PROJECT_CATEGORIES),
        locations: matched_terms(text, PROJECT_LOCATIONS),
        extent: first_capture(text, &EXTENT_PATTERN).unwrap_or_else(|| NOT_SPECIFIED.to_string()),
    }
}

fn costs(text: &str) -> ProjectCosts {
    let breakdown = COST_BREAKDOWN_ITEMS
        .iter()
        .filter(|item| text.contains(**item) && text.contains("cost"))
        .map(|item| item.to_string())
        .collect();

    ProjectCosts {
        total: first_capture(text, &TOTAL_COST_PATTERN).map(|v| format!("£{v}")),
        breakdown,
        per_leaseholder: first_capture(text, &PER_LEASEHOLDER_PATTERN).map(|v| format!("£{v}")),
        contingency: first_capture(text, &CONTINGENCY_PATTERN).map(|v| format!("£{v}")),
    }
}

fn consultation(text: &str) -> ConsultationRequirements {
    ConsultationRequirements {
        statutory_consultation: contains_any(text, &["section 20", "statutory consultation"]),
        stages: matched_terms(text, CONSULTATION_STAGES),
        leaseholder_rights: matched_terms(text, LEASEHOLDER_RIGHTS),
        response_deadlines: crate::analyzers::common::all_captures(
            text,
            &RESPONSE_DEADLINE_PATTERN,
        ),
    }
}

fn contractor(text: &str) -> ContractorDetails {
    ContractorDetails {
        name: first_capture(text, &CONTRACTOR_NAME_PATTERN),
        company: first_capture(text, &COMPANY_PATTERN),
        qualifications: matched_terms(text, CONTRACTOR_QUALIFICATIONS),
        insurance: first_capture(text, &INSURANCE_PATTERN),
        references: matched_terms(text, CONTRACTOR_REFERENCES),
    }
}

fn timeline(text: &str) -> ProjectTimeline {
    ProjectTimeline {
        start_date: first_capture(text, &START_DATE_PATTERN),
        completion_date: first_capture(text, &COMPLETION_DATE_PATTERN),
        phases: matched_terms(text, PROJECT_PHASES),
        milestones: matched_terms(text, PROJECT_MILESTONES),
    }
}

fn statutory(text: &str) -> StatutoryRequirements {
    StatutoryRequirements {
        planning_permission: contains_any(text, &["planning permission", "planning consent"]),
        building_regulations: contains_any(text, &["building regulations", "building control"]),
        party_wall: text.contains("party wall"),
        other: matched_terms(text, OTHER_STATUTORY),
    }
}

/// A stated rating wins; otherwise the factor-count step function applies.
fn assess_risk(text: &str) -> MajorWorksRisk {
    let factors = matched_terms(text, RISK_FACTORS);

    let overall = if contains_any(text, &["high risk", "complex", "structural"]) {
        RiskLevel::High
    } else if contains_any(text, &["medium risk", "moderate"]) {
        RiskLevel::Medium
    } else if contains_any(text, &["low risk", "simple"]) {
        RiskLevel::Low
    } else if !factors.is_empty() {
        tiered_risk(factors.len())
    } else {
        RiskLevel::Unknown
    };

    MajorWorksRisk {
        overall,
        factors,
        mitigation: matched_terms(text, MITIGATION_MEASURES),
    }
}

fn bucket_actions(text: &str) -> MajorWorksActions {
    let mut actions = MajorWorksActions {
        immediate: Vec::new(),
        short_term: Vec::new(),
        long_term: Vec::new(),
    };

    if contains_any(text, &["urgent", "immediate", "critical"]) {
        actions
            .immediate
            .push("Address critical project issues immediately".to_string());
    }
    if contains_any(text, &["planning", "consultation", "section 20"]) {
        actions
            .short_term
            .push("Complete planning and consultation requirements".to_string());
    }
    if contains_any(text, &["contractor", "tender", "procurement"]) {
        actions
            .short_term
            .push("Complete contractor selection and procurement".to_string());
    }
    if contains_any(text, &["implementation", "construction", "work"]) {
        actions
            .long_term
            .push("Implement major works project".to_string());
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consulted_project_is_compliant() {
        let text = "Major works: roof replacement. Section 20 consultation in progress, \
                    notice of intention served. Total cost: £85,000. Contingency: £8,500. \
                    Per leaseholder: £2,400.";
        let report = analyze(text, "roof.pdf");

        assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
        assert!(report.consultation.statutory_consultation);
        assert!(report
            .consultation
            .stages
            .contains(&"notice of intention".to_string()));
        assert_eq!(report.costs.total, Some("£85,000".to_string()));
        assert_eq!(report.costs.per_leaseholder, Some("£2,400".to_string()));
        assert_eq!(report.costs.contingency, Some("£8,500".to_string()));
        assert!(report
            .project_scope
            .categories
            .contains(&"roof replacement".to_string()));
    }

    #[test]
    fn test_unconsulted_works_non_compliant() {
        let report = analyze("major works to the lift motor room planned", "works.pdf");
        assert_eq!(report.compliance_status, ComplianceStatus::NonCompliant);
    }

    #[test]
    fn test_structural_work_is_high_risk() {
        let text = "structural work to the facade, complex project with multiple phases";
        let report = analyze(text, "works.pdf");
        assert_eq!(report.risk.overall, RiskLevel::High);
        assert!(report.risk.factors.contains(&"structural work".to_string()));
    }

    #[test]
    fn test_timeline_extraction() {
        let text = "Works start: 1 march 2025\ncompletion: 30 september 2025\n\
                    phase 1 preparation, phase 2 construction";
        let report = analyze(text, "works.pdf");
        assert_eq!(report.timeline.start_date, Some("1 march 2025".to_string()));
        assert_eq!(
            report.timeline.completion_date,
            Some("30 september 2025".to_string())
        );
        assert!(report.timeline.phases.contains(&"phase 1".to_string()));
    }

    #[test]
    fn test_empty_input_degrades_to_defaults() {
        let report = analyze("", "empty.pdf");
        assert_eq!(report.compliance_status, ComplianceStatus::Unknown);
        assert_eq!(report.project_scope.description, NOT_SPECIFIED);
        assert_eq!(report.costs.total, None);
        assert!(report.consultation.stages.is_empty());
        assert_eq!(report.risk.overall, RiskLevel::Unknown);
    }
}
