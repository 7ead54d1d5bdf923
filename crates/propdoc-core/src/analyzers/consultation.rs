//! Section 20 statutory consultation notice analyzer.

use crate::analyzers::common::{
    checklist_status, compile_patterns, contains_any, first_capture, slash_dates, tiered_risk,
    NOT_SPECIFIED,
};
use crate::model::{ComplianceStatus, RiskLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationNoticeReport {
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub stage: ConsultationStage,
    pub consultation_details: ConsultationDetails,
    pub leaseholder_obligations: LeaseholderObligations,
    pub statutory_checks: StatutoryChecks,
    pub timeline: ConsultationTimeline,
    pub cost_breakdown: CostBreakdown,
    pub contractor: NoticeContractor,
    pub risk: ConsultationRisk,
    pub recommendations: Vec<String>,
    pub actions: ConsultationActions,
    pub legal: ConsultationLegal,
}

/// The three-stage statutory consultation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsultationStage {
    Stage1,
    Stage2,
    Stage3,
    Unknown,
}

impl fmt::Display for ConsultationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConsultationStage::Stage1 => "stage 1",
            ConsultationStage::Stage2 => "stage 2",
            ConsultationStage::Stage3 => "stage 3",
            ConsultationStage::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationDetails {
    pub works_description: String,
    pub estimated_cost: Option<String>,
    pub consultation_period: ConsultationPeriod,
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationPeriod {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub response_deadline: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseholderObligations {
    pub response_required: bool,
    pub response_deadline: Option<String>,
    pub objection_rights: Vec<String>,
    pub consultation_rights: Vec<String>,
    pub cost_sharing: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatutoryChecks {
    pub consultation_period: bool,
    pub cost_threshold: bool,
    pub multiple_quotes: bool,
    pub leaseholder_response: bool,
    pub consultation_report: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationTimeline {
    pub consultation_start: Option<String>,
    pub consultation_end: Option<String>,
    pub works_start: Option<String>,
    pub works_completion: Option<String>,
    pub response_deadline: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub total_cost: Option<String>,
    pub funding_sources: Vec<String>,
    pub payment_schedule: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeContractor {
    pub qualifications: Vec<String>,
    pub insurance: Vec<String>,
    pub references: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRisk {
    pub overall: RiskLevel,
    pub factors: Vec<String>,
    pub mitigation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationActions {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationLegal {
    pub building_safety_act: bool,
    pub landlord_tenant_act: bool,
    pub consultation_regulations: bool,
    pub cost_recovery: bool,
}

static POUND_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"£([\d][\d,]*)").unwrap());

static DEADLINE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"deadline[:\s]+([^.\n]+)",
        r"response[:\s]+([^.\n]+)",
        r"reply[:\s]+([^.\n]+)",
        r"objection[:\s]+([^.\n]+)",
    ])
});

/// Analyze a statutory consultation notice.
pub fn analyze(text: &str, filename: &str) -> ConsultationNoticeReport {
    let text = text.to_lowercase();

    ConsultationNoticeReport {
        summary: summarize(&text, filename),
        compliance_status: compliance_status(&text),
        stage: stage(&text),
        consultation_details: consultation_details(&text),
        leaseholder_obligations: leaseholder_obligations(&text),
        statutory_checks: statutory_checks(&text),
        timeline: timeline(&text),
        cost_breakdown: cost_breakdown(&text),
        contractor: contractor(&text),
        risk: assess_risk(&text),
        recommendations: recommendations(&text),
        actions: bucket_actions(&text),
        legal: legal(&text),
    }
}

fn summarize(text: &str, filename: &str) -> String {
    let stage = stage(text);
    let has_costs = contains_any(text, &["cost", "£", "pound"]);
    let has_deadline = contains_any(text, &["deadline", "response", "consultation"]);

    let mut summary = format!("Statutory consultation notice for {filename}");

    if stage != ConsultationStage::Unknown {
        summary.push_str(&format!(" - {stage} consultation"));
    }
    if has_costs {
        summary.push_str(" with cost implications for leaseholders");
    }
    if has_deadline {
        summary.push_str(". Response deadline applies.");
    } else {
        summary.push('.');
    }

    summary
}

fn stage(text: &str) -> ConsultationStage {
    if contains_any(text, &["stage 1", "stage1", "first stage", "notice of intention"]) {
        ConsultationStage::Stage1
    } else if contains_any(text, &["stage 2", "stage2", "second stage", "notice of estimates"]) {
        ConsultationStage::Stage2
    } else if contains_any(text, &["stage 3", "stage3", "third stage", "notice of award"]) {
        ConsultationStage::Stage3
    } else {
        ConsultationStage::Unknown
    }
}

/// Precedence: consultation wording is the anchor; cost and deadline
/// evidence are the supporting signals.
fn compliance_status(text: &str) -> ComplianceStatus {
    let has_consultation = contains_any(text, &["consultation", "notice"]);
    let has_costs = contains_any(text, &["cost", "estimate"]);
    let has_deadline = contains_any(text, &["deadline", "response"]);
    checklist_status(has_consultation, has_costs, has_deadline)
}

fn consultation_details(text: &str) -> ConsultationDetails {
    let works_description = if contains_any(text, &["works", "project", "refurbishment"]) {
        "Major works project identified".to_string()
    } else {
        NOT_SPECIFIED.to_string()
    };

    let dates = slash_dates(text);

    let mut methods = Vec::new();
    if contains_any(text, &["post", "letter"]) {
        methods.push("Postal notification".to_string());
    }
    if contains_any(text, &["email", "electronic"]) {
        methods.push("Email notification".to_string());
    }
    if contains_any(text, &["meeting", "consultation"]) {
        methods.push("Consultation meeting".to_string());
    }
    if contains_any(text, &["display", "notice board"]) {
        methods.push("Notice board display".to_string());
    }

    ConsultationDetails {
        works_description,
        estimated_cost: POUND_AMOUNT
            .find(text)
            .map(|m| m.as_str().to_string()),
        consultation_period: ConsultationPeriod {
            start_date: dates.first().cloned(),
            end_date: dates.get(1).cloned(),
            response_deadline: dates.get(2).cloned(),
        },
        methods,
    }
}

fn leaseholder_obligations(text: &str) -> LeaseholderObligations {
    let mut objection_rights = Vec::new();
    if contains_any(text, &["object", "objection"]) {
        objection_rights.push("Right to object to works".to_string());
    }
    if contains_any(text, &["challenge", "dispute"]) {
        objection_rights.push("Right to challenge costs".to_string());
    }
    if contains_any(text, &["consultation", "meeting"]) {
        objection_rights.push("Right to consultation meeting".to_string());
    }
    if contains_any(text, &["quote", "estimate"]) {
        objection_rights.push("Right to multiple quotes".to_string());
    }

    let mut consultation_rights = Vec::new();
    if contains_any(text, &["meeting", "consultation"]) {
        consultation_rights.push("Attend consultation meetings".to_string());
    }
    if contains_any(text, &["inspect", "examine"]) {
        consultation_rights.push("Inspect documentation".to_string());
    }
    if contains_any(text, &["quote", "estimate"]) {
        consultation_rights.push("Request multiple quotes".to_string());
    }
    if contains_any(text, &["response", "reply"]) {
        consultation_rights.push("Submit formal response".to_string());
    }

    let cost_sharing = if contains_any(text, &["pro rata", "proportion"]) {
        "Costs shared proportionally between leaseholders"
    } else if contains_any(text, &["equal", "divided"]) {
        "Costs divided equally between leaseholders"
    } else if text.contains("service charge") {
        "Costs recovered through service charge"
    } else {
        "Cost sharing method not specified"
    };

    LeaseholderObligations {
        response_required: contains_any(text, &["response", "reply", "objection"]),
        response_deadline: first_capture(text, &DEADLINE_PATTERNS),
        objection_rights,
        consultation_rights,
        cost_sharing: cost_sharing.to_string(),
    }
}

fn statutory_checks(text: &str) -> StatutoryChecks {
    StatutoryChecks {
        consultation_period: contains_any(text, &["consultation", "notice period"]),
        cost_threshold: contains_any(text, &["threshold", "limit", "exceed"]),
        multiple_quotes: contains_any(text, &["quote", "estimate", "tender"]),
        leaseholder_response: contains_any(text, &["response", "reply", "objection"]),
        consultation_report: contains_any(text, &["report", "summary", "outcome"]),
    }
}

fn timeline(text: &str) -> ConsultationTimeline {
    let dates = slash_dates(text);
    ConsultationTimeline {
        consultation_start: dates.first().cloned(),
        consultation_end: dates.get(1).cloned(),
        works_start: dates.get(2).cloned(),
        works_completion: dates.get(3).cloned(),
        response_deadline: first_capture(text, &DEADLINE_PATTERNS),
    }
}

fn cost_breakdown(text: &str) -> CostBreakdown {
    let mut funding_sources = Vec::new();
    if contains_any(text, &["service charge", "reserve fund"]) {
        funding_sources.push("Service charge/reserve fund".to_string());
    }
    if contains_any(text, &["insurance", "claim"]) {
        funding_sources.push("Insurance claim".to_string());
    }
    if contains_any(text, &["grant", "funding"]) {
        funding_sources.push("Government grant".to_string());
    }
    if contains_any(text, &["loan", "finance"]) {
        funding_sources.push("Financing arrangement".to_string());
    }

    let mut payment_schedule = Vec::new();
    if contains_any(text, &["monthly", "month"]) {
        payment_schedule.push("Monthly payments".to_string());
    }
    if contains_any(text, &["quarterly", "quarter"]) {
        payment_schedule.push("Quarterly payments".to_string());
    }
    if contains_any(text, &["annually", "year"]) {
        payment_schedule.push("Annual payments".to_string());
    }
    if contains_any(text, &["lump sum", "one-off"]) {
        payment_schedule.push("Lump sum payment".to_string());
    }

    CostBreakdown {
        total_cost: POUND_AMOUNT.find(text).map(|m| m.as_str().to_string()),
        funding_sources,
        payment_schedule,
    }
}

fn contractor(text: &str) -> NoticeContractor {
    let mut qualifications = Vec::new();
    if contains_any(text, &["certified", "accredited"]) {
        qualifications.push("Certified contractor".to_string());
    }
    if contains_any(text, &["licensed", "registered"]) {
        qualifications.push("Licensed tradesperson".to_string());
    }
    if contains_any(text, &["qualified", "competent"]) {
        qualifications.push("Qualified professional".to_string());
    }

    let mut insurance = Vec::new();
    if contains_any(text, &["public liability", "liability insurance"]) {
        insurance.push("Public liability insurance".to_string());
    }
    if text.contains("employers liability") {
        insurance.push("Employers liability insurance".to_string());
    }
    if contains_any(text, &["professional indemnity", "pi insurance"]) {
        insurance.push("Professional indemnity insurance".to_string());
    }
    if contains_any(text, &["contract works", "works insurance"]) {
        insurance.push("Contract works insurance".to_string());
    }

    let mut references = Vec::new();
    if contains_any(text, &["reference", "previous work"]) {
        references.push("Previous work references".to_string());
    }
    if contains_any(text, &["testimonial", "recommendation"]) {
        references.push("Client testimonials".to_string());
    }
    if contains_any(text, &["portfolio", "examples"]) {
        references.push("Portfolio of work".to_string());
    }

    NoticeContractor {
        qualifications,
        insurance,
        references,
    }
}

fn assess_risk(text: &str) -> ConsultationRisk {
    let mut factors = Vec::new();
    let mut mitigation = Vec::new();

    if contains_any(text, &["high cost", "expensive"]) {
        factors.push("High cost implications".to_string());
        mitigation.push("Ensure multiple quotes obtained".to_string());
    }
    if contains_any(text, &["urgent", "emergency"]) {
        factors.push("Urgent works required".to_string());
        mitigation.push("Expedite consultation process".to_string());
    }
    if contains_any(text, &["disruption", "inconvenience"]) {
        factors.push("Potential disruption to residents".to_string());
        mitigation.push("Plan works to minimize disruption".to_string());
    }
    if contains_any(text, &["complex", "technical"]) {
        factors.push("Complex technical requirements".to_string());
        mitigation.push("Engage qualified specialists".to_string());
    }

    ConsultationRisk {
        overall: tiered_risk(factors.len()),
        factors,
        mitigation,
    }
}

fn recommendations(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    if contains_any(text, &["consultation", "notice"]) {
        out.push("Ensure full consultation period observed".to_string());
    }
    if contains_any(text, &["cost", "estimate"]) {
        out.push("Obtain multiple quotes for comparison".to_string());
    }
    if contains_any(text, &["deadline", "response"]) {
        out.push("Monitor response deadlines carefully".to_string());
    }
    if contains_any(text, &["contractor", "qualification"]) {
        out.push("Verify contractor qualifications and insurance".to_string());
    }
    if out.is_empty() {
        out.push("Follow the standard statutory consultation procedure".to_string());
    }
    out
}

fn bucket_actions(text: &str) -> ConsultationActions {
    let mut actions = ConsultationActions {
        immediate: Vec::new(),
        short_term: Vec::new(),
        long_term: Vec::new(),
    };

    if contains_any(text, &["deadline", "response"]) {
        actions.immediate.push("Review response deadline".to_string());
    }
    if contains_any(text, &["consultation", "notice"]) {
        actions
            .immediate
            .push("Ensure consultation period compliance".to_string());
    }
    if contains_any(text, &["quote", "estimate"]) {
        actions
            .short_term
            .push("Obtain multiple contractor quotes".to_string());
    }
    if contains_any(text, &["meeting", "consultation"]) {
        actions
            .short_term
            .push("Schedule consultation meetings".to_string());
    }
    if contains_any(text, &["works", "project"]) {
        actions.long_term.push("Monitor project progress".to_string());
    }
    if contains_any(text, &["cost", "payment"]) {
        actions
            .long_term
            .push("Plan cost recovery strategy".to_string());
    }

    actions
}

fn legal(text: &str) -> ConsultationLegal {
    ConsultationLegal {
        building_safety_act: contains_any(text, &["building safety", "fire safety", "structural"]),
        landlord_tenant_act: contains_any(text, &["leaseholder", "consultation", "notice"]),
        consultation_regulations: contains_any(
            text,
            &["consultation", "notice period", "response"],
        ),
        cost_recovery: contains_any(text, &["cost recovery", "service charge", "contribution"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_one_notice() {
        let text = "Notice of intention under section 20. Statutory consultation on \
                    proposed roof works, estimated cost £120,000. Response deadline: \
                    30 days from the date of this notice. Costs recovered through \
                    service charge.";
        let report = analyze(text, "noi.pdf");

        assert_eq!(report.stage, ConsultationStage::Stage1);
        assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
        assert_eq!(
            report.consultation_details.estimated_cost,
            Some("£120,000".to_string())
        );
        assert!(report.leaseholder_obligations.response_required);
        assert_eq!(
            report.leaseholder_obligations.cost_sharing,
            "Costs recovered through service charge"
        );
        assert!(report.summary.contains("Response deadline applies"));
    }

    #[test]
    fn test_stage_detection_order() {
        assert_eq!(analyze("stage 2 notice of estimates", "n.pdf").stage, ConsultationStage::Stage2);
        assert_eq!(analyze("notice of award issued", "n.pdf").stage, ConsultationStage::Stage3);
        assert_eq!(analyze("", "n.pdf").stage, ConsultationStage::Unknown);
    }

    #[test]
    fn test_consultation_period_from_numeric_dates() {
        let text = "consultation runs 01/04/2025 to 30/04/2025, responses by 05/05/2025";
        let report = analyze(text, "n.pdf");
        let period = &report.consultation_details.consultation_period;
        assert_eq!(period.start_date, Some("01/04/2025".to_string()));
        assert_eq!(period.end_date, Some("30/04/2025".to_string()));
        assert_eq!(period.response_deadline, Some("05/05/2025".to_string()));
    }

    #[test]
    fn test_urgent_complex_works_risk() {
        let text = "urgent emergency works, complex technical scaffolding, disruption expected";
        let report = analyze(text, "n.pdf");
        assert_eq!(report.risk.overall, RiskLevel::High);
        assert_eq!(report.risk.factors.len(), 3);
        assert_eq!(report.risk.mitigation.len(), 3);
    }

    #[test]
    fn test_empty_input_degrades_to_defaults() {
        let report = analyze("", "empty.pdf");
        assert_eq!(report.compliance_status, ComplianceStatus::NonCompliant);
        assert_eq!(report.stage, ConsultationStage::Unknown);
        assert_eq!(report.consultation_details.works_description, NOT_SPECIFIED);
        assert_eq!(report.cost_breakdown.total_cost, None);
        assert_eq!(report.risk.overall, RiskLevel::Low);
        assert_eq!(
            report.recommendations,
            vec!["Follow the standard statutory consultation procedure"]
        );
    }
}
