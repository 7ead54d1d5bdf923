//! Deterministic assembly of the generation brief.
//!
//! Builds the text handed to the external generative service: a
//! specialized extraction brief for leases, and a sectioned analysis
//! brief with a type-flavoured focus paragraph for everything else. The
//! core never invokes a model; the string is its final output.

use crate::analyzers::AnalyzerOutput;
use crate::model::DocType;
use crate::report::{ActionItems, KeyDates, LegalRequirements, RiskSummary};

pub struct PromptInputs<'a> {
    pub output: &'a AnalyzerOutput,
    pub filename: &'a str,
    pub original_message: &'a str,
    pub extracted_text: &'a str,
    pub key_dates: &'a KeyDates,
    pub action_items: &'a ActionItems,
    pub risk: &'a RiskSummary,
    pub legal: &'a LegalRequirements,
    pub recommendations: &'a [String],
    pub next_steps: &'a [String],
}

/// Build the generation brief for one analyzed document.
pub fn build_prompt(inputs: &PromptInputs<'_>) -> String {
    match inputs.output.doc_type() {
        DocType::Lease => lease_prompt(inputs),
        _ => generic_prompt(inputs),
    }
}

fn lease_prompt(inputs: &PromptInputs<'_>) -> String {
    format!(
        "You are a leasehold property management assistant. Analyse the following \
         residential lease and extract:\n\
         - Property details (address, term, parties)\n\
         - Financial terms (rent, review dates, service charge %)\n\
         - Repair responsibilities\n\
         - Rights and restrictions\n\
         - Clauses: subletting, assignment, alterations\n\
         - Compliance summary (Y/N): Pets / Subletting / Reserve Fund / Windows / \
         Heating / Access / Redecoration / Interest on arrears\n\
         \n\
         Lease text:\n{}\n\
         \n\
         Original Question: {}",
        inputs.extracted_text, inputs.original_message
    )
}

fn generic_prompt(inputs: &PromptInputs<'_>) -> String {
    let doc_type = inputs.output.doc_type();
    let mut prompt = format!(
        "You are analyzing a {} for a UK leasehold block management platform.\n\
         \n\
         Document: {}\n\
         Original User Question: {}\n\
         \n\
         Please provide a comprehensive analysis of this document including:\n\
         \n\
         1. DOCUMENT SUMMARY:\n   {}\n\
         \n\
         2. COMPLIANCE STATUS:\n   Overall Status: {}\n\
         \n\
         3. KEY DATES AND DEADLINES:\n   {}\n\
         \n\
         4. ACTION ITEMS REQUIRED:\n   {}\n\
         \n\
         5. RISK ASSESSMENT:\n   {}\n\
         \n\
         6. LEGAL AND REGULATORY REQUIREMENTS:\n   {}\n\
         \n\
         7. RECOMMENDATIONS:\n   {}\n\
         \n\
         8. NEXT STEPS:\n   {}\n",
        doc_type.description(),
        inputs.filename,
        inputs.original_message,
        inputs.output.summary(),
        inputs.output.compliance_status(),
        dates_section(inputs.key_dates),
        actions_section(inputs.action_items),
        risk_section(inputs.risk),
        legal_section(inputs.legal),
        list_or(inputs.recommendations, "No specific recommendations identified"),
        list_or(inputs.next_steps, "No specific next steps identified"),
    );

    if let Some(focus) = focus_section(doc_type) {
        prompt.push_str("\n");
        prompt.push_str(focus);
        prompt.push('\n');
    }

    prompt.push_str(
        "\nPlease format your response clearly with these sections and provide specific \
         details from the document where possible. Focus on UK property management \
         regulations and compliance requirements.\n\
         \n\
         Document Content:\n",
    );
    prompt.push_str(inputs.extracted_text);

    prompt
}

fn dates_section(dates: &KeyDates) -> String {
    let mut lines = Vec::new();
    if let Some(d) = &dates.issue_date {
        lines.push(format!("Issue Date: {d}"));
    }
    if let Some(d) = &dates.expiry_date {
        lines.push(format!("Expiry Date: {d}"));
    }
    if let Some(d) = &dates.next_review_date {
        lines.push(format!("Next Review: {d}"));
    }
    if !dates.deadlines.is_empty() {
        lines.push(format!("Deadlines: {}", dates.deadlines.join(", ")));
    }
    if lines.is_empty() {
        "No specific dates identified".to_string()
    } else {
        lines.join("\n   ")
    }
}

fn actions_section(actions: &ActionItems) -> String {
    let mut lines = Vec::new();
    if !actions.immediate.is_empty() {
        lines.push(format!("Immediate: {}", actions.immediate.join(", ")));
    }
    if !actions.short_term.is_empty() {
        lines.push(format!("Short Term: {}", actions.short_term.join(", ")));
    }
    if !actions.long_term.is_empty() {
        lines.push(format!("Long Term: {}", actions.long_term.join(", ")));
    }
    if !actions.completed.is_empty() {
        lines.push(format!("Completed: {}", actions.completed.join(", ")));
    }
    if lines.is_empty() {
        "No specific action items identified".to_string()
    } else {
        lines.join("\n   ")
    }
}

fn risk_section(risk: &RiskSummary) -> String {
    let mut lines = vec![format!("Overall Risk: {}", risk.overall)];
    if !risk.factors.is_empty() {
        lines.push(format!("Risk Factors: {}", risk.factors.join(", ")));
    }
    if !risk.mitigation.is_empty() {
        lines.push(format!("Mitigation: {}", risk.mitigation.join(", ")));
    }
    lines.join("\n   ")
}

fn legal_section(legal: &LegalRequirements) -> String {
    let mut lines = Vec::new();
    if !legal.regulations.is_empty() {
        lines.push(format!("Regulations: {}", legal.regulations.join(", ")));
    }
    if !legal.obligations.is_empty() {
        lines.push(format!("Obligations: {}", legal.obligations.join(", ")));
    }
    if !legal.penalties.is_empty() {
        lines.push(format!("Penalties: {}", legal.penalties.join(", ")));
    }
    if !legal.deadlines.is_empty() {
        lines.push(format!("Deadlines: {}", legal.deadlines.join(", ")));
    }
    if lines.is_empty() {
        "No specific legal requirements identified".to_string()
    } else {
        lines.join("\n   ")
    }
}

fn list_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// Type-flavoured focus paragraph appended after the shared sections.
fn focus_section(doc_type: DocType) -> Option<&'static str> {
    match doc_type {
        DocType::ElectricalInspection => Some(
            "Electrical Safety Focus: pay particular attention to the overall test \
             outcome, observed defect codes, remedial work and its deadline, and \
             whether the installation meets BS 7671 requirements.",
        ),
        DocType::GasSafety => Some(
            "Gas Safety Focus: pay particular attention to appliance and flue test \
             outcomes, the engineer's Gas Safe registration, and the statutory annual \
             inspection cycle.",
        ),
        DocType::FireRiskAssessment => Some(
            "Fire Safety Focus: pay particular attention to the assessed risk rating, \
             the prioritised action plan, escape and detection provisions, and the \
             review date.",
        ),
        DocType::MajorWorks => Some(
            "Major Works Focus: pay particular attention to project scope, costs and \
             their apportionment, the consultation position, and the works timeline.",
        ),
        DocType::StatutoryConsultation => Some(
            "Consultation Focus: pay particular attention to the consultation stage, \
             leaseholder response rights and deadlines, and the cost recovery \
             implications of the consultation requirements.",
        ),
        DocType::AsbestosSurvey => Some(
            "Asbestos Focus: pay particular attention to identified ACMs, their \
             condition and risk levels, the management plan, and re-inspection \
             obligations.",
        ),
        DocType::LiftInspection => Some(
            "Lift Safety Focus: pay particular attention to the examination outcome, \
             notified defects, certificate validity, and the six-monthly examination \
             cycle for passenger lifts.",
        ),
        DocType::InsuranceValuation => Some(
            "Insurance Focus: pay particular attention to the declared rebuild cost \
             against the current sum insured, the valuation basis, and the \
             recommended revaluation cycle.",
        ),
        DocType::BuildingSurvey => Some(
            "Structural Focus: pay particular attention to the overall condition \
             grade, critical and major defects, estimated remedial costs, and \
             recommended further investigations.",
        ),
        DocType::Lease | DocType::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::route;
    use crate::report::{ActionItems, KeyDates, LegalRequirements, RiskSummary};

    fn empty_canonical() -> (KeyDates, ActionItems, RiskSummary, LegalRequirements) {
        (
            KeyDates::default(),
            ActionItems::default(),
            RiskSummary::default(),
            LegalRequirements::default(),
        )
    }

    fn inputs_for<'a>(
        output: &'a AnalyzerOutput,
        canonical: &'a (KeyDates, ActionItems, RiskSummary, LegalRequirements),
    ) -> PromptInputs<'a> {
        PromptInputs {
            output,
            filename: "doc.pdf",
            original_message: "please review",
            extracted_text: "the document body",
            key_dates: &canonical.0,
            action_items: &canonical.1,
            risk: &canonical.2,
            legal: &canonical.3,
            recommendations: &[],
            next_steps: &[],
        }
    }

    #[test]
    fn test_lease_prompt_uses_extraction_brief() {
        let output = route(DocType::Lease)("lease agreement", "lease.pdf");
        let canonical = empty_canonical();
        let prompt = build_prompt(&inputs_for(&output, &canonical));
        assert!(prompt.starts_with("You are a leasehold property management assistant"));
        assert!(prompt.contains("Compliance summary (Y/N)"));
        assert!(prompt.contains("the document body"));
        assert!(prompt.contains("Original Question: please review"));
        assert!(!prompt.contains("1. DOCUMENT SUMMARY"));
    }

    #[test]
    fn test_generic_prompt_sections_and_focus() {
        let output =
            route(DocType::ElectricalInspection)("eicr satisfactory to bs 7671", "eicr.pdf");
        let canonical = empty_canonical();
        let prompt = build_prompt(&inputs_for(&output, &canonical));
        assert!(prompt.contains("1. DOCUMENT SUMMARY"));
        assert!(prompt.contains("8. NEXT STEPS"));
        assert!(prompt.contains("Electrical Safety Focus"));
        assert!(prompt.ends_with("the document body"));
        assert!(prompt.contains("No specific dates identified"));
    }

    #[test]
    fn test_other_type_has_no_focus_section() {
        let output = route(DocType::Other)("misc document", "doc.pdf");
        let canonical = empty_canonical();
        let prompt = build_prompt(&inputs_for(&output, &canonical));
        assert!(!prompt.contains("Focus:"));
        assert!(prompt.contains("1. DOCUMENT SUMMARY"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let output = route(DocType::GasSafety)("gas safety satisfactory", "cp12.pdf");
        let canonical = empty_canonical();
        let first = build_prompt(&inputs_for(&output, &canonical));
        let second = build_prompt(&inputs_for(&output, &canonical));
        assert_eq!(first, second);
    }
}
