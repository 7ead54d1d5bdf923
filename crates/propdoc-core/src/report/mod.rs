//! The aggregator: normalizes any analyzer output into the canonical
//! report consumed by compliance tracking and the generation boundary.

pub mod normalize;
pub mod prompt;
pub mod steps;

use crate::analyzers::AnalyzerOutput;
use crate::classify::Classification;
use crate::model::{ComplianceStatus, DocType, RawDocument, RiskLevel};
use serde::{Deserialize, Serialize};

/// Canonical date fields shared by every report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDates {
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub next_review_date: Option<String>,
    pub deadlines: Vec<String>,
}

/// Canonical four-bucket action items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItems {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub completed: Vec<String>,
}

/// Canonical risk summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub overall: RiskLevel,
    pub factors: Vec<String>,
    pub mitigation: Vec<String>,
}

/// Canonical legal and regulatory detail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalRequirements {
    pub regulations: Vec<String>,
    pub obligations: Vec<String>,
    pub penalties: Vec<String>,
    pub deadlines: Vec<String>,
}

/// The single uniform report every pipeline run produces.
///
/// Total by construction: every field is populated for any of the eleven
/// analyzer output shapes, degrading to empty collections and `unknown`
/// enums rather than being omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveAnalysis {
    pub document_type: DocType,
    pub filename: String,
    pub classification: Classification,
    pub analysis: AnalyzerOutput,
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub key_dates: KeyDates,
    pub action_items: ActionItems,
    pub risk_assessment: RiskSummary,
    pub legal_requirements: LegalRequirements,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    pub extracted_text: String,
    pub ai_prompt: String,
}

/// Assemble the canonical report from the classification and the typed
/// analyzer output.
pub fn build(
    classification: Classification,
    analysis: AnalyzerOutput,
    doc: &RawDocument,
) -> ComprehensiveAnalysis {
    let key_dates = normalize::key_dates(&analysis);
    let action_items = normalize::action_items(&analysis);
    let risk_assessment = normalize::risk_assessment(&analysis);
    let legal_requirements = normalize::legal_requirements(&analysis);
    let recommendations = normalize::recommendations(&analysis);
    let next_steps = steps::next_steps(&analysis);

    let ai_prompt = prompt::build_prompt(&prompt::PromptInputs {
        output: &analysis,
        filename: &doc.filename,
        original_message: &doc.original_message,
        extracted_text: &doc.extracted_text,
        key_dates: &key_dates,
        action_items: &action_items,
        risk: &risk_assessment,
        legal: &legal_requirements,
        recommendations: &recommendations,
        next_steps: &next_steps,
    });

    ComprehensiveAnalysis {
        document_type: analysis.doc_type(),
        filename: doc.filename.clone(),
        summary: analysis.summary().to_string(),
        compliance_status: analysis.compliance_status(),
        classification,
        analysis,
        key_dates,
        action_items,
        risk_assessment,
        legal_requirements,
        recommendations,
        next_steps,
        extracted_text: doc.extracted_text.clone(),
        ai_prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::route;
    use crate::classify::Classification;

    fn doc(text: &str) -> RawDocument {
        RawDocument::new("doc.pdf", text, "what does this mean?")
    }

    #[test]
    fn test_build_is_total_for_every_variant() {
        for doc_type in DocType::ALL {
            let raw = doc("");
            let output = route(doc_type)(&raw.extracted_text, &raw.filename);
            let report = build(Classification::unclassified(), output, &raw);

            assert_eq!(report.document_type, doc_type);
            assert!(!report.summary.is_empty());
            assert!(!report.ai_prompt.is_empty());
            // every canonical collection exists (possibly empty) and the
            // universal next steps are always present
            assert!(report.next_steps.len() >= 3);
            let json = serde_json::to_value(&report).unwrap();
            for field in [
                "documentType",
                "classification",
                "analysis",
                "summary",
                "complianceStatus",
                "keyDates",
                "actionItems",
                "riskAssessment",
                "legalRequirements",
                "recommendations",
                "nextSteps",
                "extractedText",
                "aiPrompt",
            ] {
                assert!(!json[field].is_null(), "{field} missing for {doc_type}");
            }
        }
    }

    #[test]
    fn test_report_carries_classification_and_text() {
        let raw = doc("gas safety certificate: satisfactory");
        let output = route(DocType::GasSafety)(&raw.extracted_text, &raw.filename);
        let mut classification = Classification::unclassified();
        classification.doc_type = DocType::GasSafety;
        classification.confidence = 85.0;

        let report = build(classification, output, &raw);
        assert_eq!(report.document_type, DocType::GasSafety);
        assert_eq!(report.classification.confidence, 85.0);
        assert_eq!(report.extracted_text, raw.extracted_text);
        assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
        assert!(report.ai_prompt.contains(&raw.extracted_text));
    }
}
