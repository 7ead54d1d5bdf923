//! Integration tests for the analyze_document() end-to-end pipeline.
//!
//! Each scenario feeds realistic extracted text through the full
//! classify -> route -> analyze -> normalize chain and asserts on the
//! canonical report.

use propdoc_core::analyzers::AnalyzerOutput;
use propdoc_core::model::{ComplianceStatus, DocType, RawDocument, RiskLevel};
use propdoc_core::vocab::builtin::load_builtin;
use propdoc_core::{analyze_document, analyze_document_builtin};

fn doc(filename: &str, text: &str) -> RawDocument {
    RawDocument::new(filename, text, "Please review this document")
}

// ---------------------------------------------------------------------------
// Scenario 1: unsatisfactory electrical report
// ---------------------------------------------------------------------------
#[test]
fn electrical_report_non_compliant_end_to_end() {
    let text = "ELECTRICAL INSTALLATION CONDITION REPORT (EICR)\n\
                Periodic inspection carried out to BS 7671.\n\
                Overall assessment: UNSATISFACTORY.\n\
                Remedial action required within 28 days: upgrade wiring, install rcd \
                protection. Old wiring and missing rcd observed at the consumer unit.\n\
                Next test due: 14 March 2027.";
    let report = analyze_document_builtin(&doc("block-a-eicr.pdf", text)).unwrap();

    assert_eq!(report.document_type, DocType::ElectricalInspection);
    assert!(report.classification.confidence > 50.0);
    assert_eq!(report.compliance_status, ComplianceStatus::NonCompliant);
    assert!(matches!(
        report.risk_assessment.overall,
        RiskLevel::Medium | RiskLevel::High
    ));

    let AnalyzerOutput::ElectricalInspection(ref analysis) = report.analysis else {
        panic!("expected electrical analysis");
    };
    assert!(analysis.remedial_actions.required);
    assert!(!analysis.remedial_actions.actions.is_empty());

    assert_eq!(
        report.key_dates.next_review_date,
        Some("14 march 2027".to_string())
    );
    assert!(report
        .next_steps
        .iter()
        .any(|s| s.contains("Schedule next electrical inspection before")));
    assert!(report.ai_prompt.contains("Electrical Safety Focus"));
}

// ---------------------------------------------------------------------------
// Scenario 2: clean gas safety certificate
// ---------------------------------------------------------------------------
#[test]
fn gas_certificate_compliant_end_to_end() {
    let text = "Landlord Gas Safety Record (CP12). Gas safety inspection completed.\n\
                Boiler satisfactory. Flue test: satisfactory.\n\
                Gas Safe registration: 512345. Next inspection due: 1 June 2027.";
    let report = analyze_document_builtin(&doc("cp12-2026.pdf", text)).unwrap();

    assert_eq!(report.document_type, DocType::GasSafety);
    assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
    assert_eq!(
        report.key_dates.next_review_date,
        Some("1 june 2027".to_string())
    );
    // the gas variant carries no risk section; the canonical field still
    // exists and reads unknown
    assert_eq!(report.risk_assessment.overall, RiskLevel::Unknown);
    assert!(report.risk_assessment.factors.is_empty());
}

// ---------------------------------------------------------------------------
// Scenario 3: empty input degrades to a complete default report
// ---------------------------------------------------------------------------
#[test]
fn empty_input_yields_complete_default_report() {
    let raw = RawDocument::new("", "", "");
    let report = analyze_document_builtin(&raw).unwrap();

    assert_eq!(report.document_type, DocType::Other);
    assert_eq!(report.classification.confidence, 0.0);
    assert!(report.classification.matched_keywords.is_empty());
    assert_eq!(report.compliance_status, ComplianceStatus::Unknown);
    assert_eq!(report.risk_assessment.overall, RiskLevel::Unknown);
    assert_eq!(report.key_dates.issue_date, None);
    assert!(report.key_dates.deadlines.is_empty());
    assert!(report.action_items.immediate.is_empty());
    assert!(report.legal_requirements.regulations.is_empty());
    // universal next steps still present
    assert_eq!(report.next_steps.len(), 3);
    assert!(!report.ai_prompt.is_empty());
    assert!(!report.summary.is_empty());
}

// ---------------------------------------------------------------------------
// Scenario 4: pipeline is referentially transparent
// ---------------------------------------------------------------------------
#[test]
fn identical_inputs_yield_identical_reports() {
    let text = "Fire risk assessment: medium risk. Action required within 3 months. \
                Fire alarm system tested, escape routes clear. Next review: May 2027.";
    let raw = doc("fra.pdf", text);

    let first = analyze_document_builtin(&raw).unwrap();
    let second = analyze_document_builtin(&raw).unwrap();

    let a = serde_json::to_string(&first).unwrap();
    let b = serde_json::to_string(&second).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Scenario 5: classification tag always matches the analysis tag
// ---------------------------------------------------------------------------
#[test]
fn classification_and_analysis_tags_agree() {
    let samples = [
        ("eicr.pdf", "eicr electrical installation condition report"),
        ("cp12.pdf", "gas safety certificate for the boiler"),
        ("fra.pdf", "fire risk assessment and action plan"),
        ("s20.pdf", "section 20 notice of intention, statutory consultation"),
        ("asb.pdf", "asbestos survey: acm register"),
        ("lift.pdf", "lift inspection thorough examination"),
        ("val.pdf", "insurance valuation, rebuild cost and sum insured"),
        ("bs.pdf", "building survey, structural condition report with defects"),
        ("works.pdf", "major works refurbishment project, contractor tender"),
        ("misc.pdf", "minutes of the residents meeting"),
    ];

    for (filename, text) in samples {
        let report = analyze_document_builtin(&doc(filename, text)).unwrap();
        assert_eq!(
            report.document_type,
            report.analysis.doc_type(),
            "tag mismatch for {filename}"
        );
        assert_eq!(report.document_type, report.classification.doc_type);
        assert!((0.0..=100.0).contains(&report.classification.confidence));
    }
}

// ---------------------------------------------------------------------------
// Scenario 6: lease-vs-electrical vocabulary overlap regression
// ---------------------------------------------------------------------------
#[test]
fn lease_with_electrical_covenant_classifies_as_lease() {
    let text = "Lease agreement between lessor and lessee of the demised premises for a \
                term of 125 years. Ground rent £250, service charge payable, forfeiture \
                and re-entry on breach. The landlord covenants to keep the electrical \
                installation in repair and to obtain an EICR electrical inspection \
                report periodically.";
    let report = analyze_document_builtin(&doc("lease-flat-9.pdf", text)).unwrap();

    assert_eq!(report.document_type, DocType::Lease);
    assert!(matches!(report.analysis, AnalyzerOutput::Lease(_)));
    // lease reports feed the specialized extraction brief
    assert!(report
        .ai_prompt
        .starts_with("You are a leasehold property management assistant"));
    assert!(report.ai_prompt.contains("Compliance summary (Y/N)"));
}

// ---------------------------------------------------------------------------
// Scenario 7: statutory consultation end-to-end with deadlines
// ---------------------------------------------------------------------------
#[test]
fn consultation_notice_end_to_end() {
    let text = "SECTION 20 NOTICE OF INTENTION\n\
                Statutory consultation with leaseholders on proposed roof works.\n\
                Estimated cost £96,000. Consultation runs 01/09/2026 to 30/09/2026.\n\
                Response deadline: 30/09/2026. Costs recovered through service charge.";
    let report = analyze_document_builtin(&doc("noi-roof.pdf", text)).unwrap();

    assert_eq!(report.document_type, DocType::StatutoryConsultation);
    assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
    assert_eq!(report.key_dates.issue_date, Some("01/09/2026".to_string()));
    assert!(!report.legal_requirements.regulations.is_empty());
    assert!(report
        .next_steps
        .iter()
        .any(|s| s.contains("Collate leaseholder responses")));
}

// ---------------------------------------------------------------------------
// Scenario 8: custom vocabulary profiles drive classification
// ---------------------------------------------------------------------------
#[test]
fn custom_profiles_can_replace_builtin_vocabulary() {
    let mut profiles = load_builtin().unwrap();
    // keep only the gas profile so everything else falls through to Other
    profiles.profiles.retain(|p| p.doc_type == DocType::GasSafety);

    let report = analyze_document(
        &doc("eicr.pdf", "eicr electrical installation condition report"),
        &profiles,
    );
    assert_eq!(report.document_type, DocType::Other);

    let report = analyze_document(&doc("cp12.pdf", "gas safety certificate"), &profiles);
    assert_eq!(report.document_type, DocType::GasSafety);
}

// ---------------------------------------------------------------------------
// Scenario 9: generated brief embeds the full document text verbatim
// ---------------------------------------------------------------------------
#[test]
fn brief_embeds_extracted_text_verbatim() {
    let text = "Asbestos survey. ACM identified in ceiling tile. Management plan and \
                risk assessment in place. Re-inspection: 01/03/2027.";
    let report = analyze_document_builtin(&doc("asbestos.pdf", text)).unwrap();

    assert_eq!(report.document_type, DocType::AsbestosSurvey);
    assert!(report.ai_prompt.ends_with(text));
    assert!(report.ai_prompt.contains("Asbestos Focus"));
    assert_eq!(report.extracted_text, text);
}
