//! Per-field normalization of the eleven analyzer output shapes into the
//! canonical report schema.
//!
//! Each canonical field has exactly one mapping function, implemented as
//! a single exhaustive match over the output tag, so adding a variant
//! forces every mapping to be revisited at compile time.

use crate::analyzers::AnalyzerOutput;
use crate::model::RiskLevel;
use crate::report::{ActionItems, KeyDates, LegalRequirements, RiskSummary};

/// Canonical key dates from whichever date fields the variant carries.
pub fn key_dates(output: &AnalyzerOutput) -> KeyDates {
    match output {
        AnalyzerOutput::Lease(r) => KeyDates {
            issue_date: r.key_dates.commencement_date.clone(),
            expiry_date: r.key_dates.expiry_date.clone(),
            next_review_date: r.key_dates.rent_review_date.clone(),
            deadlines: Vec::new(),
        },
        AnalyzerOutput::ElectricalInspection(r) => KeyDates {
            issue_date: None,
            expiry_date: None,
            next_review_date: r.next_test_due.clone(),
            deadlines: r.remedial_actions.deadline.clone().into_iter().collect(),
        },
        AnalyzerOutput::GasSafety(r) => KeyDates {
            issue_date: None,
            expiry_date: None,
            next_review_date: r.next_inspection_due.clone(),
            deadlines: Vec::new(),
        },
        AnalyzerOutput::FireRiskAssessment(r) => KeyDates {
            issue_date: r.assessment_date.clone(),
            expiry_date: None,
            next_review_date: r.next_review_date.clone(),
            deadlines: Vec::new(),
        },
        AnalyzerOutput::MajorWorks(r) => KeyDates {
            issue_date: r.timeline.start_date.clone(),
            expiry_date: None,
            next_review_date: r.timeline.completion_date.clone(),
            deadlines: r.consultation.response_deadlines.clone(),
        },
        AnalyzerOutput::StatutoryConsultation(r) => KeyDates {
            issue_date: r.timeline.consultation_start.clone(),
            expiry_date: r.timeline.consultation_end.clone(),
            next_review_date: r.timeline.works_start.clone(),
            deadlines: r.timeline.response_deadline.clone().into_iter().collect(),
        },
        AnalyzerOutput::AsbestosSurvey(r) => KeyDates {
            issue_date: r.key_dates.survey_date.clone(),
            expiry_date: None,
            next_review_date: r.key_dates.next_inspection.clone(),
            deadlines: r.key_dates.training_due.clone().into_iter().collect(),
        },
        AnalyzerOutput::LiftInspection(r) => KeyDates {
            issue_date: r.key_dates.inspection_date.clone(),
            expiry_date: r.key_dates.certificate_expiry.clone(),
            next_review_date: r.key_dates.next_inspection.clone(),
            deadlines: r.key_dates.next_maintenance.clone().into_iter().collect(),
        },
        AnalyzerOutput::InsuranceValuation(r) => KeyDates {
            issue_date: r.key_dates.valuation_date.clone(),
            expiry_date: r.key_dates.insurance_renewal.clone(),
            next_review_date: r.key_dates.next_valuation.clone(),
            deadlines: r.key_dates.review_date.clone().into_iter().collect(),
        },
        AnalyzerOutput::BuildingSurvey(r) => KeyDates {
            issue_date: r.key_dates.survey_date.clone(),
            expiry_date: None,
            next_review_date: r.key_dates.next_inspection.clone(),
            deadlines: r
                .key_dates
                .remedial_work_deadline
                .clone()
                .into_iter()
                .collect(),
        },
        AnalyzerOutput::Other(r) => KeyDates {
            issue_date: r.key_dates.issue_date.clone(),
            expiry_date: r.key_dates.expiry_date.clone(),
            next_review_date: r.key_dates.next_review_date.clone(),
            deadlines: r.key_dates.deadlines.clone(),
        },
    }
}

/// Canonical four-bucket action items; three-bucket variants report an
/// empty completed bucket.
pub fn action_items(output: &AnalyzerOutput) -> ActionItems {
    match output {
        AnalyzerOutput::Lease(r) => ActionItems {
            immediate: r.actions.immediate.clone(),
            short_term: r.actions.short_term.clone(),
            long_term: r.actions.long_term.clone(),
            completed: Vec::new(),
        },
        AnalyzerOutput::ElectricalInspection(r) => ActionItems {
            immediate: r.actions.immediate.clone(),
            short_term: r.actions.short_term.clone(),
            long_term: r.actions.long_term.clone(),
            completed: Vec::new(),
        },
        AnalyzerOutput::GasSafety(r) => ActionItems {
            immediate: r.actions.immediate.clone(),
            short_term: r.actions.short_term.clone(),
            long_term: r.actions.long_term.clone(),
            completed: Vec::new(),
        },
        AnalyzerOutput::FireRiskAssessment(r) => ActionItems {
            immediate: r.actions.immediate.clone(),
            short_term: r.actions.short_term.clone(),
            long_term: r.actions.long_term.clone(),
            completed: r.action_plan.completed.clone(),
        },
        AnalyzerOutput::MajorWorks(r) => ActionItems {
            immediate: r.actions.immediate.clone(),
            short_term: r.actions.short_term.clone(),
            long_term: r.actions.long_term.clone(),
            completed: Vec::new(),
        },
        AnalyzerOutput::StatutoryConsultation(r) => ActionItems {
            immediate: r.actions.immediate.clone(),
            short_term: r.actions.short_term.clone(),
            long_term: r.actions.long_term.clone(),
            completed: Vec::new(),
        },
        AnalyzerOutput::AsbestosSurvey(r) => ActionItems {
            immediate: r.actions.immediate.clone(),
            short_term: r.actions.short_term.clone(),
            long_term: r.actions.long_term.clone(),
            completed: r.actions.completed.clone(),
        },
        AnalyzerOutput::LiftInspection(r) => ActionItems {
            immediate: r.actions.immediate.clone(),
            short_term: r.actions.short_term.clone(),
            long_term: r.actions.long_term.clone(),
            completed: r.actions.completed.clone(),
        },
        AnalyzerOutput::InsuranceValuation(r) => ActionItems {
            immediate: r.actions.immediate.clone(),
            short_term: r.actions.short_term.clone(),
            long_term: r.actions.long_term.clone(),
            completed: r.actions.completed.clone(),
        },
        AnalyzerOutput::BuildingSurvey(r) => ActionItems {
            immediate: r.actions.immediate.clone(),
            short_term: r.actions.short_term.clone(),
            long_term: r.actions.long_term.clone(),
            completed: r.actions.completed.clone(),
        },
        AnalyzerOutput::Other(r) => ActionItems {
            immediate: r.actions.immediate.clone(),
            short_term: r.actions.short_term.clone(),
            long_term: r.actions.long_term.clone(),
            completed: r.actions.completed.clone(),
        },
    }
}

/// Canonical risk summary. Variants without a risk section report
/// unknown; the building survey's internal critical tier clamps to high.
pub fn risk_assessment(output: &AnalyzerOutput) -> RiskSummary {
    match output {
        AnalyzerOutput::Lease(r) => RiskSummary {
            overall: r.risk.overall,
            factors: r.risk.factors.clone(),
            mitigation: r.risk.mitigation.clone(),
        },
        AnalyzerOutput::ElectricalInspection(r) => RiskSummary {
            overall: r.risk.overall,
            factors: r.risk.factors.clone(),
            mitigation: Vec::new(),
        },
        AnalyzerOutput::GasSafety(_) => RiskSummary {
            overall: RiskLevel::Unknown,
            factors: Vec::new(),
            mitigation: Vec::new(),
        },
        AnalyzerOutput::FireRiskAssessment(r) => RiskSummary {
            overall: r.risk_rating.overall,
            factors: r.risk_rating.factors.clone(),
            mitigation: Vec::new(),
        },
        AnalyzerOutput::MajorWorks(r) => RiskSummary {
            overall: r.risk.overall,
            factors: r.risk.factors.clone(),
            mitigation: r.risk.mitigation.clone(),
        },
        AnalyzerOutput::StatutoryConsultation(r) => RiskSummary {
            overall: r.risk.overall,
            factors: r.risk.factors.clone(),
            mitigation: r.risk.mitigation.clone(),
        },
        AnalyzerOutput::AsbestosSurvey(r) => RiskSummary {
            overall: r.risk.overall,
            factors: r.risk.factors.clone(),
            mitigation: r.risk.mitigation.clone(),
        },
        AnalyzerOutput::LiftInspection(r) => RiskSummary {
            overall: r.risk.overall,
            factors: r.risk.factors.clone(),
            mitigation: r.risk.mitigation.clone(),
        },
        AnalyzerOutput::InsuranceValuation(r) => RiskSummary {
            overall: r.risk.overall,
            factors: r.risk.factors.clone(),
            mitigation: r.risk.mitigation.clone(),
        },
        AnalyzerOutput::BuildingSurvey(r) => RiskSummary {
            // critical is already folded into High by the analyzer
            overall: r.risk.overall,
            factors: r.risk.factors.clone(),
            mitigation: r.risk.mitigation.clone(),
        },
        AnalyzerOutput::Other(r) => RiskSummary {
            overall: r.risk.overall,
            factors: r.risk.factors.clone(),
            mitigation: r.risk.mitigation.clone(),
        },
    }
}

/// Canonical legal requirements; flag-based variants surface the named
/// instruments their flags stand for.
pub fn legal_requirements(output: &AnalyzerOutput) -> LegalRequirements {
    fn flags(named: &[(bool, &str)]) -> Vec<String> {
        named
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    match output {
        AnalyzerOutput::Lease(r) => LegalRequirements {
            regulations: Vec::new(),
            obligations: r
                .repair_responsibilities
                .landlord
                .iter()
                .map(|item| format!("Landlord covenant: {item}"))
                .chain(
                    r.repair_responsibilities
                        .tenant
                        .iter()
                        .map(|item| format!("Tenant covenant: {item}")),
                )
                .collect(),
            penalties: if r.clauses.forfeiture {
                vec!["Forfeiture on breach of covenant".to_string()]
            } else {
                Vec::new()
            },
            deadlines: Vec::new(),
        },
        AnalyzerOutput::ElectricalInspection(r) => LegalRequirements {
            regulations: r.standards.other.clone(),
            obligations: Vec::new(),
            penalties: Vec::new(),
            deadlines: Vec::new(),
        },
        AnalyzerOutput::GasSafety(r) => LegalRequirements {
            regulations: r.compliance_notes.clone(),
            obligations: Vec::new(),
            penalties: Vec::new(),
            deadlines: Vec::new(),
        },
        AnalyzerOutput::FireRiskAssessment(_) => LegalRequirements {
            regulations: Vec::new(),
            obligations: Vec::new(),
            penalties: Vec::new(),
            deadlines: Vec::new(),
        },
        AnalyzerOutput::MajorWorks(r) => LegalRequirements {
            regulations: r.statutory.other.clone(),
            obligations: Vec::new(),
            penalties: Vec::new(),
            deadlines: r.consultation.response_deadlines.clone(),
        },
        AnalyzerOutput::StatutoryConsultation(r) => LegalRequirements {
            regulations: flags(&[
                (r.legal.landlord_tenant_act, "Landlord and Tenant Act 1985"),
                (
                    r.legal.consultation_regulations,
                    "Service Charges (Consultation Requirements) Regulations",
                ),
                (r.legal.building_safety_act, "Building Safety Act 2022"),
            ]),
            obligations: r.leaseholder_obligations.consultation_rights.clone(),
            penalties: if r.legal.cost_recovery {
                vec!["Cost recovery capped if consultation requirements are not met".to_string()]
            } else {
                Vec::new()
            },
            deadlines: r
                .leaseholder_obligations
                .response_deadline
                .clone()
                .into_iter()
                .collect(),
        },
        AnalyzerOutput::AsbestosSurvey(r) => LegalRequirements {
            regulations: flags(&[
                (
                    r.legal.control_of_asbestos_regulations,
                    "Control of Asbestos Regulations 2012",
                ),
                (
                    r.legal.health_and_safety_at_work_act,
                    "Health and Safety at Work etc. Act 1974",
                ),
                (r.legal.building_safety_act, "Building Safety Act 2022"),
                (
                    r.legal.management_regulations,
                    "Duty to manage asbestos (Regulation 4)",
                ),
            ]),
            obligations: Vec::new(),
            penalties: Vec::new(),
            deadlines: Vec::new(),
        },
        AnalyzerOutput::LiftInspection(r) => LegalRequirements {
            regulations: flags(&[
                (
                    r.legal.lifting_operations_regulations,
                    "Lifting Operations and Lifting Equipment Regulations 1998",
                ),
                (
                    r.legal.health_and_safety_at_work_act,
                    "Health and Safety at Work etc. Act 1974",
                ),
                (r.legal.building_safety_act, "Building Safety Act 2022"),
                (
                    r.legal.work_equipment_regulations,
                    "Provision and Use of Work Equipment Regulations 1998",
                ),
            ]),
            obligations: Vec::new(),
            penalties: Vec::new(),
            deadlines: Vec::new(),
        },
        AnalyzerOutput::InsuranceValuation(r) => LegalRequirements {
            regulations: flags(&[
                (r.legal.building_safety_act, "Building Safety Act 2022"),
                (r.legal.insurance_act, "Insurance Act 2015"),
                (r.legal.valuation_standards, "RICS valuation standards"),
                (
                    r.legal.professional_standards,
                    "Professional standards and codes of practice",
                ),
            ]),
            obligations: Vec::new(),
            penalties: Vec::new(),
            deadlines: Vec::new(),
        },
        AnalyzerOutput::BuildingSurvey(r) => LegalRequirements {
            regulations: flags(&[
                (r.legal.building_regulations, "Building Regulations"),
                (r.legal.planning_permissions, "Planning permission requirements"),
                (
                    r.legal.health_and_safety,
                    "Health and Safety at Work etc. Act 1974",
                ),
                (r.legal.building_safety_act, "Building Safety Act 2022"),
                (
                    r.legal.accessibility_regulations,
                    "Accessibility regulations",
                ),
            ]),
            obligations: Vec::new(),
            penalties: Vec::new(),
            deadlines: Vec::new(),
        },
        AnalyzerOutput::Other(r) => LegalRequirements {
            regulations: r.legal.regulations.clone(),
            obligations: r.legal.obligations.clone(),
            penalties: r.legal.penalties.clone(),
            deadlines: r.legal.deadlines.clone(),
        },
    }
}

/// Canonical recommendations: every variant already carries a list.
pub fn recommendations(output: &AnalyzerOutput) -> Vec<String> {
    match output {
        AnalyzerOutput::Lease(r) => r.recommendations.clone(),
        AnalyzerOutput::ElectricalInspection(r) => r.recommendations.clone(),
        AnalyzerOutput::GasSafety(r) => r.recommendations.clone(),
        AnalyzerOutput::FireRiskAssessment(r) => r.recommendations.clone(),
        AnalyzerOutput::MajorWorks(r) => r.recommendations.clone(),
        AnalyzerOutput::StatutoryConsultation(r) => r.recommendations.clone(),
        AnalyzerOutput::AsbestosSurvey(r) => r.recommendations.clone(),
        AnalyzerOutput::LiftInspection(r) => r.recommendations.clone(),
        AnalyzerOutput::InsuranceValuation(r) => r.recommendations.clone(),
        AnalyzerOutput::BuildingSurvey(r) => r.recommendations.clone(),
        AnalyzerOutput::Other(r) => r.recommendations.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::route;
    use crate::model::DocType;

    #[test]
    fn test_every_variant_normalizes_on_empty_input() {
        for doc_type in DocType::ALL {
            let output = route(doc_type)("", "");
            let _ = key_dates(&output);
            let _ = action_items(&output);
            let _ = risk_assessment(&output);
            let _ = legal_requirements(&output);
            let _ = recommendations(&output);
        }
    }

    #[test]
    fn test_electrical_deadline_reaches_canonical_dates() {
        let output = route(DocType::ElectricalInspection)(
            "unsatisfactory, remedial action required within 28 days. next test due: june 2026",
            "eicr.pdf",
        );
        let dates = key_dates(&output);
        assert_eq!(dates.next_review_date, Some("june 2026".to_string()));
        assert_eq!(dates.deadlines, vec!["28 days"]);
    }

    #[test]
    fn test_gas_risk_normalizes_to_unknown() {
        let output = route(DocType::GasSafety)("gas safety satisfactory", "cp12.pdf");
        let risk = risk_assessment(&output);
        assert_eq!(risk.overall, RiskLevel::Unknown);
        assert!(risk.factors.is_empty());
    }

    #[test]
    fn test_lift_legal_flags_become_named_instruments() {
        let output = route(DocType::LiftInspection)(
            "thorough examination under loler and puwer",
            "lift.pdf",
        );
        let legal = legal_requirements(&output);
        assert!(legal
            .regulations
            .iter()
            .any(|r| r.contains("Lifting Operations")));
        assert!(legal
            .regulations
            .iter()
            .any(|r| r.contains("Work Equipment")));
    }
}
