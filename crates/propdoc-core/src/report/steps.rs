//! Next-step derivation: type-conditional steps plus the universal tail.

use crate::analyzers::AnalyzerOutput;

/// Steps always appended, whatever the document type.
const UNIVERSAL_STEPS: [&str; 3] = [
    "Document all actions taken and outcomes",
    "Monitor progress and update stakeholders",
    "Schedule regular reviews to ensure ongoing compliance",
];

/// Combine variant-specific next steps with the universal tail.
pub fn next_steps(output: &AnalyzerOutput) -> Vec<String> {
    let mut steps = type_steps(output);
    steps.extend(UNIVERSAL_STEPS.iter().map(|s| s.to_string()));
    steps
}

fn type_steps(output: &AnalyzerOutput) -> Vec<String> {
    let mut steps = Vec::new();

    match output {
        AnalyzerOutput::Lease(r) => {
            if r.financials.rent_review.is_some() {
                steps.push("Diarise the rent review provisions".to_string());
            }
            if !r.risk.factors.is_empty() {
                steps.push("Review enforcement position with legal advisers".to_string());
            }
        }
        AnalyzerOutput::ElectricalInspection(r) => {
            if r.remedial_actions.required {
                steps.push(
                    "Complete required remedial actions within specified timeframe".to_string(),
                );
            }
            if let Some(due) = &r.next_test_due {
                steps.push(format!("Schedule next electrical inspection before {due}"));
            }
        }
        AnalyzerOutput::GasSafety(r) => {
            if r.appliance_checks.unsatisfactory > 0 || r.flue_tests.unsatisfactory > 0 {
                steps.push(
                    "Complete required remedial actions within specified timeframe".to_string(),
                );
            }
            if let Some(due) = &r.next_inspection_due {
                steps.push(format!("Schedule next gas safety inspection before {due}"));
            }
        }
        AnalyzerOutput::FireRiskAssessment(r) => {
            if !r.action_plan.priority1.is_empty() {
                steps.push("Implement priority 1 actions immediately".to_string());
            }
            if let Some(due) = &r.next_review_date {
                steps.push(format!("Schedule next fire risk assessment before {due}"));
            }
        }
        AnalyzerOutput::MajorWorks(r) => {
            if r.consultation.statutory_consultation {
                steps.push("Complete the statutory consultation process".to_string());
            }
            if let Some(start) = &r.timeline.start_date {
                steps.push(format!("Prepare for project start on {start}"));
            }
        }
        AnalyzerOutput::StatutoryConsultation(r) => {
            if r.leaseholder_obligations.response_required {
                steps.push("Collate leaseholder responses before the deadline".to_string());
            }
            if let Some(deadline) = &r.leaseholder_obligations.response_deadline {
                steps.push(format!("Close the consultation window on {deadline}"));
            }
        }
        AnalyzerOutput::AsbestosSurvey(r) => {
            if r.findings.acm_identified {
                steps.push("Maintain the asbestos register and management plan".to_string());
            }
            if let Some(due) = &r.management_plan.reinspection_date {
                steps.push(format!("Schedule asbestos re-inspection before {due}"));
            }
        }
        AnalyzerOutput::LiftInspection(r) => {
            if !r.results.defects.is_empty() {
                steps.push("Rectify the notified lift defects".to_string());
            }
            if let Some(due) = &r.certificate.next_examination {
                steps.push(format!("Schedule next thorough examination before {due}"));
            }
        }
        AnalyzerOutput::InsuranceValuation(r) => {
            if r.risk.factors.iter().any(|f| f.contains("Underinsured")) {
                steps.push("Adjust the sum insured to the assessed rebuild cost".to_string());
            }
            if let Some(due) = &r.key_dates.next_valuation {
                steps.push(format!("Commission the next valuation before {due}"));
            }
        }
        AnalyzerOutput::BuildingSurvey(r) => {
            if !r.defects.critical.is_empty() {
                steps.push("Commission a structural engineer for the critical defects".to_string());
            }
            if let Some(due) = &r.key_dates.next_inspection {
                steps.push(format!("Schedule the follow-up inspection before {due}"));
            }
        }
        AnalyzerOutput::Other(r) => {
            steps.extend(r.next_steps.iter().cloned());
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::route;
    use crate::model::DocType;

    #[test]
    fn test_universal_steps_always_present() {
        for doc_type in DocType::ALL {
            let output = route(doc_type)("", "");
            let steps = next_steps(&output);
            assert!(steps.len() >= 3);
            let tail: Vec<_> = steps.iter().rev().take(3).rev().collect();
            assert_eq!(tail[0], "Document all actions taken and outcomes");
            assert_eq!(tail[1], "Monitor progress and update stakeholders");
            assert_eq!(tail[2], "Schedule regular reviews to ensure ongoing compliance");
        }
    }

    #[test]
    fn test_due_date_produces_scheduling_step() {
        let output = route(DocType::ElectricalInspection)(
            "eicr satisfactory. next test due: 1 june 2029",
            "eicr.pdf",
        );
        let steps = next_steps(&output);
        assert!(steps
            .iter()
            .any(|s| s == "Schedule next electrical inspection before 1 june 2029"));
    }

    #[test]
    fn test_general_steps_pass_through() {
        let output = route(DocType::Other)("deadline: friday. review due soon", "doc.pdf");
        let steps = next_steps(&output);
        assert!(steps
            .iter()
            .any(|s| s == "Set reminders for upcoming deadlines"));
    }
}
