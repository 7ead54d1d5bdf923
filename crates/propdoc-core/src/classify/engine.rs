use crate::classify::outcome::Classification;
use crate::model::DocType;
use crate::vocab::schema::{ProfileSet, TypeProfileDef};
use tracing::{debug, warn};

/// Runner-up within this many points of the winner counts as a near-tie
/// and is logged with both candidates' evidence.
const NEAR_TIE_MARGIN: u32 = 2;

/// Classify a document from its extracted text and filename.
///
/// Candidate types are scored in [`DocType::PRIORITY`] order against their
/// vocabulary profiles; the strictly highest score wins, so equal scores
/// resolve to the earlier entry in the priority order. Never fails: empty
/// or unrecognizable text yields the default type with confidence 0.
pub fn classify(text: &str, filename: &str, profiles: &ProfileSet) -> Classification {
    let haystack = format!("{} {}", text, filename).to_lowercase();
    let tokens: Vec<&str> = haystack.split_whitespace().collect();

    let mut best: Option<Candidate> = None;
    let mut runner_up: Option<(DocType, u32)> = None;

    for doc_type in DocType::PRIORITY {
        let Some(profile) = profiles.profile(doc_type) else {
            continue;
        };

        let Some(candidate) = score_profile(profile, &haystack, &tokens) else {
            continue;
        };

        debug!(
            doc_type = %doc_type,
            score = candidate.score,
            keywords = candidate.matched_keywords.len(),
            phrases = candidate.matched_phrases.len(),
            "scored candidate type"
        );

        let replaces_best = best.as_ref().map_or(true, |current| candidate.score > current.score);
        if replaces_best {
            if let Some(current) = best.take() {
                runner_up = Some((current.doc_type, current.score));
            }
            best = Some(candidate);
        } else if runner_up.map_or(true, |(_, s)| candidate.score > s) {
            runner_up = Some((doc_type, candidate.score));
        }
    }

    let Some(winner) = best.filter(|c| c.score > 0) else {
        return Classification::unclassified();
    };

    if let Some((other, other_score)) = runner_up {
        if winner.score.saturating_sub(other_score) <= NEAR_TIE_MARGIN {
            warn!(
                winner = %winner.doc_type,
                winner_score = winner.score,
                runner_up = %other,
                runner_up_score = other_score,
                "ambiguous classification resolved by priority order"
            );
        }
    }

    let confidence = (winner.score as f64 / profiles.scale as f64 * 100.0).clamp(0.0, 100.0);
    let reasoning = build_reasoning(&winner);

    Classification {
        doc_type: winner.doc_type,
        confidence,
        matched_keywords: winner.matched_keywords,
        matched_phrases: winner.matched_phrases,
        reasoning,
    }
}

struct Candidate {
    doc_type: DocType,
    score: u32,
    matched_keywords: Vec<String>,
    matched_phrases: Vec<String>,
}

/// Score one profile, or `None` if its required-keyword gate fails.
fn score_profile(profile: &TypeProfileDef, haystack: &str, tokens: &[&str]) -> Option<Candidate> {
    // Required-keyword gate: every term must appear as a token substring.
    let gate_open = profile
        .required
        .iter()
        .all(|req| tokens.iter().any(|tok| tok.contains(req.as_str())));
    if !gate_open {
        return None;
    }

    let mut score = 0u32;
    let mut matched_keywords = Vec::new();
    let mut matched_phrases = Vec::new();

    for keyword in &profile.keywords {
        let hit = if keyword.contains(char::is_whitespace) {
            haystack.contains(keyword.as_str())
        } else {
            tokens.iter().any(|tok| tok.contains(keyword.as_str()))
        };
        if hit {
            score += profile.scoring.keyword;
            matched_keywords.push(keyword.clone());
        }
    }

    for phrase in &profile.phrases {
        if haystack.contains(phrase.as_str()) {
            score += profile.scoring.phrase;
            matched_phrases.push(phrase.clone());
        }
    }

    if !profile.required.is_empty() {
        score += profile.scoring.required;
    }

    for cue in &profile.structural {
        if cue.matches(haystack) {
            score += cue.points;
        }
    }

    Some(Candidate {
        doc_type: profile.doc_type,
        score,
        matched_keywords,
        matched_phrases,
    })
}

fn build_reasoning(winner: &Candidate) -> String {
    let mut reasons = Vec::new();

    if !winner.matched_keywords.is_empty() {
        reasons.push(format!(
            "Found keywords: {}",
            winner.matched_keywords.join(", ")
        ));
    }

    if !winner.matched_phrases.is_empty() {
        reasons.push(format!(
            "Found phrases: {}",
            winner.matched_phrases.join(", ")
        ));
    }

    if winner.score >= 15 {
        reasons.push("High confidence match based on multiple indicators".to_string());
    } else if winner.score >= 10 {
        reasons.push("Good confidence match with key identifiers".to_string());
    } else {
        reasons.push("Basic match with minimal indicators".to_string());
    }

    reasons.join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::builtin::load_builtin;

    fn profiles() -> ProfileSet {
        load_builtin().unwrap()
    }

    #[test]
    fn test_empty_text_is_unclassified() {
        let c = classify("", "", &profiles());
        assert_eq!(c.doc_type, DocType::Other);
        assert_eq!(c.confidence, 0.0);
        assert!(c.matched_keywords.is_empty());
        assert!(c.matched_phrases.is_empty());
    }

    #[test]
    fn test_gibberish_is_unclassified() {
        let c = classify("xyzzy plugh 42 bananas", "notes.txt", &profiles());
        assert_eq!(c.doc_type, DocType::Other);
        assert_eq!(c.confidence, 0.0);
    }

    #[test]
    fn test_electrical_report_classifies() {
        let text = "EICR electrical installation condition report. Periodic inspection \
                    to BS 7671. Test results unsatisfactory, remedial action required \
                    on circuit wiring at the consumer unit.";
        let c = classify(text, "flat-4-eicr.pdf", &profiles());
        assert_eq!(c.doc_type, DocType::ElectricalInspection);
        assert!(c.confidence > 50.0);
        assert!(c.matched_keywords.iter().any(|k| k == "eicr"));
        assert!(c
            .matched_phrases
            .iter()
            .any(|p| p == "electrical installation condition report"));
    }

    #[test]
    fn test_gas_certificate_classifies() {
        let text = "Landlord gas safety certificate CP12. All gas appliance and flue \
                    tests satisfactory. Gas Safe engineer attended. Next inspection due \
                    within 12 months.";
        let c = classify(text, "cp12.pdf", &profiles());
        assert_eq!(c.doc_type, DocType::GasSafety);
        assert!(c.confidence > 50.0);
    }

    #[test]
    fn test_filename_contributes_signal() {
        // Body alone fails the gate; the filename supplies "eicr".
        let c = classify(
            "electrical inspection condition report for the common parts wiring",
            "2024-eicr-block-a.pdf",
            &profiles(),
        );
        assert_eq!(c.doc_type, DocType::ElectricalInspection);
    }

    #[test]
    fn test_confidence_clamped_to_100() {
        let lease_text = "This lease agreement made between the lessor and the lessee \
                          demises the demised premises for a term of years at an annual \
                          rent subject to rent review with service charge and ground rent \
                          payable, with forfeiture and re-entry on breach, assignment and \
                          subletting restricted, a break clause, commencement date and \
                          expiry date stated, leasehold covenants in the schedule to the \
                          property, witnesseth whereas the tenancy agreement premium.";
        let c = classify(lease_text, "lease.pdf", &profiles());
        assert_eq!(c.doc_type, DocType::Lease);
        assert_eq!(c.confidence, 100.0);
    }

    #[test]
    fn test_reasoning_mentions_evidence() {
        let c = classify(
            "fire risk assessment with action plan, alarm and escape route review",
            "fra.pdf",
            &profiles(),
        );
        assert_eq!(c.doc_type, DocType::FireRiskAssessment);
        assert!(c.reasoning.contains("Found keywords"));
        assert!(c.reasoning.contains("fire"));
    }

    #[test]
    fn test_lease_vs_electrical_overlap_regression() {
        // Crafted overlap: lease vocabulary body with an embedded electrical
        // mention. The lease profile's heavier weights and structural cues
        // must out-score the gated electrical profile.
        let text = "Lease agreement between lessor and lessee for the demised premises, \
                    term of years, ground rent and service charge, forfeiture on breach. \
                    The landlord shall keep the electrical installation in repair and an \
                    EICR electrical inspection report shall be obtained periodically.";
        let c = classify(text, "lease-with-eicr-covenant.pdf", &profiles());
        assert_eq!(c.doc_type, DocType::Lease);
    }

    #[test]
    fn test_section20_outranks_major_works_on_tie_material() {
        let text = "Section 20 notice of intention: statutory consultation with \
                    leaseholders on proposed major works. Response deadline applies.";
        let c = classify(text, "s20-notice.pdf", &profiles());
        assert_eq!(c.doc_type, DocType::StatutoryConsultation);
    }

    #[test]
    fn test_confidence_always_in_range() {
        let samples = [
            "",
            "gas safety",
            "asbestos survey with acm register and management plan",
            "building survey structural condition report with defects",
            "lift inspection thorough examination safety certificate maintenance",
        ];
        for s in samples {
            let c = classify(s, "doc.pdf", &profiles());
            assert!((0.0..=100.0).contains(&c.confidence), "input: {s}");
        }
    }
}
