use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of document categories the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocType {
    Lease,
    ElectricalInspection,
    GasSafety,
    FireRiskAssessment,
    MajorWorks,
    StatutoryConsultation,
    AsbestosSurvey,
    LiftInspection,
    InsuranceValuation,
    BuildingSurvey,
    Other,
}

impl DocType {
    /// Every member of the closed set, default type last.
    pub const ALL: [DocType; 11] = [
        DocType::Lease,
        DocType::ElectricalInspection,
        DocType::GasSafety,
        DocType::FireRiskAssessment,
        DocType::MajorWorks,
        DocType::StatutoryConsultation,
        DocType::AsbestosSurvey,
        DocType::LiftInspection,
        DocType::InsuranceValuation,
        DocType::BuildingSurvey,
        DocType::Other,
    ];

    /// Tie-break order for classification. Candidates are scored in this
    /// order and only a strictly greater score replaces the current best,
    /// so equal scores resolve to the earlier entry. Specific statutory
    /// and compliance instruments come first; the lease profile has no
    /// required-keyword gate and overlaps the whole domain vocabulary, so
    /// it is scored last.
    pub const PRIORITY: [DocType; 10] = [
        DocType::StatutoryConsultation,
        DocType::ElectricalInspection,
        DocType::GasSafety,
        DocType::FireRiskAssessment,
        DocType::AsbestosSurvey,
        DocType::LiftInspection,
        DocType::InsuranceValuation,
        DocType::BuildingSurvey,
        DocType::MajorWorks,
        DocType::Lease,
    ];

    /// Wire/display name, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Lease => "lease",
            DocType::ElectricalInspection => "electrical-inspection",
            DocType::GasSafety => "gas-safety",
            DocType::FireRiskAssessment => "fire-risk-assessment",
            DocType::MajorWorks => "major-works",
            DocType::StatutoryConsultation => "statutory-consultation",
            DocType::AsbestosSurvey => "asbestos-survey",
            DocType::LiftInspection => "lift-inspection",
            DocType::InsuranceValuation => "insurance-valuation",
            DocType::BuildingSurvey => "building-survey",
            DocType::Other => "other",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<DocType> {
        let lower = s.trim().to_lowercase();
        DocType::ALL.into_iter().find(|t| t.as_str() == lower)
    }

    /// Human-readable description of the document category.
    pub fn description(&self) -> &'static str {
        match self {
            DocType::Lease => {
                "Lease Agreement - Legal document defining leaseholder rights and obligations"
            }
            DocType::ElectricalInspection => {
                "Electrical Installation Condition Report - Electrical safety inspection report"
            }
            DocType::GasSafety => "Gas Safety Certificate - Annual gas appliance safety inspection",
            DocType::FireRiskAssessment => {
                "Fire Risk Assessment - Fire safety evaluation and action plan"
            }
            DocType::MajorWorks => {
                "Major Works - Significant building works or refurbishment project"
            }
            DocType::StatutoryConsultation => {
                "Statutory Consultation Notice - Section 20 consultation for major works"
            }
            DocType::AsbestosSurvey => {
                "Asbestos Survey - Asbestos material identification and management"
            }
            DocType::LiftInspection => {
                "Lift Inspection - Lift safety and maintenance certification"
            }
            DocType::InsuranceValuation => {
                "Insurance Valuation - Property rebuild cost assessment"
            }
            DocType::BuildingSurvey => {
                "Building Survey - Structural condition and defect assessment"
            }
            DocType::Other => "Other Document - General property management document",
        }
    }

    /// Typical review cadence for documents of this category.
    pub fn review_frequency(&self) -> &'static str {
        match self {
            DocType::Lease => "As needed (when terms change)",
            DocType::ElectricalInspection => "Every 5 years (or as specified)",
            DocType::GasSafety => "Annually",
            DocType::FireRiskAssessment => "Annually",
            DocType::MajorWorks => "As needed (per project)",
            DocType::StatutoryConsultation => "As needed (per consultation)",
            DocType::AsbestosSurvey => "Every 12 months",
            DocType::LiftInspection => "Every 6 months",
            DocType::InsuranceValuation => "Every 3-5 years",
            DocType::BuildingSurvey => "As needed (when issues arise)",
            DocType::Other => "Varies",
        }
    }

    /// True for the inspection categories tracked on a compliance calendar.
    pub fn requires_compliance_action(&self) -> bool {
        matches!(
            self,
            DocType::ElectricalInspection
                | DocType::GasSafety
                | DocType::FireRiskAssessment
                | DocType::AsbestosSurvey
                | DocType::LiftInspection
        )
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Judgment of whether a document or asset satisfies its regulatory regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    PartiallyCompliant,
    #[default]
    Unknown,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::NonCompliant => "non-compliant",
            ComplianceStatus::PartiallyCompliant => "partially-compliant",
            ComplianceStatus::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Canonical three-tier risk scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// One uploaded document as received from the text-extraction boundary.
/// Created once per upload and never mutated by the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub filename: String,
    pub extracted_text: String,
    pub original_message: String,
}

impl RawDocument {
    pub fn new(
        filename: impl Into<String>,
        extracted_text: impl Into<String>,
        original_message: impl Into<String>,
    ) -> Self {
        RawDocument {
            filename: filename.into(),
            extracted_text: extracted_text.into(),
            original_message: original_message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_type_once() {
        let mut seen = std::collections::HashSet::new();
        for t in DocType::ALL {
            assert!(seen.insert(t.as_str()));
        }
        assert_eq!(seen.len(), 11);
    }

    #[test]
    fn test_priority_excludes_default() {
        assert!(!DocType::PRIORITY.contains(&DocType::Other));
        assert_eq!(DocType::PRIORITY.len(), 10);
    }

    #[test]
    fn test_from_str_loose_roundtrip() {
        for t in DocType::ALL {
            assert_eq!(DocType::from_str_loose(t.as_str()), Some(t));
        }
        assert_eq!(DocType::from_str_loose("  Lease "), Some(DocType::Lease));
        assert_eq!(DocType::from_str_loose("unknown-kind"), None);
    }

    #[test]
    fn test_compliance_tracked_types() {
        assert!(DocType::GasSafety.requires_compliance_action());
        assert!(!DocType::Lease.requires_compliance_action());
        assert!(!DocType::Other.requires_compliance_action());
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_string(&DocType::ElectricalInspection).unwrap();
        assert_eq!(json, "\"electrical-inspection\"");
        let back: DocType = serde_json::from_str("\"gas-safety\"").unwrap();
        assert_eq!(back, DocType::GasSafety);
    }
}
