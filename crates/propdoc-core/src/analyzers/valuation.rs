//! Buildings insurance valuation analyzer.

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
pub struct ValuationReport {
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub valuation_basis: ValuationBasis,
    pub property: PropertyDetails,
    pub figures: ValuationFigures,
    pub insurance_requirements: InsuranceRequirements,
    pub risk: ValuationRisk,
    pub evidence: ValuationEvidence,
    pub key_dates: ValuationDates,
    pub actions: ValuationActions,
    pub recommendations: Vec<String>,
    pub legal: ValuationLegal,
    pub valuer: ValuerDetails,
    pub methodology: Methodology,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuationBasis {
    Rebuild,
    Market,
    Reinstatement,
    Unknown,
}

impl fmt::Display for ValuationBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValuationBasis::Rebuild => "rebuild",
            ValuationBasis::Market => "market",
            ValuationBasis::Reinstatement => "reinstatement",
            ValuationBasis::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub property_type: String,
    pub address: Option<String>,
    pub construction_type: Option<String>,
    pub age: Option<String>,
    pub size: Option<String>,
    pub floors: Option<String>,
    pub units: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationFigures {
    pub rebuild_cost: Option<String>,
    pub market_value: Option<String>,
    pub sum_insured: Option<String>,
    pub percentage_change: Option<String>,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceRequirements {
    pub building_insurance: bool,
    pub contents_insurance: bool,
    pub public_liability: bool,
    pub employers_liability: bool,
    pub professional_indemnity: bool,
    pub terrorism_cover: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRisk {
    pub overall: RiskLevel,
    pub factors: Vec<String>,
    pub mitigation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationEvidence {
    pub has_valuation: bool,
    pub has_rebuild_cost: bool,
    pub has_professional_valuer: bool,
    pub has_regular_review: bool,
    pub has_documentation: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationDates {
    pub valuation_date: Option<String>,
    pub review_date: Option<String>,
    pub insurance_renewal: Option<String>,
    pub next_valuation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationActions {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub completed: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationLegal {
    pub building_safety_act: bool,
    pub insurance_act: bool,
    pub valuation_standards: bool,
    pub professional_standards: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuerDetails {
    pub qualifications: Vec<String>,
    pub accreditation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Methodology {
    pub approach: String,
    pub assumptions: Vec<String>,
    pub limitations: Vec<String>,
    pub data_sources: Vec<String>,
}

static ADDRESS_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"address[:\s]+([^.\n]+)"]));

static AGE_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(\d+)\s*years?\s*old"]));

static SIZE_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"(\d+)\s*(?:sq\s*m|square\s*metres?|sq\s*ft|square\s*feet)"])
});

static FLOORS_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(\d+)\s*(?:floors?|storeys?|levels?)"]));

static UNITS_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"(\d+)\s*(?:units?|flats?|apartments?)"]));

static REBUILD_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"rebuild[^£\n]*£([\d][\d,]*)"]));

static MARKET_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"market[^£\n]*£([\d][\d,]*)"]));

static SUM_INSURED_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"sum insured[^£\n]*£([\d][\d,]*)"]));

static PERCENTAGE_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"([+-]?\d+(?:\.\d+)?)\s*%"]));

static RENEWAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"insurance renewal[:\s]+([^.\n]+)",
        r"policy renewal[:\s]+([^.\n]+)",
        r"renewal[:\s]+([^.\n]+)",
    ])
});

static NEXT_VALUATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"next valuation[:\s]+([^.\n]+)",
        r"revaluation[:\s]+([^.\n]+)",
        r"review date[:\s]+([^.\n]+)",
    ])
});

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

/// Analyze an insurance valuation report.
pub fn analyze(text: &str, filename: &str) -> ValuationReport {
    let text = text.to_lowercase();

    ValuationReport {
        summary: summarize(&text, filename),
        compliance_status: compliance_status(&text),
        valuation_basis: valuation_basis(&text),
        property: property_details(&text),
        figures: figures(&text),
        insurance_requirements: insurance_requirements(&text),
        risk: assess_risk(&text),
        evidence: evidence(&text),
        key_dates: key_dates(&text),
        actions: bucket_actions(&text),
        recommendations: recommendations(&text),
        legal: legal(&text),
        valuer: valuer(&text),
        methodology: methodology(&text),
    }
}

fn summarize(text: &str, filename: &str) -> String {
    let basis = valuation_basis(text);
    let figures = figures(text);

    let mut summary = format!("Insurance valuation for {filename}");
    if basis != ValuationBasis::Unknown {
        summary.push_str(&format!(" - {basis} basis"));
    }
    match (&figures.rebuild_cost, &figures.sum_insured) {
        (Some(cost), _) => summary.push_str(&format!(". Declared rebuild cost £{cost}")),
        (None, Some(sum)) => summary.push_str(&format!(". Sum insured £{sum}")),
        _ => summary.push_str(". Valuation figures require review"),
    }
    summary.push('.');

    summary
}

fn valuation_basis(text: &str) -> ValuationBasis {
    if contains_any(text, &["rebuild cost", "rebuild value"]) {
        ValuationBasis::Rebuild
    } else if contains_any(text, &["market value", "market valuation"]) {
        ValuationBasis::Market
    } else if contains_any(text, &["reinstatement", "reinstatement cost"]) {
        ValuationBasis::Reinstatement
    } else {
        ValuationBasis::Unknown
    }
}

/// Precedence: valuation wording is the anchor; rebuild-cost figures and
/// professional-valuer wording are the supporting evidence.
fn compliance_status(text: &str) -> ComplianceStatus {
    let has_valuation = contains_any(text, &["valuation", "assessment"]);
    let has_rebuild_cost = contains_any(text, &["rebuild cost", "sum insured"]);
    let has_professional = contains_any(text, &["surveyor", "valuer", "professional"]);
    checklist_status(has_valuation, has_rebuild_cost, has_professional)
}

fn property_details(text: &str) -> PropertyDetails {
    let property_type = if contains_any(text, &["residential", "flat", "apartment"]) {
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

    PropertyDetails {
        property_type: property_type.to_string(),
        address: first_capture(text, &ADDRESS_PATTERN),
        construction_type,
        age: first_capture(text, &AGE_PATTERN).map(|y| format!("{y} years old")),
        size: first_capture(text, &SIZE_PATTERN).map(|s| format!("{s} sq m")),
        floors: first_capture(text, &FLOORS_PATTERN).map(|f| format!("{f} floors")),
        units: first_capture(text, &UNITS_PATTERN).map(|u| format!("{u} units")),
    }
}

fn figures(text: &str) -> ValuationFigures {
    let currency = if contains_any(text, &["€", "euro"]) {
        "EUR"
    } else if contains_any(text, &["$", "dollar"]) {
        "USD"
    } else {
        "GBP"
    };

    ValuationFigures {
        rebuild_cost: first_capture(text, &REBUILD_PATTERN),
        market_value: first_capture(text, &MARKET_PATTERN),
        sum_insured: first_capture(text, &SUM_INSURED_PATTERN),
        percentage_change: first_capture(text, &PERCENTAGE_PATTERN),
        currency: currency.to_string(),
    }
}

fn insurance_requirements(text: &str) -> InsuranceRequirements {
    InsuranceRequirements {
        building_insurance: contains_any(text, &["building insurance", "property insurance"]),
        contents_insurance: contains_any(text, &["contents insurance", "furniture insurance"]),
        public_liability: contains_any(text, &["public liability", "third party liability"]),
        employers_liability: contains_any(text, &["employers liability", "el insurance"]),
        professional_indemnity: contains_any(text, &["professional indemnity", "pi insurance"]),
        terrorism_cover: text.contains("terrorism"),
    }
}

fn assess_risk(text: &str) -> ValuationRisk {
    let mut factors = Vec::new();
    let mut mitigation = Vec::new();

    if contains_any(text, &["underinsured", "insufficient cover"]) {
        factors.push("Underinsured property".to_string());
        mitigation.push("Increase sum insured to adequate level".to_string());
    }
    if contains_any(text, &["overvalued", "excessive value"]) {
        factors.push("Overvalued property".to_string());
    }
    if contains_any(text, &["outdated", "old valuation"]) {
        factors.push("Outdated valuation".to_string());
        mitigation.push("Obtain updated professional valuation".to_string());
    }
    if contains_any(text, &["construction risk", "building risk"]) {
        factors.push("Construction-related risks".to_string());
        mitigation.push("Implement risk management measures".to_string());
    }
    if contains_any(text, &["location risk", "area risk", "flood risk"]) {
        factors.push("Location-related risks".to_string());
    }

    ValuationRisk {
        overall: tiered_risk(factors.len()),
        factors,
        mitigation,
    }
}

fn evidence(text: &str) -> ValuationEvidence {
    ValuationEvidence {
        has_valuation: contains_any(text, &["valuation", "assessment"]),
        has_rebuild_cost: contains_any(text, &["rebuild cost", "sum insured"]),
        has_professional_valuer: contains_any(text, &["surveyor", "valuer", "professional"]),
        has_regular_review: contains_any(text, &["review", "update", "annual"]),
        has_documentation: contains_any(text, &["documentation", "report", "certificate"]),
    }
}

fn key_dates(text: &str) -> ValuationDates {
    let dates = slash_dates(text);
    ValuationDates {
        valuation_date: dates.first().cloned(),
        review_date: dates.get(1).cloned(),
        insurance_renewal: first_capture(text, &RENEWAL_PATTERNS),
        next_valuation: first_capture(text, &NEXT_VALUATION_PATTERNS),
    }
}

fn bucket_actions(text: &str) -> ValuationActions {
    let mut actions = ValuationActions {
        immediate: Vec::new(),
        short_term: Vec::new(),
        long_term: Vec::new(),
        completed: Vec::new(),
    };

    if contains_any(text, &["underinsured", "insufficient"]) {
        actions
            .immediate
            .push("Review insurance coverage adequacy".to_string());
    }
    if contains_any(text, &["outdated", "old valuation"]) {
        actions.immediate.push("Schedule updated valuation".to_string());
    }
    if contains_any(text, &["review", "update"]) {
        actions
            .short_term
            .push("Review valuation methodology".to_string());
    }
    if contains_any(text, &["insurance", "coverage"]) {
        actions
            .short_term
            .push("Review insurance policy terms".to_string());
    }
    if contains_any(text, &["regular", "annual"]) {
        actions
            .long_term
            .push("Establish regular valuation schedule".to_string());
    }
    if contains_any(text, &["risk management", "mitigation"]) {
        actions
            .long_term
            .push("Implement risk management strategy".to_string());
    }

    actions
}

fn recommendations(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    if contains_any(text, &["underinsured", "insufficient"]) {
        out.push("Increase sum insured to adequate level".to_string());
    }
    if contains_any(text, &["outdated", "old valuation"]) {
        out.push("Obtain updated professional valuation".to_string());
    }
    if contains_any(text, &["review", "update"]) {
        out.push("Review valuation annually".to_string());
    }
    if contains_any(text, &["documentation", "report"]) {
        out.push("Maintain comprehensive documentation".to_string());
    }
    if contains_any(text, &["professional", "surveyor"]) {
        out.push("Use qualified professional valuers".to_string());
    }
    if out.is_empty() {
        out.push("Follow standard insurance valuation procedures".to_string());
    }
    out
}

fn legal(text: &str) -> ValuationLegal {
    ValuationLegal {
        building_safety_act: contains_any(text, &["building safety", "bsa"]),
        insurance_act: contains_any(text, &["insurance act", "insurance regulation"]),
        valuation_standards: contains_any(text, &["rics", "valuation standard"]),
        professional_standards: contains_any(text, &["professional standard", "code of practice"]),
    }
}

fn valuer(text: &str) -> ValuerDetails {
    let mut qualifications = Vec::new();
    if contains_any(text, &["surveyor", "valuer"]) {
        qualifications.push("Qualified surveyor/valuer".to_string());
    }
    if contains_any(text, &["rics", "royal institution"]) {
        qualifications.push("RICS qualified".to_string());
    }
    if contains_any(text, &["licensed", "accredited"]) {
        qualifications.push("Licensed professional".to_string());
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

    ValuerDetails {
        qualifications,
        accreditation,
    }
}

fn methodology(text: &str) -> Methodology {
    let approach = if contains_any(text, &["comparative", "market comparison"]) {
        "Comparative approach"
    } else if contains_any(text, &["replacement cost", "cost approach"]) {
        "Cost approach"
    } else if contains_any(text, &["income", "investment method"]) {
        "Income approach"
    } else if contains_any(text, &["residual", "development method"]) {
        "Residual approach"
    } else {
        NOT_SPECIFIED
    };

    let mut assumptions = Vec::new();
    if contains_any(text, &["assumption", "assume"]) {
        assumptions.push("Standard valuation assumptions apply".to_string());
    }
    if contains_any(text, &["market condition", "economic"]) {
        assumptions.push("Market conditions as at valuation date".to_string());
    }
    if contains_any(text, &["planning", "permission"]) {
        assumptions.push("Planning permissions in place".to_string());
    }

    let mut limitations = Vec::new();
    if contains_any(text, &["limitation", "restriction"]) {
        limitations.push("Standard valuation limitations apply".to_string());
    }
    if contains_any(text, &["access", "inspection"]) {
        limitations.push("Limited access during inspection".to_string());
    }

    let mut data_sources = Vec::new();
    if contains_any(text, &["market data", "comparable"]) {
        data_sources.push("Market data and comparable sales".to_string());
    }
    if contains_any(text, &["building cost", "construction cost"]) {
        data_sources.push("Building cost data".to_string());
    }
    if contains_any(text, &["survey", "inspection"]) {
        data_sources.push("Site survey and inspection".to_string());
    }

    Methodology {
        approach: approach.to_string(),
        assumptions,
        limitations,
        data_sources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_valuation() {
        let text = "Insurance valuation by RICS surveyor. Rebuild cost assessed at \
                    £4,500,000. Sum insured currently £4,000,000. Residential property, \
                    brick construction, 45 flats over 8 floors. Next valuation: 2027.";
        let report = analyze(text, "valuation.pdf");

        assert_eq!(report.valuation_basis, ValuationBasis::Rebuild);
        assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
        assert_eq!(report.figures.rebuild_cost, Some("4,500,000".to_string()));
        assert_eq!(report.figures.sum_insured, Some("4,000,000".to_string()));
        assert_eq!(report.figures.currency, "GBP");
        assert_eq!(report.property.property_type, "Residential property");
        assert_eq!(report.property.construction_type, Some("Brick".to_string()));
        assert_eq!(report.property.units, Some("45 units".to_string()));
        assert_eq!(report.key_dates.next_valuation, Some("2027".to_string()));
        assert!(report
            .valuer
            .qualifications
            .contains(&"RICS qualified".to_string()));
    }

    #[test]
    fn test_underinsured_property_risk() {
        let text = "valuation notes the building is underinsured; outdated valuation \
                    from 2015; flood risk area";
        let report = analyze(text, "valuation.pdf");

        assert_eq!(report.risk.overall, RiskLevel::High);
        assert!(report.risk.factors.contains(&"Underinsured property".to_string()));
        assert!(report
            .actions
            .immediate
            .contains(&"Review insurance coverage adequacy".to_string()));
    }

    #[test]
    fn test_valuation_without_figures_is_partial() {
        let report = analyze("valuation assessment by a professional valuer", "v.pdf");
        assert_eq!(
            report.compliance_status,
            ComplianceStatus::PartiallyCompliant
        );
    }

    #[test]
    fn test_empty_input_degrades_to_defaults() {
        let report = analyze("", "empty.pdf");
        assert_eq!(report.valuation_basis, ValuationBasis::Unknown);
        assert_eq!(report.figures.rebuild_cost, None);
        assert_eq!(report.figures.currency, "GBP");
        assert_eq!(report.property.property_type, "Commercial property");
        assert_eq!(report.methodology.approach, NOT_SPECIFIED);
        assert_eq!(report.risk.overall, RiskLevel::Low);
    }
}
