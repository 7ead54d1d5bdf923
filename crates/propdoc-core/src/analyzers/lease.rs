//! Residential lease analyzer.
//!
//! Extracts the facts a block manager needs from a lease: parties, term,
//! financial terms, repair split, rights and restrictions, and the
//! provision checklist used for day-to-day queries.

use crate::analyzers::common::{
    checklist_status, compile_patterns, contains_any, first_capture, slash_dates, tiered_risk,
};
use crate::model::{ComplianceStatus, RiskLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseReport {
    pub summary: String,
    pub compliance_status: ComplianceStatus,
    pub parties: LeaseParties,
    pub term: LeaseTerm,
    pub financials: LeaseFinancials,
    pub repair_responsibilities: RepairResponsibilities,
    pub restrictions: RightsAndRestrictions,
    pub provisions: ProvisionChecklist,
    pub clauses: ClauseFlags,
    pub key_dates: LeaseDates,
    pub risk: LeaseRisk,
    pub recommendations: Vec<String>,
    pub actions: LeaseActions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseParties {
    pub lessor: Option<String>,
    pub lessee: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseTerm {
    pub commencement: Option<String>,
    pub expiry: Option<String>,
    pub length: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseFinancials {
    pub ground_rent: Option<String>,
    pub service_charge: Option<String>,
    pub rent_review: Option<String>,
    pub premium: Option<String>,
}

/// Which party covenants for which class of repair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairResponsibilities {
    pub landlord: Vec<String>,
    pub tenant: Vec<String>,
}

/// Consent positions for the restricted dealings and uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RightsAndRestrictions {
    pub subletting: ConsentPosition,
    pub assignment: ConsentPosition,
    pub alterations: ConsentPosition,
    pub pets: ConsentPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsentPosition {
    Permitted,
    WithConsent,
    Prohibited,
    NotAddressed,
}

/// The yes/no provision checklist a manager answers queries from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionChecklist {
    pub reserve_fund: bool,
    pub windows: bool,
    pub heating: bool,
    pub access: bool,
    pub redecoration: bool,
    pub interest_on_arrears: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseFlags {
    pub break_clause: bool,
    pub forfeiture: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseDates {
    pub commencement_date: Option<String>,
    pub expiry_date: Option<String>,
    pub rent_review_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseRisk {
    pub overall: RiskLevel,
    pub factors: Vec<String>,
    pub mitigation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseActions {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

static LESSOR_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"lessor[:\s]+([a-z][a-z ]+)",
        r"landlord[:\s]+([a-z][a-z ]+)",
    ])
});

static LESSEE_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"lessee[:\s]+([a-z][a-z ]+)",
        r"tenant[:\s]+([a-z][a-z ]+)",
    ])
});

static COMMENCEMENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"(?:commencement date|lease commencement|term commencing)[:\s]+([^.\n]+)",
        r"commencing on[:\s]*([^.\n]+)",
    ])
});

static EXPIRY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"(?:expiry date|term expiry)[:\s]+([^.\n]+)",
        r"expiring on[:\s]*([^.\n]+)",
    ])
});

static TERM_LENGTH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"term of\s+(\d+\s+years)",
        r"(\d+)\s*year lease",
        r"term[:\s]+(\d+\s+years)",
    ])
});

static GROUND_RENT_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[r"ground rent[^£\n]*£([\d][\d,]*(?:\.\d{2})?)"])
});

static SERVICE_CHARGE_PATTERN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"service charge[^£\n%]*£([\d][\d,]*(?:\.\d{2})?)",
        r"service charge[^.\n]*?([\d.]+\s*%)",
    ])
});

static RENT_REVIEW_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"rent review[:\s]+([^.\n]+)"]));

static PREMIUM_PATTERN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile_patterns(&[r"premium[^£\n]*£([\d][\d,]*)"]));

const LANDLORD_REPAIRS: &[&str] = &[
    "structure",
    "common parts",
    "roof",
    "foundations",
    "exterior",
    "main walls",
];

const TENANT_REPAIRS: &[&str] = &[
    "interior",
    "internal decorations",
    "fixtures and fittings",
    "windows and doors",
    "demised premises",
];

/// Analyze a residential lease.
pub fn analyze(text: &str, filename: &str) -> LeaseReport {
    let text = text.to_lowercase();

    LeaseReport {
        summary: summarize(&text, filename),
        compliance_status: compliance_status(&text),
        parties: parties(&text),
        term: term(&text),
        financials: financials(&text),
        repair_responsibilities: repair_responsibilities(&text),
        restrictions: restrictions(&text),
        provisions: provisions(&text),
        clauses: clauses(&text),
        key_dates: key_dates(&text),
        risk: assess_risk(&text),
        recommendations: recommendations(&text),
        actions: bucket_actions(&text),
    }
}

fn summarize(text: &str, filename: &str) -> String {
    let term = term(text);
    let financials = financials(text);
    let has_restrictions = contains_any(text, &["subletting", "assignment", "alterations"]);

    let mut summary = format!("Lease for {filename}");
    if let Some(length) = &term.length {
        summary.push_str(&format!(" granted for a term of {length}"));
    }
    if financials.ground_rent.is_some() || financials.service_charge.is_some() {
        summary.push_str(" with ground rent and service charge obligations");
    }
    if has_restrictions {
        summary.push_str(". Dealings and alterations are restricted and may require consent");
    }
    summary.push('.');

    summary
}

/// Precedence: an executed lease naming both parties with a stated term
/// is the evidence checklist for this type.
fn compliance_status(text: &str) -> ComplianceStatus {
    let has_parties = contains_any(text, &["lessor", "landlord"])
        && contains_any(text, &["lessee", "tenant"]);
    let has_term = contains_any(text, &["term of", "term:", "commencement", "years"]);
    let executed = contains_any(text, &["signed", "executed", "dated", "witnesseth"]);
    checklist_status(has_parties, has_term, executed)
}

fn parties(text: &str) -> LeaseParties {
    LeaseParties {
        lessor: first_capture(text, &LESSOR_PATTERN),
        lessee: first_capture(text, &LESSEE_PATTERN),
    }
}

fn term(text: &str) -> LeaseTerm {
    LeaseTerm {
        commencement: first_capture(text, &COMMENCEMENT_PATTERNS),
        expiry: first_capture(text, &EXPIRY_PATTERNS),
        length: first_capture(text, &TERM_LENGTH_PATTERNS),
    }
}

fn financials(text: &str) -> LeaseFinancials {
    LeaseFinancials {
        ground_rent: first_capture(text, &GROUND_RENT_PATTERN).map(|v| format!("£{v}")),
        service_charge: first_capture(text, &SERVICE_CHARGE_PATTERN),
        rent_review: first_capture(text, &RENT_REVIEW_PATTERN),
        premium: first_capture(text, &PREMIUM_PATTERN).map(|v| format!("£{v}")),
    }
}

fn repair_responsibilities(text: &str) -> RepairResponsibilities {
    let covenant_for = |party_markers: &[&str], items: &[&str]| -> Vec<String> {
        if !contains_any(text, party_markers) {
            return Vec::new();
        }
        items
            .iter()
            .filter(|item| text.contains(**item))
            .map(|item| item.to_string())
            .collect()
    };

    RepairResponsibilities {
        landlord: covenant_for(&["landlord", "lessor"], LANDLORD_REPAIRS),
        tenant: covenant_for(&["tenant", "lessee"], TENANT_REPAIRS),
    }
}

fn consent_position(text: &str, subject: &str) -> ConsentPosition {
    if !text.contains(subject) {
        return ConsentPosition::NotAddressed;
    }
    let prohibited = [
        format!("{subject} prohibited"),
        format!("no {subject}"),
        format!("{subject} is not permitted"),
        format!("shall not {subject}"),
    ];
    if prohibited.iter().any(|p| text.contains(p.as_str())) {
        return ConsentPosition::Prohibited;
    }
    if contains_any(text, &["consent", "prior written consent", "licence"]) {
        return ConsentPosition::WithConsent;
    }
    ConsentPosition::Permitted
}

fn restrictions(text: &str) -> RightsAndRestrictions {
    RightsAndRestrictions {
        subletting: consent_position(text, "subletting"),
        assignment: consent_position(text, "assignment"),
        alterations: consent_position(text, "alterations"),
        pets: consent_position(text, "pets"),
    }
}

fn provisions(text: &str) -> ProvisionChecklist {
    ProvisionChecklist {
        reserve_fund: contains_any(text, &["reserve fund", "sinking fund"]),
        windows: text.contains("window"),
        heating: contains_any(text, &["heating", "hot water"]),
        access: contains_any(text, &["right of access", "right to enter", "access"]),
        redecoration: contains_any(text, &["redecorat", "decorat"]),
        interest_on_arrears: contains_any(text, &["interest on arrears", "interest on unpaid"]),
    }
}

fn clauses(text: &str) -> ClauseFlags {
    ClauseFlags {
        break_clause: contains_any(text, &["break clause", "break option"]),
        forfeiture: contains_any(text, &["forfeiture", "re-entry"]),
    }
}

fn key_dates(text: &str) -> LeaseDates {
    let dates = slash_dates(text);
    let term = term(text);
    LeaseDates {
        commencement_date: term.commencement.or_else(|| dates.first().cloned()),
        expiry_date: term.expiry.or_else(|| dates.get(1).cloned()),
        rent_review_date: first_capture(text, &RENT_REVIEW_PATTERN),
    }
}

fn assess_risk(text: &str) -> LeaseRisk {
    let mut factors = Vec::new();
    let mut mitigation = Vec::new();

    if contains_any(text, &["arrears", "unpaid rent"]) {
        factors.push("Rent or service charge arrears".to_string());
        mitigation.push("Pursue arrears recovery procedure".to_string());
    }
    if contains_any(text, &["breach", "breach of covenant"]) {
        factors.push("Covenant breach alleged".to_string());
        mitigation.push("Obtain legal advice before enforcement".to_string());
    }
    if contains_any(text, &["forfeiture proceedings", "section 146"]) {
        factors.push("Forfeiture proceedings in contemplation".to_string());
    }
    if contains_any(text, &["dispute", "tribunal"]) {
        factors.push("Dispute or tribunal referral".to_string());
    }
    if contains_any(text, &["short term remaining", "lease extension"]) {
        factors.push("Short unexpired term".to_string());
        mitigation.push("Consider statutory lease extension".to_string());
    }

    LeaseRisk {
        overall: tiered_risk(factors.len()),
        factors,
        mitigation,
    }
}

fn recommendations(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    if contains_any(text, &["ground rent", "service charge"]) {
        out.push("Confirm demand and collection dates for ground rent and service charge".to_string());
    }
    if contains_any(text, &["rent review"]) {
        out.push("Diarise rent review dates".to_string());
    }
    if contains_any(text, &["subletting", "assignment", "alterations"]) {
        out.push("Record consent requirements for dealings and alterations".to_string());
    }
    if contains_any(text, &["reserve fund", "sinking fund"]) {
        out.push("Verify reserve fund contributions against the lease".to_string());
    }
    if contains_any(text, &["forfeiture", "breach"]) {
        out.push("Review enforcement provisions with legal advisers".to_string());
    }
    if out.is_empty() {
        out.push("Index the lease against the standard clause checklist".to_string());
    }
    out
}

fn bucket_actions(text: &str) -> LeaseActions {
    let mut actions = LeaseActions {
        immediate: Vec::new(),
        short_term: Vec::new(),
        long_term: Vec::new(),
    };

    if contains_any(text, &["arrears", "breach", "forfeiture proceedings"]) {
        actions
            .immediate
            .push("Review enforcement position on arrears or breach".to_string());
    }
    if contains_any(text, &["rent review", "commencement", "expiry"]) {
        actions
            .short_term
            .push("Record key lease dates in the property calendar".to_string());
    }
    if contains_any(text, &["consent", "licence"]) {
        actions
            .short_term
            .push("Log outstanding consent applications".to_string());
    }
    if contains_any(text, &["lease extension", "renewal"]) {
        actions
            .long_term
            .push("Plan for lease extension or renewal discussions".to_string());
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lease_extraction() {
        let text = "LEASE dated 01/06/1995. Lessor: cityhold estates limited\n\
                    Lessee: jane example\n\
                    Term of 125 years commencing on: 24 june 1995\n\
                    Ground rent of £250 per annum. Service charge: 2.5% of total \
                    expenditure. Rent review: every 25 years\n\
                    Subletting permitted only with prior written consent. No pets. \
                    Forfeiture and re-entry on breach of covenant. Reserve fund \
                    contributions apply. Interest on arrears at 4% above base. Signed.";
        let report = analyze(text, "lease.pdf");

        assert_eq!(report.compliance_status, ComplianceStatus::Compliant);
        assert_eq!(
            report.parties.lessor,
            Some("cityhold estates limited".to_string())
        );
        assert_eq!(report.parties.lessee, Some("jane example".to_string()));
        assert_eq!(report.term.length, Some("125 years".to_string()));
        assert_eq!(report.financials.ground_rent, Some("£250".to_string()));
        assert_eq!(
            report.financials.rent_review,
            Some("every 25 years".to_string())
        );
        assert_eq!(report.restrictions.subletting, ConsentPosition::WithConsent);
        assert_eq!(report.restrictions.pets, ConsentPosition::Prohibited);
        assert!(report.clauses.forfeiture);
        assert!(report.provisions.reserve_fund);
        assert!(report.provisions.interest_on_arrears);
    }

    #[test]
    fn test_restrictions_not_addressed() {
        let report = analyze("lease agreement for a term of 99 years, signed", "l.pdf");
        assert_eq!(report.restrictions.subletting, ConsentPosition::NotAddressed);
        assert_eq!(report.restrictions.pets, ConsentPosition::NotAddressed);
        assert!(!report.clauses.break_clause);
    }

    #[test]
    fn test_arrears_and_breach_raise_risk() {
        let text = "lease in arrears; breach of covenant alleged; tribunal referral made";
        let report = analyze(text, "l.pdf");
        assert_eq!(report.risk.overall, RiskLevel::High);
        assert!(!report.actions.immediate.is_empty());
    }

    #[test]
    fn test_unexecuted_draft_is_partial() {
        let text = "draft lease between landlord and tenant for a term of 99 years";
        let report = analyze(text, "l.pdf");
        assert_eq!(
            report.compliance_status,
            ComplianceStatus::PartiallyCompliant
        );
    }

    #[test]
    fn test_empty_input_degrades_to_defaults() {
        let report = analyze("", "empty.pdf");
        assert_eq!(report.parties.lessor, None);
        assert_eq!(report.term.length, None);
        assert_eq!(report.financials.ground_rent, None);
        assert_eq!(report.restrictions.subletting, ConsentPosition::NotAddressed);
        assert_eq!(report.risk.overall, RiskLevel::Low);
        assert_eq!(
            report.recommendations,
            vec!["Index the lease against the standard clause checklist"]
        );
    }
}
