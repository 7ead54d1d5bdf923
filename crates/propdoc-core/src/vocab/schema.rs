use crate::model::DocType;
use serde::{Deserialize, Serialize};

/// A versioned set of classification vocabulary profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSet {
    pub name: String,
    pub version: String,
    /// Score divisor for the confidence percentage.
    pub scale: u32,
    pub profiles: Vec<TypeProfileDef>,
}

impl ProfileSet {
    /// Look up the profile for a document type, if one is defined.
    pub fn profile(&self, doc_type: DocType) -> Option<&TypeProfileDef> {
        self.profiles.iter().find(|p| p.doc_type == doc_type)
    }
}

/// Vocabulary and weights for one candidate document type.
///
/// Single-word keywords match as substrings of whitespace tokens;
/// keywords containing whitespace match against the whole text, as
/// phrases do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeProfileDef {
    pub doc_type: DocType,
    #[serde(default)]
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub phrases: Vec<String>,
    /// Required-keyword gate: every term must appear before the type is
    /// eligible for scoring at all. An empty gate always passes and earns
    /// no required bonus.
    pub required: Vec<String>,
    pub scoring: ScoringDef,
    #[serde(default)]
    pub structural: Vec<StructuralCueDef>,
}

/// Points awarded per hit class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringDef {
    pub keyword: u32,
    pub phrase: u32,
    pub required: u32,
}

/// A secondary signal distinctive of the document type.
///
/// Awards `points` when every `all_of` term is present and, if `any_of`
/// is non-empty, at least one of its terms is present too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralCueDef {
    #[serde(default)]
    pub all_of: Vec<String>,
    #[serde(default)]
    pub any_of: Vec<String>,
    pub points: u32,
}

impl StructuralCueDef {
    pub fn matches(&self, text: &str) -> bool {
        let all = self.all_of.iter().all(|t| text.contains(t.as_str()));
        let any = self.any_of.is_empty() || self.any_of.iter().any(|t| text.contains(t.as_str()));
        (!self.all_of.is_empty() || !self.any_of.is_empty()) && all && any
    }
}
