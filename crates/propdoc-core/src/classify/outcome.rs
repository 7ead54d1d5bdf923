use crate::model::DocType;
use serde::{Deserialize, Serialize};

/// The classifier's verdict for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// The winning document type ([`DocType::Other`] when nothing scored).
    pub doc_type: DocType,
    /// Confidence percentage in `[0, 100]`.
    pub confidence: f64,
    /// Keywords from the winning profile found in the text.
    pub matched_keywords: Vec<String>,
    /// Phrases from the winning profile found in the text.
    pub matched_phrases: Vec<String>,
    /// Human-readable explanation of the verdict.
    pub reasoning: String,
}

impl Classification {
    /// The no-evidence default verdict.
    pub fn unclassified() -> Self {
        Classification {
            doc_type: DocType::Other,
            confidence: 0.0,
            matched_keywords: Vec::new(),
            matched_phrases: Vec::new(),
            reasoning: "No document type matched the classification vocabulary".to_string(),
        }
    }
}
