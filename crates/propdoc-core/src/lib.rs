pub mod analyzers;
pub mod classify;
pub mod error;
pub mod model;
pub mod report;
pub mod vocab;

use error::PropdocError;
use model::RawDocument;
use report::ComprehensiveAnalysis;
use vocab::schema::ProfileSet;

/// Main API entry point: run the full pipeline over one document.
///
/// Classifies the extracted text, routes to the matching type analyzer,
/// and normalizes the typed result into the canonical report. Pure and
/// total: any string input, including the empty string, yields a
/// structurally complete report, and identical inputs always yield an
/// identical report.
pub fn analyze_document(doc: &RawDocument, profiles: &ProfileSet) -> ComprehensiveAnalysis {
    let classification = classify::classify(&doc.extracted_text, &doc.filename, profiles);
    let analyzer = analyzers::route(classification.doc_type);
    let analysis = analyzer(&doc.extracted_text, &doc.filename);
    report::build(classification, analysis, doc)
}

/// Convenience wrapper over [`analyze_document`] using the built-in
/// vocabulary profiles. Fails only if the embedded profile data is
/// invalid, which the test suite pins.
pub fn analyze_document_builtin(doc: &RawDocument) -> Result<ComprehensiveAnalysis, PropdocError> {
    let profiles = vocab::builtin::load_builtin()?;
    Ok(analyze_document(doc, &profiles))
}
