use propdoc_core::classify::Classification;
use propdoc_core::error::PropdocError;
use propdoc_core::report::ComprehensiveAnalysis;

pub fn print_classification(classification: &Classification) -> Result<(), PropdocError> {
    let json = serde_json::to_string_pretty(classification)?;
    println!("{json}");
    Ok(())
}

pub fn print_report(report: &ComprehensiveAnalysis) -> Result<(), PropdocError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
