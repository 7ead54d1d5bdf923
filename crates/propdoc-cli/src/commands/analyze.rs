use propdoc_core::analyze_document;
use propdoc_core::error::PropdocError;
use propdoc_core::model::RawDocument;
use std::path::PathBuf;

use crate::commands::{load_profiles, read_input};
use crate::output;

pub fn run(
    input_file: PathBuf,
    message: &str,
    profile_file: Option<PathBuf>,
    output_format: &str,
    prompt_only: bool,
) -> Result<(), PropdocError> {
    let profiles = load_profiles(profile_file.as_ref())?;
    let (text, filename) = read_input(&input_file)?;

    let doc = RawDocument::new(filename, text, message);
    let report = analyze_document(&doc, &profiles);

    if prompt_only {
        println!("{}", report.ai_prompt);
        return Ok(());
    }

    match output_format {
        "json" => output::json::print_report(&report)?,
        _ => output::table::print_report(&report),
    }

    Ok(())
}
