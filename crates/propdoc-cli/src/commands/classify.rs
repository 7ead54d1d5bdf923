use propdoc_core::classify;
use propdoc_core::error::PropdocError;
use std::path::PathBuf;

use crate::commands::{load_profiles, read_input};
use crate::output;

pub fn run(
    input_file: PathBuf,
    profile_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), PropdocError> {
    let profiles = load_profiles(profile_file.as_ref())?;
    let (text, filename) = read_input(&input_file)?;

    let classification = classify::classify(&text, &filename, &profiles);

    match output_format {
        "json" => output::json::print_classification(&classification)?,
        _ => output::table::print_classification(&classification),
    }

    Ok(())
}
