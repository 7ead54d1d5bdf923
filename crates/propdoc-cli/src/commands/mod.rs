pub mod analyze;
pub mod classify;
pub mod vocab;

use propdoc_core::error::PropdocError;
use propdoc_core::vocab::schema::ProfileSet;
use std::path::{Path, PathBuf};

/// Load custom profiles when given, the built-in set otherwise.
pub fn load_profiles(custom: Option<&PathBuf>) -> Result<ProfileSet, PropdocError> {
    match custom {
        Some(path) => propdoc_core::vocab::load_profiles(path),
        None => propdoc_core::vocab::builtin::load_builtin(),
    }
}

/// Read the extracted text and derive a display filename from the path.
pub fn read_input(path: &Path) -> Result<(String, String), PropdocError> {
    let text = std::fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((text, filename))
}
