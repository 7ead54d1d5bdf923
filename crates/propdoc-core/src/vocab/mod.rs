pub mod builtin;
pub mod schema;

use crate::error::PropdocError;
use crate::model::DocType;
use schema::ProfileSet;
use std::path::Path;

/// Load a vocabulary profile set from a JSON file.
pub fn load_profiles(path: &Path) -> Result<ProfileSet, PropdocError> {
    let content = std::fs::read_to_string(path).map_err(|e| PropdocError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let set: ProfileSet = serde_json::from_str(&content).map_err(|e| PropdocError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_profiles(&set)?;
    Ok(set)
}

/// Parse a vocabulary profile set from a JSON string.
pub fn parse_profiles_str(json: &str) -> Result<ProfileSet, PropdocError> {
    let set: ProfileSet = serde_json::from_str(json)?;
    validate_profiles(&set)?;
    Ok(set)
}

/// Validate that a profile set is well-formed.
pub fn validate_profiles(set: &ProfileSet) -> Result<(), PropdocError> {
    if set.scale == 0 {
        return Err(PropdocError::ProfileInvalid(
            "scale must be greater than zero".into(),
        ));
    }

    if set.profiles.is_empty() {
        return Err(PropdocError::ProfileInvalid(
            "profiles must not be empty".into(),
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for profile in &set.profiles {
        if profile.doc_type == DocType::Other {
            return Err(PropdocError::ProfileInvalid(
                "the default type must not carry a profile".into(),
            ));
        }

        if !seen.insert(profile.doc_type) {
            return Err(PropdocError::ProfileInvalid(format!(
                "duplicate profile for '{}'",
                profile.doc_type
            )));
        }

        if profile.keywords.is_empty() && profile.phrases.is_empty() {
            return Err(PropdocError::ProfileInvalid(format!(
                "profile '{}' has neither keywords nor phrases",
                profile.doc_type
            )));
        }

        for term in profile
            .keywords
            .iter()
            .chain(profile.phrases.iter())
            .chain(profile.required.iter())
        {
            if term.trim().is_empty() {
                return Err(PropdocError::ProfileInvalid(format!(
                    "profile '{}' contains an empty term",
                    profile.doc_type
                )));
            }
            if *term != term.to_lowercase() {
                return Err(PropdocError::ProfileInvalid(format!(
                    "profile '{}' term '{}' must be lower-case",
                    profile.doc_type, term
                )));
            }
        }

        if !profile.required.is_empty() && profile.scoring.required == 0 {
            return Err(PropdocError::ProfileInvalid(format!(
                "profile '{}' has a required gate but no required bonus",
                profile.doc_type
            )));
        }

        for cue in &profile.structural {
            if cue.all_of.is_empty() && cue.any_of.is_empty() {
                return Err(PropdocError::ProfileInvalid(format!(
                    "profile '{}' has a structural cue with no terms",
                    profile.doc_type
                )));
            }
            if cue.points == 0 {
                return Err(PropdocError::ProfileInvalid(format!(
                    "profile '{}' has a structural cue worth no points",
                    profile.doc_type
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_profiles() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "scale": 20,
            "profiles": [
                {
                    "doc_type": "gas-safety",
                    "keywords": ["gas", "boiler"],
                    "phrases": ["gas safety certificate"],
                    "required": ["gas"],
                    "scoring": { "keyword": 2, "phrase": 5, "required": 10 }
                }
            ]
        }"#;
        let set = parse_profiles_str(json).unwrap();
        assert_eq!(set.profiles.len(), 1);
        assert_eq!(set.scale, 20);
    }

    #[test]
    fn test_zero_scale_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0", "scale": 0,
            "profiles": [
                {
                    "doc_type": "gas-safety",
                    "keywords": ["gas"], "phrases": [], "required": [],
                    "scoring": { "keyword": 2, "phrase": 5, "required": 0 }
                }
            ]
        }"#;
        assert!(parse_profiles_str(json).is_err());
    }

    #[test]
    fn test_default_type_profile_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0", "scale": 20,
            "profiles": [
                {
                    "doc_type": "other",
                    "keywords": ["anything"], "phrases": [], "required": [],
                    "scoring": { "keyword": 1, "phrase": 1, "required": 0 }
                }
            ]
        }"#;
        assert!(parse_profiles_str(json).is_err());
    }

    #[test]
    fn test_duplicate_profile_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0", "scale": 20,
            "profiles": [
                {
                    "doc_type": "lease",
                    "keywords": ["lease"], "phrases": [], "required": [],
                    "scoring": { "keyword": 3, "phrase": 6, "required": 0 }
                },
                {
                    "doc_type": "lease",
                    "keywords": ["tenancy"], "phrases": [], "required": [],
                    "scoring": { "keyword": 3, "phrase": 6, "required": 0 }
                }
            ]
        }"#;
        assert!(parse_profiles_str(json).is_err());
    }

    #[test]
    fn test_upper_case_term_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0", "scale": 20,
            "profiles": [
                {
                    "doc_type": "lease",
                    "keywords": ["Lease"], "phrases": [], "required": [],
                    "scoring": { "keyword": 3, "phrase": 6, "required": 0 }
                }
            ]
        }"#;
        assert!(parse_profiles_str(json).is_err());
    }

    #[test]
    fn test_gate_without_bonus_rejected() {
        let json = r#"{
            "name": "Bad", "version": "1.0", "scale": 20,
            "profiles": [
                {
                    "doc_type": "gas-safety",
                    "keywords": ["gas"], "phrases": [], "required": ["gas"],
                    "scoring": { "keyword": 2, "phrase": 5, "required": 0 }
                }
            ]
        }"#;
        assert!(parse_profiles_str(json).is_err());
    }
}
