use crate::error::PropdocError;
use crate::vocab::schema::ProfileSet;

const CLASSIFIER_PROFILES_JSON: &str = include_str!("../../../../rules/classifier-profiles.json");

/// Load the built-in vocabulary profile set.
pub fn load_builtin() -> Result<ProfileSet, PropdocError> {
    let set: ProfileSet = serde_json::from_str(CLASSIFIER_PROFILES_JSON)?;
    crate::vocab::validate_profiles(&set)?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocType;

    #[test]
    fn test_builtin_profiles_parse_and_validate() {
        let set = load_builtin().unwrap();
        assert_eq!(set.profiles.len(), 10);
        assert!(set.scale > 0);
    }

    #[test]
    fn test_builtin_covers_every_concrete_type() {
        let set = load_builtin().unwrap();
        for t in DocType::PRIORITY {
            assert!(set.profile(t).is_some(), "missing profile for {t}");
        }
        assert!(set.profile(DocType::Other).is_none());
    }

    #[test]
    fn test_lease_profile_has_open_gate() {
        let set = load_builtin().unwrap();
        let lease = set.profile(DocType::Lease).unwrap();
        assert!(lease.required.is_empty());
        assert_eq!(lease.scoring.required, 0);
    }
}
