use propdoc_core::error::PropdocError;
use propdoc_core::model::DocType;
use propdoc_core::vocab;
use std::path::Path;

pub fn list() -> Result<(), PropdocError> {
    let set = vocab::builtin::load_builtin()?;

    println!("{} (v{})\n", set.name, set.version);
    println!("Profiles:\n");
    for profile in &set.profiles {
        let description = profile
            .description
            .as_deref()
            .unwrap_or(profile.doc_type.description());
        println!("  {:<24} {}", profile.doc_type.to_string(), description);
        println!(
            "  {:<24} {} keywords, {} phrases, gate: {}",
            "",
            profile.keywords.len(),
            profile.phrases.len(),
            if profile.required.is_empty() {
                "none".to_string()
            } else {
                profile.required.join(" + ")
            }
        );
        println!();
    }
    println!("Documents matching no profile fall back to '{}'.", DocType::Other);
    Ok(())
}

pub fn explain(doc_type: &str) -> Result<(), PropdocError> {
    let Some(doc_type) = DocType::from_str_loose(doc_type) else {
        return Err(PropdocError::ProfileInvalid(format!(
            "unknown document type '{doc_type}'. Available: {}",
            DocType::ALL
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    };

    if doc_type == DocType::Other {
        println!("{}\n", doc_type.description());
        println!("The default type carries no vocabulary profile; it is the result");
        println!("when no candidate type passes its gate or scores any points.");
        return Ok(());
    }

    let set = vocab::builtin::load_builtin()?;
    let Some(profile) = set.profile(doc_type) else {
        return Err(PropdocError::ProfileInvalid(format!(
            "no built-in profile for '{doc_type}'"
        )));
    };

    println!("{}\n", doc_type.description());
    println!("Typical review frequency: {}", doc_type.review_frequency());
    println!(
        "Tracked on the compliance calendar: {}\n",
        if doc_type.requires_compliance_action() {
            "yes"
        } else {
            "no"
        }
    );

    if profile.required.is_empty() {
        println!("Gate: none (always eligible for scoring)");
    } else {
        println!(
            "Gate: all of [{}] must appear before scoring",
            profile.required.join(", ")
        );
    }
    println!(
        "Weights: keyword {}, phrase {}, gate bonus {}\n",
        profile.scoring.keyword, profile.scoring.phrase, profile.scoring.required
    );

    println!("Keywords ({}):", profile.keywords.len());
    println!("  {}\n", profile.keywords.join(", "));
    println!("Phrases ({}):", profile.phrases.len());
    println!("  {}\n", profile.phrases.join(", "));

    if !profile.structural.is_empty() {
        println!("Structural cues:");
        for cue in &profile.structural {
            let mut parts = Vec::new();
            if !cue.all_of.is_empty() {
                parts.push(format!("all of [{}]", cue.all_of.join(", ")));
            }
            if !cue.any_of.is_empty() {
                parts.push(format!("any of [{}]", cue.any_of.join(", ")));
            }
            println!("  +{:<3} {}", cue.points, parts.join(" and "));
        }
    }

    Ok(())
}

pub fn validate(file: &Path) -> Result<(), PropdocError> {
    let set = vocab::load_profiles(file)?;
    println!(
        "OK: {} (v{}) with {} profile(s)",
        set.name,
        set.version,
        set.profiles.len()
    );
    Ok(())
}
