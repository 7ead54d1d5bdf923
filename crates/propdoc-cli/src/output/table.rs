use propdoc_core::classify::Classification;
use propdoc_core::report::ComprehensiveAnalysis;

pub fn print_classification(classification: &Classification) {
    println!("=== Classification ===\n");
    println!(
        "  Type:       {} ({})",
        classification.doc_type,
        classification.doc_type.description()
    );
    println!("  Confidence: {:.0}%", classification.confidence);

    if !classification.matched_keywords.is_empty() {
        println!(
            "  Keywords:   {}",
            classification.matched_keywords.join(", ")
        );
    }
    if !classification.matched_phrases.is_empty() {
        println!(
            "  Phrases:    {}",
            classification.matched_phrases.join(", ")
        );
    }
    println!("\n  {}", classification.reasoning);
}

pub fn print_report(report: &ComprehensiveAnalysis) {
    println!("=== {} ===\n", report.filename);
    println!(
        "  Type:       {} ({:.0}% confidence)",
        report.document_type, report.classification.confidence
    );
    println!("  Compliance: {}", report.compliance_status);
    println!("  Risk:       {}", report.risk_assessment.overall);
    println!("\n  {}\n", report.summary);

    // Key dates
    let dates = &report.key_dates;
    if dates.issue_date.is_some()
        || dates.expiry_date.is_some()
        || dates.next_review_date.is_some()
        || !dates.deadlines.is_empty()
    {
        println!("  Key dates:");
        if let Some(d) = &dates.issue_date {
            println!("    Issued:      {d}");
        }
        if let Some(d) = &dates.expiry_date {
            println!("    Expires:     {d}");
        }
        if let Some(d) = &dates.next_review_date {
            println!("    Next review: {d}");
        }
        for deadline in &dates.deadlines {
            println!("    Deadline:    {deadline}");
        }
        println!();
    }

    // Action items
    let actions = &report.action_items;
    print_bucket("Immediate", &actions.immediate);
    print_bucket("Short term", &actions.short_term);
    print_bucket("Long term", &actions.long_term);
    print_bucket("Completed", &actions.completed);

    // Risk detail
    if !report.risk_assessment.factors.is_empty() {
        println!("  Risk factors:");
        for factor in &report.risk_assessment.factors {
            println!("    - {factor}");
        }
        println!();
    }
    if !report.risk_assessment.mitigation.is_empty() {
        println!("  Mitigation:");
        for m in &report.risk_assessment.mitigation {
            println!("    - {m}");
        }
        println!();
    }

    // Legal
    if !report.legal_requirements.regulations.is_empty() {
        println!(
            "  Regulations: {}",
            report.legal_requirements.regulations.join(", ")
        );
        println!();
    }

    // Recommendations and next steps
    if !report.recommendations.is_empty() {
        println!("  Recommendations:");
        for rec in &report.recommendations {
            println!("    - {rec}");
        }
        println!();
    }
    println!("  Next steps:");
    for step in &report.next_steps {
        println!("    - {step}");
    }
}

fn print_bucket(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {label}:");
    for item in items {
        println!("    - {item}");
    }
    println!();
}
