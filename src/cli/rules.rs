//! Rules command - list the built-in detection rules

use crate::ai::AI_RULE_ID;
use crate::detectors::{default_detectors, rules};
use crate::models::{rule_doc_url, Severity};
use anyhow::Result;
use console::style;

/// Run the rules command
pub fn run() -> Result<()> {
    println!("\n{}\n", style("Line rules").bold());
    for rule in rules::catalog() {
        println!(
            "  {} {}",
            severity_badge(rule.severity),
            style(rule.id).cyan()
        );
        println!("         {}", rule.message);
        println!("         {}", style(rule_doc_url(rule.id)).dim());
    }

    println!("\n{}\n", style("Multi-line detectors").bold());
    for detector in default_detectors() {
        // The line scanner's rules are listed above
        if detector
            .rule_ids()
            .iter()
            .all(|id| rules::find_rule(id).is_some())
        {
            continue;
        }
        for id in detector.rule_ids() {
            println!(
                "  {} {}",
                severity_badge(Severity::High),
                style(id).cyan()
            );
            println!("         {}", detector.description());
            println!("         {}", style(rule_doc_url(id)).dim());
        }
    }

    println!("\n{}\n", style("AI review (--ai)").bold());
    println!(
        "  {} {}",
        style("[*]").dim(),
        style(AI_RULE_ID).cyan()
    );
    println!("         Findings reported by the language model, severity as given");
    println!();

    Ok(())
}

fn severity_badge(severity: Severity) -> console::StyledObject<&'static str> {
    match severity {
        Severity::High => style("[H]").red(),
        Severity::Medium => style("[M]").yellow(),
        Severity::Low => style("[L]").blue(),
    }
}
