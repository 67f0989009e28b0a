//! SARIF 2.1.0 reporter for GitHub Code Scanning and VS Code integration
//!
//! Generates SARIF (Static Analysis Results Interchange Format) output
//! compliant with OASIS SARIF 2.1.0 specification.
//!
//! Reference: https://docs.oasis-open.org/sarif/sarif/v2.1.0/sarif-v2.1.0.html

use crate::detectors::rules;
use crate::models::{rule_doc_url, Finding, SecurityReport, Severity};
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;

/// SARIF schema URI
const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

/// Map severity to SARIF level
fn severity_to_sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "note",
    }
}

/// Map severity to security-severity score (0.0 - 10.0) for GitHub Code Scanning
fn severity_to_security_score(severity: Severity) -> f64 {
    match severity {
        Severity::High => 7.5,
        Severity::Medium => 5.0,
        Severity::Low => 2.5,
    }
}

// ============================================================================
// SARIF Data Structures
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
    invocations: Vec<SarifInvocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    short_description: SarifMessage,
    default_configuration: SarifConfiguration,
    properties: SarifRuleProperties,
    help_uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifConfiguration {
    level: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRuleProperties {
    tags: Vec<String>,
    #[serde(rename = "security-severity")]
    security_severity: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    rule_index: usize,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
    region: SarifRegion,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRegion {
    start_line: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifInvocation {
    execution_successful: bool,
    end_time_utc: String,
    tool_execution_notifications: Vec<SarifNotification>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifNotification {
    level: String,
    message: SarifMessage,
    descriptor: SarifDescriptor,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDescriptor {
    id: String,
}

// ============================================================================
// Implementation
// ============================================================================

/// Render report as SARIF 2.1.0 JSON
pub fn render(report: &SecurityReport) -> Result<String> {
    let sarif = build_sarif(report);
    Ok(serde_json::to_string_pretty(&sarif)?)
}

/// Build the complete SARIF document
fn build_sarif(report: &SecurityReport) -> SarifReport {
    // One SARIF rule per distinct rule id, in first-seen order
    let mut rule_index: HashMap<&str, usize> = HashMap::new();
    let mut sarif_rules: Vec<SarifRule> = Vec::new();
    for finding in &report.findings {
        if !rule_index.contains_key(finding.rule.as_str()) {
            rule_index.insert(finding.rule.as_str(), sarif_rules.len());
            sarif_rules.push(build_rule(finding));
        }
    }

    let results: Vec<SarifResult> = report
        .findings
        .iter()
        .map(|f| build_result(f, rule_index[f.rule.as_str()], &report.source))
        .collect();

    SarifReport {
        schema: SARIF_SCHEMA.to_string(),
        version: SARIF_VERSION.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "secanalyzer".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules: sarif_rules,
                },
            },
            results,
            invocations: vec![SarifInvocation {
                execution_successful: true,
                end_time_utc: Utc::now().to_rfc3339(),
                tool_execution_notifications: vec![SarifNotification {
                    level: "note".to_string(),
                    message: SarifMessage {
                        text: format!(
                            "Analysis complete. Security Score: {}/100 ({})",
                            report.score, report.rating
                        ),
                    },
                    descriptor: SarifDescriptor {
                        id: "summary".to_string(),
                    },
                }],
            }],
        }],
    }
}

/// Build a SARIF rule from the first finding carrying its id
fn build_rule(finding: &Finding) -> SarifRule {
    // Catalog rules carry their own severity; others use the finding's
    let severity = rules::find_rule(&finding.rule)
        .map(|r| r.severity)
        .unwrap_or(finding.severity);

    SarifRule {
        id: finding.rule.clone(),
        short_description: SarifMessage {
            text: finding.message.clone(),
        },
        default_configuration: SarifConfiguration {
            level: severity_to_sarif_level(severity).to_string(),
        },
        properties: SarifRuleProperties {
            tags: vec!["security".to_string()],
            security_severity: format!("{:.1}", severity_to_security_score(severity)),
        },
        help_uri: rule_doc_url(&finding.rule),
    }
}

/// Build a SARIF result from a finding
fn build_result(finding: &Finding, rule_index: usize, source: &str) -> SarifResult {
    SarifResult {
        rule_id: finding.rule.clone(),
        rule_index,
        level: severity_to_sarif_level(finding.severity).to_string(),
        message: SarifMessage {
            text: finding.message.clone(),
        },
        locations: vec![SarifLocation {
            physical_location: SarifPhysicalLocation {
                artifact_location: SarifArtifactLocation {
                    uri: source.to_string(),
                },
                region: SarifRegion {
                    start_line: finding.line,
                },
            },
        }],
    }
}
