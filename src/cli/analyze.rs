//! Analyze command - scan one source file and report findings with a score

use crate::ai::{AiAnalyzer, AiClient};
use crate::config::UserConfig;
use crate::detectors;
use crate::models::{Finding, SecurityReport, Severity};
use crate::reporters::{report_with_format, OutputFormat};
use anyhow::{Context, Result};
use console::style;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Label used for the report source when reading stdin
const STDIN_LABEL: &str = "<stdin>";

/// Parsed options for the analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub ai: bool,
    pub min_severity: Option<Severity>,
    pub fail_on: Option<Severity>,
    pub no_color: bool,
}

/// Run the analyze command
pub fn run(opts: AnalyzeOptions) -> Result<()> {
    let start = Instant::now();
    let (source, code) = read_source(&opts.path)?;

    let (mut findings, summary) = detectors::analyze_with_summary(&code);
    debug!(
        "Local detectors: {} run, {} findings ({:?})",
        summary.detectors_run, summary.total_findings, summary.by_detector
    );

    if opts.ai {
        findings.extend(run_ai_review(&code)?);
    }

    let report = SecurityReport::new(source, findings);
    info!(
        "Analyzed {} in {:?}: score {} with {} findings",
        report.source,
        start.elapsed(),
        report.score,
        report.summary.total
    );

    // Thresholds look at every finding, not just the displayed ones
    let should_fail = opts
        .fail_on
        .is_some_and(|threshold| exceeds_threshold(&report.findings, threshold));

    let display = filter_for_display(report, opts.min_severity);
    let color = !opts.no_color
        && opts.output.is_none()
        && opts.format == OutputFormat::Text
        && console::colors_enabled();
    let output = report_with_format(&display, opts.format, color)?;

    if let Some(out_path) = &opts.output {
        std::fs::write(out_path, &output)
            .with_context(|| format!("Failed to write report to {}", out_path.display()))?;
        // stderr keeps stdout clean for piping
        eprintln!(
            "Report written to: {}",
            style(out_path.display()).cyan()
        );
    } else {
        println!("{}", output.trim_end());
    }

    if should_fail {
        if let Some(threshold) = opts.fail_on {
            eprintln!("Failing due to --fail-on={} threshold", threshold);
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Read the file at `path`, or stdin for `-`. Invalid UTF-8 is replaced.
pub(super) fn read_source(path: &Path) -> Result<(String, String)> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read source from stdin")?;
        return Ok((
            STDIN_LABEL.to_string(),
            String::from_utf8_lossy(&buf).into_owned(),
        ));
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((
        path.display().to_string(),
        String::from_utf8_lossy(&bytes).into_owned(),
    ))
}

/// All-or-nothing AI review; any failure aborts the command
fn run_ai_review(code: &str) -> Result<Vec<Finding>> {
    let config = UserConfig::load()?;
    let client = AiClient::from_key(config.ai_config(), config.api_key()).with_context(|| {
        format!(
            "AI review needs an API key: set {} or run `secanalyzer init`",
            crate::config::API_KEY_ENV
        )
    })?;
    let findings = AiAnalyzer::new(client)
        .analyze_code(code)
        .context("AI review failed")?;
    Ok(findings)
}

fn exceeds_threshold(findings: &[Finding], threshold: Severity) -> bool {
    findings.iter().any(|f| f.severity >= threshold)
}

/// Drop findings below `min` from the listing; score and summary stay whole
fn filter_for_display(mut report: SecurityReport, min: Option<Severity>) -> SecurityReport {
    if let Some(min) = min {
        report.findings.retain(|f| f.severity >= min);
    }
    report
}
