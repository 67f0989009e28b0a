//! Text (terminal) reporter with colors and formatting

use crate::models::{Finding, ScoreRating, SecurityReport, Severity};
use anyhow::Result;

/// ANSI palette; every code is empty when color is off
struct Palette {
    reset: &'static str,
    bold: &'static str,
    dim: &'static str,
    high: &'static str,
    medium: &'static str,
    low: &'static str,
    excellent: &'static str,
    good: &'static str,
    fair: &'static str,
    poor: &'static str,
}

impl Palette {
    fn new(color: bool) -> Self {
        if color {
            Self {
                reset: "\x1b[0m",
                bold: "\x1b[1m",
                dim: "\x1b[2m",
                high: "\x1b[91m",      // Light red
                medium: "\x1b[33m",    // Yellow
                low: "\x1b[34m",       // Blue
                excellent: "\x1b[32m", // Green
                good: "\x1b[92m",      // Light green
                fair: "\x1b[33m",      // Yellow
                poor: "\x1b[31m",      // Red
            }
        } else {
            Self {
                reset: "",
                bold: "",
                dim: "",
                high: "",
                medium: "",
                low: "",
                excellent: "",
                good: "",
                fair: "",
                poor: "",
            }
        }
    }

    fn severity(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    fn rating(&self, rating: ScoreRating) -> &'static str {
        match rating {
            ScoreRating::Excellent => self.excellent,
            ScoreRating::Good => self.good,
            ScoreRating::Fair => self.fair,
            ScoreRating::Poor => self.poor,
        }
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "[H]",
        Severity::Medium => "[M]",
        Severity::Low => "[L]",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &SecurityReport, color: bool) -> Result<String> {
    let p = Palette::new(color);
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{}Security Analysis{}  {}\n", p.bold, p.reset, report.source));
    out.push_str(&format!(
        "{}──────────────────────────────────────{}\n",
        p.dim, p.reset
    ));
    out.push_str(&format!(
        "Security Score: {}{}{}%{}  ({})\n\n",
        p.rating(report.rating),
        p.bold,
        report.score,
        p.reset,
        report.rating.describe()
    ));

    // Findings summary
    let s = &report.summary;
    out.push_str(&format!("{}FINDINGS{} ({} total)\n", p.bold, p.reset, s.total));
    if s.total > 0 {
        out.push_str(&format!(
            "  {}{} high{} | {}{} medium{} | {}{} low{}\n\n",
            p.severity(Severity::High),
            s.high,
            p.reset,
            p.severity(Severity::Medium),
            s.medium,
            p.reset,
            p.severity(Severity::Low),
            s.low,
            p.reset
        ));
    }

    if report.findings.is_empty() {
        out.push_str(&format!("  {}No issues found.{}\n", p.dim, p.reset));
        return Ok(out);
    }

    out.push_str(&format!(
        "{}  SEV  LINE   MESSAGE{}\n",
        p.dim, p.reset
    ));
    out.push_str(&format!(
        "{}  ─────────────────────────────────────────────────────────────────{}\n",
        p.dim, p.reset
    ));

    for finding in &report.findings {
        out.push_str(&format_finding(finding, &p));
    }
    out.push('\n');

    Ok(out)
}

fn format_finding(finding: &Finding, p: &Palette) -> String {
    format!(
        "  {}{}{}  {:>4}   {}\n         {}{} · {}{}\n",
        p.severity(finding.severity),
        severity_tag(finding.severity),
        p.reset,
        finding.line,
        finding.message,
        p.dim,
        finding.rule,
        finding.doc_url(),
        p.reset,
    )
}
