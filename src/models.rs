//! Core data models for secanalyzer
//!
//! These models are shared by the local rule engine, the AI adapter and
//! the reporters.

use serde::{Deserialize, Serialize};

/// Base URL for per-rule documentation pages
pub const DOCS_BASE_URL: &str = "https://security-docs.example.com";

/// Severity levels for findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    /// Parse a severity label leniently.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything outside `high`/`medium`/`low` collapses to `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Severity::High,
            "low" => Severity::Low,
            _ => Severity::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    /// Strict parse, used for CLI flags where a typo should be reported
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(format!(
                "Unknown severity '{}'. Valid values: high, medium, low",
                s
            )),
        }
    }
}

/// A single reported security issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub message: String,
    /// 1-based line number
    pub line: u32,
    pub severity: Severity,
    /// Stable kebab-case rule identifier
    pub rule: String,
}

impl Finding {
    pub fn new(
        message: impl Into<String>,
        line: u32,
        severity: Severity,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            line,
            severity,
            rule: rule.into(),
        }
    }

    /// Documentation link for this finding's rule
    pub fn doc_url(&self) -> String {
        rule_doc_url(&self.rule)
    }
}

pub fn rule_doc_url(rule: &str) -> String {
    format!("{}/{}", DOCS_BASE_URL, rule)
}

/// Summary of findings by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingsSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl FindingsSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self::default();
        for f in findings {
            match f.severity {
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// Qualitative band for a security score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 90 => ScoreRating::Excellent,
            s if s >= 70 => ScoreRating::Good,
            s if s >= 50 => ScoreRating::Fair,
            _ => ScoreRating::Poor,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ScoreRating::Excellent => "Excellent Security Score",
            ScoreRating::Good => "Good Security Score",
            ScoreRating::Fair => "Fair Security Score",
            ScoreRating::Poor => "Poor Security Score - Needs Attention",
        }
    }
}

impl std::fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreRating::Excellent => write!(f, "Excellent"),
            ScoreRating::Good => write!(f, "Good"),
            ScoreRating::Fair => write!(f, "Fair"),
            ScoreRating::Poor => write!(f, "Poor"),
        }
    }
}

/// Result of analyzing one source text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityReport {
    /// File path or `<stdin>`
    pub source: String,
    pub score: u8,
    pub rating: ScoreRating,
    pub findings: Vec<Finding>,
    pub summary: FindingsSummary,
}

impl SecurityReport {
    /// Build a report, scoring over every finding given
    pub fn new(source: impl Into<String>, findings: Vec<Finding>) -> Self {
        let summary = FindingsSummary::from_findings(&findings);
        let score = crate::scoring::security_score(summary.high, summary.medium);
        Self {
            source: source.into(),
            score,
            rating: ScoreRating::from_score(score),
            findings,
            summary,
        }
    }
}
