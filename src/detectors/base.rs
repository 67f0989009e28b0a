//! Base detector trait and types
//!
//! This module defines the core abstractions for security detection:
//! - `Detector` trait that all detectors must implement
//! - `SourceText`, a line-indexed view of the text being analyzed
//! - `DetectionSummary` for per-run bookkeeping

use crate::models::{Finding, Severity};
use regex::Regex;
use std::collections::HashMap;

/// Line-indexed view of a source text.
///
/// Lines are split on `\n` only, so a trailing `\r` stays part of its line
/// and a trailing newline yields a final empty line.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: text.split('\n').collect(),
        }
    }

    /// The full, unsplit text
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Lines paired with their 1-based line numbers
    pub fn numbered_lines(&self) -> impl Iterator<Item = (u32, &'a str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (line_number(i), *line))
    }

    /// Text of a 1-based line, if it exists
    pub fn line(&self, number: u32) -> Option<&'a str> {
        let idx = usize::try_from(number).ok()?.checked_sub(1)?;
        self.lines.get(idx).copied()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 1-based number of the first line the pattern matches on its own.
    ///
    /// A pattern that only matches across a line break has no such line;
    /// those fall back to line 1.
    pub fn first_line_matching(&self, pattern: &Regex) -> u32 {
        self.numbered_lines()
            .find(|(_, line)| pattern.is_match(line))
            .map(|(n, _)| n)
            .unwrap_or(1)
    }
}

fn line_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

/// Trait for all security detectors
///
/// Detectors are pure functions over a source text: they never fail and
/// never carry state between runs.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyDetector;
///
/// impl Detector for MyDetector {
///     fn name(&self) -> &'static str {
///         "my-detector"
///     }
///
///     fn description(&self) -> &'static str {
///         "Detects my specific pattern"
///     }
///
///     fn detect(&self, source: &SourceText<'_>) -> Vec<Finding> {
///         vec![]
///     }
/// }
/// ```
pub trait Detector: Send + Sync {
    /// Unique identifier for this detector
    fn name(&self) -> &'static str;

    /// Human-readable description of what this detector finds
    fn description(&self) -> &'static str;

    /// Rule ids this detector can emit
    fn rule_ids(&self) -> Vec<&'static str>;

    /// Run detection and return findings in a stable order
    fn detect(&self, source: &SourceText<'_>) -> Vec<Finding>;
}

/// Summary statistics from running all detectors
#[derive(Debug, Clone, Default)]
pub struct DetectionSummary {
    pub detectors_run: usize,
    pub total_findings: usize,
    pub by_detector: HashMap<&'static str, usize>,
    pub by_severity: HashMap<Severity, usize>,
}

impl DetectionSummary {
    /// Record one detector's output
    pub fn add_result(&mut self, detector: &'static str, findings: &[Finding]) {
        self.detectors_run += 1;
        self.total_findings += findings.len();
        *self.by_detector.entry(detector).or_insert(0) += findings.len();
        for finding in findings {
            *self.by_severity.entry(finding.severity).or_insert(0) += 1;
        }
    }
}
