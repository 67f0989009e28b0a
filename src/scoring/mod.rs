//! Security Scoring
//!
//! Maps severity counts to a single 0-100 score.
//!
//! # Scoring Formula
//!
//! ```text
//! Score = clamp(100 - 15 × high - 5 × medium, 0, 100)
//! ```
//!
//! Low-severity findings are reported but carry no penalty.
//!
//! # Example
//!
//! A file with 2 high and 3 medium findings:
//!
//! 100 - 2 × 15 - 3 × 5 = 55

use crate::models::{Finding, FindingsSummary};

const BASE_SCORE: i64 = 100;
const HIGH_PENALTY: i64 = 15;
const MEDIUM_PENALTY: i64 = 5;

/// Compute the security score from high and medium counts.
///
/// Total over all inputs; very large counts saturate to 0.
pub fn security_score(high: usize, medium: usize) -> u8 {
    let high = i64::try_from(high).unwrap_or(i64::MAX);
    let medium = i64::try_from(medium).unwrap_or(i64::MAX);

    let score = BASE_SCORE
        .saturating_sub(high.saturating_mul(HIGH_PENALTY))
        .saturating_sub(medium.saturating_mul(MEDIUM_PENALTY));

    score.clamp(0, 100) as u8
}

/// Score a finding list by its severity counts
pub fn score_findings(findings: &[Finding]) -> u8 {
    let summary = FindingsSummary::from_findings(findings);
    security_score(summary.high, summary.medium)
}
