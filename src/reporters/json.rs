//! JSON reporter
//!
//! Outputs the full SecurityReport as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or editor integrations.

use crate::models::SecurityReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &SecurityReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_valid() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["score"], 80);
        assert_eq!(parsed["rating"], "good");
        assert_eq!(parsed["summary"]["high"], 1);
        assert_eq!(parsed["findings"][0]["rule"], "no-eval");
        assert_eq!(parsed["findings"][0]["severity"], "high");
        assert_eq!(parsed["findings"][0]["line"], 3);
    }

    #[test]
    fn test_json_round_trips_findings() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let back: SecurityReport = serde_json::from_str(&json_str).expect("deserialize");
        assert_eq!(back.findings, report.findings);
    }

    #[test]
    fn test_json_empty_findings() {
        let report = SecurityReport::new("clean.js", vec![]);
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["findings"].as_array().expect("findings array").len(), 0);
        assert_eq!(parsed["score"], 100);
    }
}
